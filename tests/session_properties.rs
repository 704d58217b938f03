use std::sync::{Arc, Barrier};
use std::thread;

use pretty_assertions::assert_eq;
use trivia_quiz::{
    Advance, Category, Correctness, Difficulty, Question, QuestionDeck, Retreat, SessionController,
    SessionError, SessionState, ShufflePolicy, Slot,
};

fn deck(correct: &[usize]) -> Arc<QuestionDeck> {
    let questions = correct
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            Question::new(
                format!("q{}", i),
                format!("Question {}", i),
                Category::DataStructures,
                Difficulty::Medium,
                vec!["first".to_string(), "second".to_string()],
                c,
                None,
            )
            .unwrap()
        })
        .collect();
    Arc::new(QuestionDeck::new(questions).unwrap())
}

fn assert_invariants(state: &SessionState) {
    let correct = state.slots().iter().filter(|s| s.is_correct()).count();
    let answered = state.slots().iter().filter(|s| s.is_answered()).count();
    assert_eq!(state.score(), correct);
    assert_eq!(state.answered(), answered);
    assert!(state.cursor() < state.len());
}

#[test]
fn test_three_question_scenario() {
    let session = SessionController::new(deck(&[0, 1, 0]), ShufflePolicy::Fixed);

    let first = session.submit_answer(0).unwrap();
    assert_eq!(first.correctness, Correctness::Correct);
    assert_eq!(first.snapshot.score, 1);

    assert!(matches!(session.advance_card(), Advance::Card(_)));

    let second = session.submit_answer(0).unwrap();
    assert_eq!(second.correctness, Correctness::Incorrect);
    assert_eq!(second.correct_choice, 1);
    assert_eq!(second.snapshot.score, 1);
    assert_eq!(second.snapshot.answered, 2);

    // Third question left unanswered.
    assert!(matches!(session.advance_card(), Advance::Card(_)));
    let Advance::Completed(done) = session.advance_card() else {
        panic!("expected completion at the last question");
    };
    assert_eq!(done.report.score, 1);
    assert_eq!(done.report.answered, 2);
    assert_eq!(done.report.accuracy, 50);
    assert_eq!(done.deck_length, 3);
    assert_invariants(&session.state());
}

#[test]
fn test_invalid_choice_changes_nothing() {
    let session = SessionController::new(deck(&[1]), ShufflePolicy::Fixed);
    let before = session.state();
    assert_eq!(
        session.submit_answer(5),
        Err(SessionError::InvalidChoice {
            selection: 5,
            choices: 2
        })
    );
    assert_eq!(session.state(), before);
}

#[test]
fn test_double_submit_is_rejected() {
    let session = SessionController::new(deck(&[0, 0]), ShufflePolicy::Fixed);
    session.submit_answer(0).unwrap();
    let score = session.report().score;

    assert!(matches!(
        session.submit_answer(0),
        Err(SessionError::AlreadyAnswered { .. })
    ));
    assert_eq!(session.report().score, score);
}

#[test]
fn test_edges_leave_state_unchanged() {
    let session = SessionController::new(deck(&[0, 1]), ShufflePolicy::Fixed);

    let before = session.state();
    assert!(matches!(session.retreat_card(), Retreat::Boundary(_)));
    assert_eq!(session.state(), before);

    session.advance_card();
    session.submit_answer(1).unwrap();
    let before = session.state();
    assert!(matches!(session.advance_card(), Advance::Completed(_)));
    assert_eq!(session.state(), before);
}

#[test]
fn test_reset_clears_everything() {
    let session = SessionController::new(deck(&[0, 1, 1, 0]), ShufflePolicy::Fixed);
    session.submit_answer(0).unwrap();
    session.advance_card();
    session.submit_answer(0).unwrap();
    session.advance_card();

    let card = session.reset_session();
    assert_eq!(card.snapshot.position, 1);
    assert!(card.question.reveal.is_none());

    let state = session.state();
    assert_eq!(state.cursor(), 0);
    assert_eq!(state.score(), 0);
    assert_eq!(state.answered(), 0);
    assert!(state.slots().iter().all(|s| *s == Slot::Unanswered));
}

#[test]
fn test_replay_after_reset_is_deterministic() {
    let session = SessionController::new(deck(&[0, 1, 1, 0, 1]), ShufflePolicy::Fixed);
    let script = [Some(0), Some(0), None, Some(1), Some(1)];

    let play = |session: &SessionController| {
        for (i, selection) in script.iter().enumerate() {
            if let Some(selection) = selection {
                session.submit_answer(*selection).unwrap();
            }
            if i + 1 < script.len() {
                session.advance_card();
            }
        }
        session.get_current().snapshot
    };

    let first = play(&session);
    let first_state = session.state();
    session.reset_session();
    let second = play(&session);

    assert_eq!(first, second);
    assert_eq!(first_state, session.state());
    assert_invariants(&session.state());
}

#[test]
fn test_concurrent_submissions_have_one_winner() {
    for _ in 0..50 {
        let session = Arc::new(SessionController::new(deck(&[0, 1]), ShufflePolicy::Fixed));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = Arc::clone(&session);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    session.submit_answer(0)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(SessionError::AlreadyAnswered { .. })))
            .count();

        assert_eq!(winners, 1);
        assert_eq!(rejected, 7);
        assert_eq!(session.report().score, 1);
        assert_invariants(&session.state());
    }
}

#[test]
fn test_readers_never_see_partial_updates() {
    let session = Arc::new(SessionController::new(deck(&[0; 64]), ShufflePolicy::Fixed));

    let writer = {
        let session = Arc::clone(&session);
        thread::spawn(move || {
            for _ in 0..64 {
                session.submit_answer(0).unwrap();
                session.advance_card();
            }
        })
    };

    for _ in 0..500 {
        assert_invariants(&session.state());
        let snapshot = session.get_current().snapshot;
        assert!(snapshot.score <= snapshot.answered);
    }

    writer.join().unwrap();
    assert_eq!(session.report().score, 64);
}
