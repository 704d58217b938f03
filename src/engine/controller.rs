//! The quiz session state machine.
//!
//! `SessionController` is the only code that mutates a `SessionState`. Every
//! mutating operation runs under the write half of the session lock and
//! either applies completely or returns an error having changed nothing.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use clap::ValueEnum;
use rand::rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::QuestionDeck;
use crate::error::SessionError;
use crate::models::{Correctness, Question, QuestionView, SessionState, Slot, Snapshot};

use super::evaluator::evaluate;
use super::navigation::{self, Step};
use super::score::{ScoreReport, snapshot};

/// How a session orders the deck it plays through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShufflePolicy {
    /// Deck order, every time.
    #[default]
    Fixed,
    /// A fresh random order when the session starts and on every reset.
    Shuffled,
}

impl ShufflePolicy {
    fn draw_order(self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        if self == ShufflePolicy::Shuffled {
            order.shuffle(&mut rng());
        }
        order
    }
}

/// The current question together with session progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub question: QuestionView,
    pub snapshot: Snapshot,
}

/// Result of a successful submission. Reveals the correct choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub correctness: Correctness,
    pub correct_choice: usize,
    pub explanation: Option<String>,
    pub snapshot: Snapshot,
}

/// Terminal signal: the player tried to advance past the last question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub report: ScoreReport,
    pub deck_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Card(CardView),
    Completed(Completion),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retreat {
    Card(CardView),
    Boundary(Snapshot),
}

pub struct SessionController {
    deck: Arc<QuestionDeck>,
    policy: ShufflePolicy,
    state: RwLock<SessionState>,
}

impl SessionController {
    pub fn new(deck: Arc<QuestionDeck>, policy: ShufflePolicy) -> Self {
        let state = SessionState::new(policy.draw_order(deck.len()));
        Self {
            deck,
            policy,
            state: RwLock::new(state),
        }
    }

    pub fn policy(&self) -> ShufflePolicy {
        self.policy
    }

    pub fn get_current(&self) -> CardView {
        let state = self.read();
        self.card(&state)
    }

    pub fn submit_answer(&self, selection: usize) -> Result<AnswerOutcome, SessionError> {
        let mut state = self.write();

        if state.current_slot().is_answered() {
            return Err(SessionError::AlreadyAnswered {
                position: state.cursor() + 1,
            });
        }

        let question = self.question_at(&state);
        let correctness = evaluate(question, selection)?;
        state.record(selection, correctness);

        debug!(
            position = state.cursor() + 1,
            selection,
            ?correctness,
            score = state.score(),
            "answer recorded"
        );

        Ok(AnswerOutcome {
            correctness,
            correct_choice: question.correct_choice(),
            explanation: question.explanation().map(str::to_string),
            snapshot: snapshot(&state),
        })
    }

    pub fn advance_card(&self) -> Advance {
        let mut state = self.write();
        match navigation::advance(&mut state) {
            Step::Moved(_) => Advance::Card(self.card(&state)),
            Step::Boundary(_) => {
                let completion = Completion {
                    report: ScoreReport::of(&state),
                    deck_length: state.len(),
                };
                debug!(
                    score = completion.report.score,
                    answered = completion.report.answered,
                    "deck exhausted"
                );
                Advance::Completed(completion)
            }
        }
    }

    pub fn retreat_card(&self) -> Retreat {
        let mut state = self.write();
        match navigation::retreat(&mut state) {
            Step::Moved(_) => Retreat::Card(self.card(&state)),
            Step::Boundary(_) => Retreat::Boundary(snapshot(&state)),
        }
    }

    /// Start over from the first question with every slot cleared.
    pub fn reset_session(&self) -> CardView {
        let mut state = self.write();
        *state = SessionState::new(self.policy.draw_order(self.deck.len()));
        debug!(policy = ?self.policy, "session reset");
        self.card(&state)
    }

    pub fn report(&self) -> ScoreReport {
        ScoreReport::of(&self.read())
    }

    /// Copy of the full session state.
    pub fn state(&self) -> SessionState {
        self.read().clone()
    }

    fn question_at(&self, state: &SessionState) -> &Question {
        &self.deck[state.current_deck_index()]
    }

    fn card(&self, state: &SessionState) -> CardView {
        let question = self.question_at(state);
        let question = match state.current_slot() {
            Slot::Unanswered => QuestionView::hidden(question),
            Slot::Answered {
                selection,
                correctness,
            } => QuestionView::revealed(question, selection, correctness.is_correct()),
        };

        CardView {
            question,
            snapshot: snapshot(state),
        }
    }

    // Every mutation is committed in a single step after validation, so a
    // poisoned lock never holds a half-applied update.
    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Difficulty};
    use pretty_assertions::assert_eq;

    fn deck(correct: &[usize]) -> Arc<QuestionDeck> {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Question::new(
                    format!("q{}", i),
                    format!("Question {}", i),
                    Category::Fundamentals,
                    Difficulty::Easy,
                    vec!["a".into(), "b".into()],
                    c,
                    Some(format!("explanation {}", i)),
                )
                .unwrap()
            })
            .collect();
        Arc::new(QuestionDeck::new(questions).unwrap())
    }

    #[test]
    fn test_fresh_session() {
        let controller = SessionController::new(deck(&[0, 1]), ShufflePolicy::Fixed);
        let card = controller.get_current();
        assert_eq!(card.question.id, "q0");
        assert!(card.question.reveal.is_none());
        assert_eq!(
            card.snapshot,
            Snapshot {
                position: 1,
                score: 0,
                answered: 0,
                accuracy: 0,
                deck_length: 2
            }
        );
    }

    #[test]
    fn test_submit_then_already_answered() {
        let controller = SessionController::new(deck(&[0, 1]), ShufflePolicy::Fixed);

        let outcome = controller.submit_answer(0).unwrap();
        assert_eq!(outcome.correctness, Correctness::Correct);
        assert_eq!(outcome.correct_choice, 0);
        assert_eq!(outcome.explanation.as_deref(), Some("explanation 0"));
        assert_eq!(outcome.snapshot.score, 1);

        let before = controller.state();
        assert_eq!(
            controller.submit_answer(1),
            Err(SessionError::AlreadyAnswered { position: 1 })
        );
        assert_eq!(controller.state(), before);
    }

    #[test]
    fn test_invalid_choice_leaves_state() {
        let controller = SessionController::new(deck(&[0]), ShufflePolicy::Fixed);
        let before = controller.state();
        assert_eq!(
            controller.submit_answer(5),
            Err(SessionError::InvalidChoice {
                selection: 5,
                choices: 2
            })
        );
        assert_eq!(controller.state(), before);
        // Still answerable afterwards.
        assert!(controller.submit_answer(1).is_ok());
    }

    #[test]
    fn test_answered_card_is_revealed_on_return() {
        let controller = SessionController::new(deck(&[1, 0]), ShufflePolicy::Fixed);
        controller.submit_answer(0).unwrap();

        let Advance::Card(next) = controller.advance_card() else {
            panic!("expected a card");
        };
        assert!(next.question.reveal.is_none());

        let Retreat::Card(prev) = controller.retreat_card() else {
            panic!("expected a card");
        };
        let reveal = prev.question.reveal.unwrap();
        assert_eq!(reveal.selected, 0);
        assert!(!reveal.correct);
        assert_eq!(reveal.correct_choice, 1);
    }

    #[test]
    fn test_retreat_at_start_is_boundary() {
        let controller = SessionController::new(deck(&[0, 0]), ShufflePolicy::Fixed);
        let before = controller.state();
        assert!(matches!(controller.retreat_card(), Retreat::Boundary(s) if s.position == 1));
        assert_eq!(controller.state(), before);
    }

    #[test]
    fn test_completion_does_not_reset() {
        let controller = SessionController::new(deck(&[0]), ShufflePolicy::Fixed);
        controller.submit_answer(0).unwrap();

        let before = controller.state();
        let Advance::Completed(done) = controller.advance_card() else {
            panic!("expected completion");
        };
        assert_eq!(done.report.score, 1);
        assert_eq!(done.report.accuracy, 100);
        assert_eq!(done.report.points, 10);
        assert_eq!(done.deck_length, 1);
        assert_eq!(controller.state(), before);

        // Completion repeats until an explicit reset.
        assert!(matches!(controller.advance_card(), Advance::Completed(_)));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let controller = SessionController::new(deck(&[0, 1, 0]), ShufflePolicy::Fixed);
        controller.submit_answer(0).unwrap();
        controller.advance_card();
        controller.submit_answer(0).unwrap();

        let first = controller.reset_session();
        let fresh = controller.state();
        assert_eq!(fresh.cursor(), 0);
        assert_eq!(fresh.score(), 0);
        assert_eq!(fresh.answered(), 0);
        assert!(fresh.slots().iter().all(|s| *s == Slot::Unanswered));

        let second = controller.reset_session();
        assert_eq!(first, second);
        assert_eq!(controller.state(), fresh);
    }

    #[test]
    fn test_shuffled_order_is_a_permutation() {
        let controller = SessionController::new(deck(&[0; 12]), ShufflePolicy::Shuffled);
        for _ in 0..3 {
            let mut order = controller.state().order().to_vec();
            order.sort_unstable();
            assert_eq!(order, (0..12).collect::<Vec<_>>());
            controller.reset_session();
        }
    }

    #[test]
    fn test_shuffled_reset_draws_new_order() {
        let controller = SessionController::new(deck(&[0; 12]), ShufflePolicy::Shuffled);
        let first = controller.state().order().to_vec();

        // 12! orders; five identical redraws in a row will not happen.
        let changed = (0..5).any(|_| {
            controller.reset_session();
            controller.state().order() != first.as_slice()
        });
        assert!(changed);
    }

    #[test]
    fn test_fixed_reset_keeps_identity_order() {
        let controller = SessionController::new(deck(&[0; 5]), ShufflePolicy::Fixed);
        controller.reset_session();
        assert_eq!(controller.state().order(), &[0, 1, 2, 3, 4]);
    }
}
