use serde::{Deserialize, Serialize};

use crate::models::{SessionState, Snapshot};

/// Points awarded for each correct answer.
pub const POINTS_PER_CORRECT: usize = 10;

/// Accuracy as a whole percentage, rounded to nearest with halves going up.
///
/// Integer arithmetic keeps equal fractions rendering identically.
pub fn accuracy_percent(score: usize, answered: usize) -> u32 {
    if answered == 0 {
        return 0;
    }
    ((200 * score + answered) / (2 * answered)) as u32
}

/// Derived scoring figures for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: usize,
    pub answered: usize,
    pub accuracy: u32,
    pub points: usize,
    pub current_streak: usize,
    pub best_streak: usize,
}

impl ScoreReport {
    pub fn of(state: &SessionState) -> Self {
        Self {
            score: state.score(),
            answered: state.answered(),
            accuracy: accuracy_percent(state.score(), state.answered()),
            points: state.score() * POINTS_PER_CORRECT,
            current_streak: state.current_streak(),
            best_streak: state.best_streak(),
        }
    }
}

pub fn snapshot(state: &SessionState) -> Snapshot {
    Snapshot {
        position: state.cursor() + 1,
        score: state.score(),
        answered: state.answered(),
        accuracy: accuracy_percent(state.score(), state.answered()),
        deck_length: state.len(),
    }
}
