//! Per-session progress record.

use serde::{Deserialize, Serialize};

/// Verdict for a submitted choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correctness {
    Correct,
    Incorrect,
}

impl Correctness {
    pub fn is_correct(self) -> bool {
        matches!(self, Correctness::Correct)
    }
}

/// Answer record for one deck position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Unanswered,
    Answered {
        selection: usize,
        correctness: Correctness,
    },
}

impl Slot {
    pub fn is_answered(&self) -> bool {
        matches!(self, Slot::Answered { .. })
    }

    pub fn is_correct(&self) -> bool {
        matches!(
            self,
            Slot::Answered {
                correctness: Correctness::Correct,
                ..
            }
        )
    }
}

/// Mutable progress of a single player through a deck.
///
/// `order[position]` is the deck index shown at that position and `slots`
/// shares the same position space. Both are sized once when the session
/// starts and never grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) cursor: usize,
    pub(crate) score: usize,
    pub(crate) answered: usize,
    pub(crate) current_streak: usize,
    pub(crate) best_streak: usize,
    pub(crate) order: Vec<usize>,
    pub(crate) slots: Vec<Slot>,
}

impl SessionState {
    /// Fresh state for the given presentation order.
    pub fn new(order: Vec<usize>) -> Self {
        let len = order.len();
        Self {
            cursor: 0,
            score: 0,
            answered: 0,
            current_streak: 0,
            best_streak: 0,
            order,
            slots: vec![Slot::Unanswered; len],
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    pub fn current_streak(&self) -> usize {
        self.current_streak
    }

    pub fn best_streak(&self) -> usize {
        self.best_streak
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn current_slot(&self) -> Slot {
        self.slots[self.cursor]
    }

    /// Deck index of the question at the cursor.
    pub fn current_deck_index(&self) -> usize {
        self.order[self.cursor]
    }

    /// Whether the counters agree with the slot array.
    pub fn is_consistent(&self) -> bool {
        let correct = self.slots.iter().filter(|s| s.is_correct()).count();
        let answered = self.slots.iter().filter(|s| s.is_answered()).count();
        self.score == correct
            && self.answered == answered
            && self.cursor < self.slots.len()
            && self.order.len() == self.slots.len()
    }

    /// Record a verdict at the cursor. Callers check the slot is open first.
    pub(crate) fn record(&mut self, selection: usize, correctness: Correctness) {
        debug_assert!(!self.slots[self.cursor].is_answered());

        self.slots[self.cursor] = Slot::Answered {
            selection,
            correctness,
        };
        self.answered += 1;

        if correctness.is_correct() {
            self.score += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
    }
}

/// Progress summary sent alongside every question view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 1-based position for display.
    pub position: usize,
    pub score: usize,
    pub answered: usize,
    pub accuracy: u32,
    pub deck_length: usize,
}
