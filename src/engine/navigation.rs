//! Cursor movement with bounds enforcement.
//!
//! Navigation only touches the cursor; slots and score are left alone, so
//! revisiting a question can never change the tally.

use serde::{Deserialize, Serialize};

use crate::models::SessionState;

/// Which end of the deck a move ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Start,
    End,
}

/// Outcome of a navigation step. Hitting an edge is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(usize),
    Boundary(Edge),
}

pub fn advance(state: &mut SessionState) -> Step {
    let next = state.cursor + 1;
    if next < state.len() {
        state.cursor = next;
        Step::Moved(next)
    } else {
        Step::Boundary(Edge::End)
    }
}

pub fn retreat(state: &mut SessionState) -> Step {
    if state.cursor > 0 {
        state.cursor -= 1;
        Step::Moved(state.cursor)
    } else {
        Step::Boundary(Edge::Start)
    }
}
