//! Protocol messages for client-server communication.
//!
//! All messages are serialized as JSON over WebSocket.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{AnswerOutcome, CardView, Completion, ScoreReport};
use crate::error::SessionError;
use crate::models::{Correctness, QuestionView, Snapshot};

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Open a new session, optionally labelled with a player name.
    Start {
        #[serde(default)]
        username: Option<String>,
    },

    /// Reattach to an existing session.
    Resume { session_id: Uuid },

    /// Fetch the question at the cursor.
    GetCurrent,

    /// Answer the question at the cursor.
    SubmitAnswer { selection: usize },

    /// Move to the next question.
    Advance,

    /// Move to the previous question.
    Retreat,

    /// Start the deck over.
    Reset,

    /// End the session and discard it.
    Leave,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Session is ready; keep the id to resume later.
    SessionStarted { session_id: Uuid, deck_length: usize },

    /// Question at the cursor plus progress.
    Card {
        question: QuestionView,
        snapshot: Snapshot,
    },

    /// Verdict for a submission, with the correct choice revealed.
    AnswerResult {
        correctness: Correctness,
        correct_choice: usize,
        explanation: Option<String>,
        snapshot: Snapshot,
    },

    /// Advanced past the last question.
    Completed {
        report: ScoreReport,
        deck_length: usize,
    },

    /// Tried to move before the first question.
    Boundary { snapshot: Snapshot },

    /// Session was discarded after a `Leave`.
    SessionClosed,

    /// Request rejected; session state is unchanged.
    Error { kind: ErrorKind, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidChoice,
    AlreadyAnswered,
    SessionNotFound,
    NoSession,
    InvalidUsername,
    BadRequest,
}

impl ServerMessage {
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            kind,
            message: message.into(),
        }
    }
}

impl From<CardView> for ServerMessage {
    fn from(card: CardView) -> Self {
        ServerMessage::Card {
            question: card.question,
            snapshot: card.snapshot,
        }
    }
}

impl From<AnswerOutcome> for ServerMessage {
    fn from(outcome: AnswerOutcome) -> Self {
        ServerMessage::AnswerResult {
            correctness: outcome.correctness,
            correct_choice: outcome.correct_choice,
            explanation: outcome.explanation,
            snapshot: outcome.snapshot,
        }
    }
}

impl From<Completion> for ServerMessage {
    fn from(completion: Completion) -> Self {
        ServerMessage::Completed {
            report: completion.report,
            deck_length: completion.deck_length,
        }
    }
}

impl From<SessionError> for ServerMessage {
    fn from(err: SessionError) -> Self {
        let kind = match err {
            SessionError::InvalidChoice { .. } => ErrorKind::InvalidChoice,
            SessionError::AlreadyAnswered { .. } => ErrorKind::AlreadyAnswered,
            SessionError::SessionNotFound(_) => ErrorKind::SessionNotFound,
        };
        ServerMessage::error(kind, err.to_string())
    }
}

/// Username validation constants.
pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 16;

/// Default server port.
pub const DEFAULT_PORT: u16 = 8712;

/// Validates a username according to the rules.
///
/// Returns `Ok(())` if valid, or `Err` with an error message.
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let trimmed = username.trim();

    if trimmed.chars().count() < USERNAME_MIN_LENGTH {
        return Err("Username must be at least 3 characters");
    }

    if trimmed.chars().count() > USERNAME_MAX_LENGTH {
        return Err("Username must be at most 16 characters");
    }

    Ok(())
}
