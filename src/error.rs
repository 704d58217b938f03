//! Error types shared across the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Problems found while building a question deck.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck must contain at least one question")]
    Empty,
    #[error("question {id}: {reason}")]
    InvalidQuestion { id: String, reason: String },
    #[error("duplicate question id: {0}")]
    DuplicateId(String),
    #[error("index {index} is outside a deck of {len} questions")]
    OutOfRange { index: usize, len: usize },
}

/// Errors emitted while loading a deck from disk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Caller errors rejected by a session. None of them mutate state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("choice {selection} is not one of the {choices} available choices")]
    InvalidChoice { selection: usize, choices: usize },
    #[error("question {position} has already been answered")]
    AlreadyAnswered { position: usize },
    #[error("session {0} not found")]
    SessionNotFound(Uuid),
}

/// Top-level error for running the server or client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}
