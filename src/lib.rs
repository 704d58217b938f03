//! # trivia-quiz
//!
//! A single-player trivia quiz served over WebSocket, with a terminal client.
//!
//! The heart of the crate is [`SessionController`]: it walks one player
//! through a fixed [`QuestionDeck`], accepts at most one answer per
//! question, and keeps score. Sessions are looked up by id in a
//! [`SessionRegistry`].
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use trivia_quiz::{Advance, SessionController, ShufflePolicy, builtin_deck};
//!
//! let deck = Arc::new(builtin_deck().expect("built-in deck is valid"));
//! let session = SessionController::new(deck, ShufflePolicy::Fixed);
//!
//! let card = session.get_current();
//! println!("{}", card.question.prompt);
//!
//! let outcome = session.submit_answer(0).expect("first answer is accepted");
//! println!("{:?}, score {}", outcome.correctness, outcome.snapshot.score);
//!
//! if let Advance::Completed(done) = session.advance_card() {
//!     println!("finished with {}%", done.report.accuracy);
//! }
//! ```

pub mod client;
pub mod config;
mod data;
mod engine;
mod error;
mod models;
pub mod protocol;
pub mod server;
pub mod terminal;

pub use config::{ClientConfig, ServerConfig};
pub use data::{Composition, DeckFilter, QuestionDeck, builtin_deck, load_deck_from_json};
pub use engine::{
    Advance, AnswerOutcome, CardView, Completion, DEFAULT_SESSION_TTL, Edge, POINTS_PER_CORRECT,
    Retreat, ScoreReport, SessionController, SessionRegistry, ShufflePolicy, Step,
    accuracy_percent, evaluate,
};
pub use error::{DeckError, LoadError, QuizError, SessionError};
pub use models::{
    Category, Correctness, Difficulty, Question, QuestionView, Reveal, SessionState, Slot,
    Snapshot,
};
