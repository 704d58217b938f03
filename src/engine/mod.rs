//! Quiz session engine: evaluation, navigation, scoring and the session
//! state machine built on top of them.

mod controller;
mod evaluator;
mod navigation;
mod registry;
mod score;

pub use controller::{
    Advance, AnswerOutcome, CardView, Completion, Retreat, SessionController, ShufflePolicy,
};
pub use evaluator::evaluate;
pub use navigation::{Edge, Step};
pub use registry::{DEFAULT_SESSION_TTL, SessionRegistry};
pub use score::{POINTS_PER_CORRECT, ScoreReport, accuracy_percent};
