mod question;
mod session;

pub use question::{Category, Difficulty, Question, QuestionView, Reveal};
pub use session::{Correctness, SessionState, Slot, Snapshot};
