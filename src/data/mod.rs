mod deck;
mod loader;

pub use deck::{Composition, DeckFilter, QuestionDeck};
pub use loader::{builtin_deck, load_deck_from_json};
