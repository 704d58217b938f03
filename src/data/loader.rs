use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::models::Question;

use super::deck::QuestionDeck;

const BUILTIN_QUESTIONS: &str = include_str!("../../questions.json");
const BUILTIN_QUESTIONS_PATH: &str = "<built-in questions.json>";

/// Deck bundled with the binary, used when no file is given.
pub fn builtin_deck() -> Result<QuestionDeck, LoadError> {
    parse_deck(BUILTIN_QUESTIONS, Path::new(BUILTIN_QUESTIONS_PATH))
}

/// Load and validate a deck from a JSON array of questions.
pub fn load_deck_from_json<P: AsRef<Path>>(path: P) -> Result<QuestionDeck, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_deck(&json_content, path)
}

fn parse_deck(json_content: &str, path: &Path) -> Result<QuestionDeck, LoadError> {
    let questions: Vec<Question> =
        serde_json::from_str(json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(QuestionDeck::new(questions)?)
}
