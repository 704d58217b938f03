//! Runtime configuration for the server and the terminal client.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::data::{DeckFilter, QuestionDeck, builtin_deck, load_deck_from_json};
use crate::engine::{DEFAULT_SESSION_TTL, ShufflePolicy};
use crate::error::QuizError;
use crate::protocol::DEFAULT_PORT;

/// How often the server sweeps idle sessions.
pub const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Deck file. `None` uses the built-in questions.
    pub questions: Option<PathBuf>,
    pub shuffle: ShufflePolicy,
    pub filter: DeckFilter,
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            questions: None,
            shuffle: ShufflePolicy::default(),
            filter: DeckFilter::default(),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Load the configured deck and apply the startup filter.
    pub fn build_deck(&self) -> Result<QuestionDeck, QuizError> {
        let deck = match &self.questions {
            Some(path) => load_deck_from_json(path)?,
            None => builtin_deck()?,
        };

        if self.filter == DeckFilter::default() {
            return Ok(deck);
        }

        let filtered = deck.filtered(&self.filter)?;
        info!(
            before = deck.len(),
            after = filtered.len(),
            "applied deck filter"
        );
        Ok(filtered)
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        if self.session_ttl.is_zero() {
            return Err(QuizError::Config(
                "session TTL must be greater than zero".to_string(),
            ));
        }
        if self.filter.limit == Some(0) {
            return Err(QuizError::Config("question limit must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
}

impl ClientConfig {
    pub fn url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Difficulty};

    #[test]
    fn test_default_config_uses_builtin_deck() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        let deck = config.build_deck().unwrap();
        assert_eq!(deck.len(), builtin_deck().unwrap().len());
    }

    #[test]
    fn test_filtered_deck() {
        let config = ServerConfig {
            filter: DeckFilter {
                categories: vec![Category::Advanced],
                difficulty: Some(Difficulty::Hard),
                limit: None,
            },
            ..Default::default()
        };
        let deck = config.build_deck().unwrap();
        assert!(deck.iter().all(|q| q.category() == Category::Advanced));
    }

    #[test]
    fn test_filter_matching_nothing_fails() {
        let config = ServerConfig {
            filter: DeckFilter {
                categories: vec![Category::Libraries],
                difficulty: Some(Difficulty::Hard),
                limit: None,
            },
            ..Default::default()
        };
        assert!(matches!(config.build_deck(), Err(QuizError::Deck(_))));
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = ServerConfig {
            session_ttl: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(QuizError::Config(_))));
    }
}
