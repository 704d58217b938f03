use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// Minimum number of answer choices a question must offer.
pub const MIN_CHOICES: usize = 2;

/// Topic a question belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Category {
    #[serde(alias = "basics")]
    #[value(alias = "basics")]
    Fundamentals,
    #[value(alias = "data-structures")]
    DataStructures,
    Functions,
    #[serde(alias = "object_oriented_programming")]
    #[value(aliases = ["object-orientation", "object_oriented_programming"])]
    ObjectOrientation,
    Libraries,
    Advanced,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Fundamentals,
        Category::DataStructures,
        Category::Functions,
        Category::ObjectOrientation,
        Category::Libraries,
        Category::Advanced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Fundamentals => "Fundamentals",
            Category::DataStructures => "Data Structures",
            Category::Functions => "Functions",
            Category::ObjectOrientation => "Object Orientation",
            Category::Libraries => "Libraries",
            Category::Advanced => "Advanced",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Question record as it appears in a deck file, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    pub id: String,
    pub prompt: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub choices: Vec<String>,
    pub correct_choice: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A single validated quiz item.
///
/// Fields are private: once built, a question is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    id: String,
    prompt: String,
    category: Category,
    difficulty: Difficulty,
    choices: Vec<String>,
    correct_choice: usize,
    explanation: Option<String>,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
        choices: Vec<String>,
        correct_choice: usize,
        explanation: Option<String>,
    ) -> Result<Self, DeckError> {
        let id = id.into();
        let prompt = prompt.into();

        if id.trim().is_empty() {
            return Err(DeckError::InvalidQuestion {
                id,
                reason: "id must not be empty".to_string(),
            });
        }
        if prompt.trim().is_empty() {
            return Err(DeckError::InvalidQuestion {
                id,
                reason: "prompt must not be empty".to_string(),
            });
        }
        if choices.len() < MIN_CHOICES {
            return Err(DeckError::InvalidQuestion {
                id,
                reason: format!(
                    "needs at least {} choices, found {}",
                    MIN_CHOICES,
                    choices.len()
                ),
            });
        }
        if correct_choice >= choices.len() {
            return Err(DeckError::InvalidQuestion {
                id,
                reason: format!(
                    "correct choice {} is outside {} choices",
                    correct_choice,
                    choices.len()
                ),
            });
        }

        Ok(Self {
            id,
            prompt,
            category,
            difficulty,
            choices,
            correct_choice,
            explanation,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn correct_choice(&self) -> usize {
        self.correct_choice
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = DeckError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        Question::new(
            raw.id,
            raw.prompt,
            raw.category,
            raw.difficulty,
            raw.choices,
            raw.correct_choice,
            raw.explanation,
        )
    }
}

/// Answer details disclosed for a slot that has already been answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub selected: usize,
    pub correct: bool,
    pub correct_choice: usize,
    pub explanation: Option<String>,
}

/// What a client is allowed to see of a question.
///
/// `reveal` is only populated once the slot has been answered, so the
/// correct choice of an open question never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: String,
    pub prompt: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub choices: Vec<String>,
    pub reveal: Option<Reveal>,
}

impl QuestionView {
    pub fn hidden(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            prompt: question.prompt.clone(),
            category: question.category,
            difficulty: question.difficulty,
            choices: question.choices.clone(),
            reveal: None,
        }
    }

    pub fn revealed(question: &Question, selected: usize, correct: bool) -> Self {
        Self {
            reveal: Some(Reveal {
                selected,
                correct,
                correct_choice: question.correct_choice,
                explanation: question.explanation.clone(),
            }),
            ..Self::hidden(question)
        }
    }
}
