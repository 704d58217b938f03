//! Immutable, ordered question deck.

use std::collections::{BTreeMap, HashSet};
use std::ops::Index;

use crate::error::DeckError;
use crate::models::{Category, Difficulty, Question};

/// Startup filter applied when building the deck a server hands out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckFilter {
    /// Keep only these categories. Empty means every category.
    pub categories: Vec<Category>,
    pub difficulty: Option<Difficulty>,
    pub limit: Option<usize>,
}

impl DeckFilter {
    fn matches(&self, question: &Question) -> bool {
        (self.categories.is_empty() || self.categories.contains(&question.category()))
            && self.difficulty.is_none_or(|d| d == question.difficulty())
    }
}

/// Number of questions per category and per difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    pub by_category: BTreeMap<Category, usize>,
    pub by_difficulty: BTreeMap<Difficulty, usize>,
}

/// A non-empty, fixed sequence of questions. No mutation API exists once
/// it is built, so indices stay stable for its whole lifetime.
#[derive(Debug, Clone)]
pub struct QuestionDeck {
    questions: Vec<Question>,
}

impl QuestionDeck {
    /// Build a deck, rejecting empty input and duplicate ids.
    pub fn new(questions: Vec<Question>) -> Result<Self, DeckError> {
        if questions.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(DeckError::DuplicateId(question.id().to_string()));
            }
        }

        Ok(Self { questions })
    }

    pub fn at(&self, index: usize) -> Result<&Question, DeckError> {
        self.questions.get(index).ok_or(DeckError::OutOfRange {
            index,
            len: self.questions.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// New deck holding the questions that pass `filter`, in deck order.
    pub fn filtered(&self, filter: &DeckFilter) -> Result<Self, DeckError> {
        let limit = filter.limit.unwrap_or(usize::MAX);
        let questions = self
            .questions
            .iter()
            .filter(|q| filter.matches(q))
            .take(limit)
            .cloned()
            .collect();
        Self::new(questions)
    }

    pub fn composition(&self) -> Composition {
        let mut composition = Composition::default();
        for question in &self.questions {
            *composition.by_category.entry(question.category()).or_default() += 1;
            *composition
                .by_difficulty
                .entry(question.difficulty())
                .or_default() += 1;
        }
        composition
    }
}

impl Index<usize> for QuestionDeck {
    type Output = Question;

    fn index(&self, index: usize) -> &Question {
        &self.questions[index]
    }
}
