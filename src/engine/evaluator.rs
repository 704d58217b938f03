use crate::error::SessionError;
use crate::models::{Correctness, Question};

/// Judge `selection` against the question's correct choice.
///
/// An out-of-range selection is a caller error, distinct from a wrong answer.
pub fn evaluate(question: &Question, selection: usize) -> Result<Correctness, SessionError> {
    let choices = question.choices().len();
    if selection >= choices {
        return Err(SessionError::InvalidChoice { selection, choices });
    }

    if selection == question.correct_choice() {
        Ok(Correctness::Correct)
    } else {
        Ok(Correctness::Incorrect)
    }
}
