use lingo_srs::Quality;

use crate::{
    error::PracticeError,
    normalization::{edit_distance, normalize_for_comparison},
};

/// One tolerated typo per this many characters of the expected answer.
pub const CHARS_PER_TOLERATED_EDIT: usize = 5;

/// Grade a typed answer or a speech transcript against the expected answer.
///
/// Exact match after normalization is correct. An answer within a small edit
/// distance (one edit per five characters, at least one) earns partial
/// credit. Anything else, including a blank answer, fails.
pub fn grade_answer(answer: &str, expected: &str) -> Result<Quality, PracticeError> {
    let expected = normalize_for_comparison(expected);
    if expected.is_empty() {
        return Err(PracticeError::EmptyExpectedAnswer);
    }

    let answer = normalize_for_comparison(answer);
    if answer.is_empty() {
        return Ok(Quality::Fail);
    }
    if answer == expected {
        return Ok(Quality::Correct);
    }

    let tolerance = (expected.chars().count() / CHARS_PER_TOLERATED_EDIT).max(1);
    if edit_distance(&answer, &expected) <= tolerance {
        Ok(Quality::Partial)
    } else {
        Ok(Quality::Fail)
    }
}
