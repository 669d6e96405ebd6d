use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Grade of a single review.
///
/// Serialized as the plain number (`0`, `0.5` or `1`) so stored review logs
/// stay readable; anything else is rejected on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum Quality {
    /// The item was not recalled.
    Fail,
    /// Recalled with mistakes.
    Partial,
    /// Recalled correctly.
    Correct,
}

/// Lowest grade on the 0-5 scale that counts as a successful review.
pub(crate) const PASSING_GRADE: u8 = 3;

impl Quality {
    /// The grade on the 0-5 scale the ease update is calibrated against.
    pub const fn sm2_grade(self) -> u8 {
        match self {
            Self::Fail => 0,
            Self::Partial => PASSING_GRADE,
            Self::Correct => 5,
        }
    }

    /// Whether the review counts towards the repetition streak (partial or
    /// correct).
    pub const fn is_success(self) -> bool {
        self.sm2_grade() >= PASSING_GRADE
    }

    /// The grade as stored in review logs: `0.0`, `0.5` or `1.0`.
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Fail => 0.0,
            Self::Partial => 0.5,
            Self::Correct => 1.0,
        }
    }
}

impl TryFrom<f64> for Quality {
    type Error = SchedulerError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Self::Fail)
        } else if value == 0.5 {
            Ok(Self::Partial)
        } else if value == 1.0 {
            Ok(Self::Correct)
        } else {
            Err(SchedulerError::InvalidQuality(value))
        }
    }
}

impl From<Quality> for f64 {
    fn from(quality: Quality) -> Self {
        quality.as_f64()
    }
}

/// How the learner produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputModality {
    /// Answer said aloud; strongest evidence of recall.
    Spoken,
    /// Answer typed out.
    Typed,
    /// Flashcard self-review; weighted like typed output.
    Flashcard,
}
