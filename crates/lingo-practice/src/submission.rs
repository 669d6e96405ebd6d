use chrono::{DateTime, Utc};
use lingo_srs::{OutputModality, Quality, ReviewOutcome};
use serde::Deserialize;

use crate::{error::PracticeError, grading::grade_answer};

/// A practice result as submitted by the learner's client.
#[derive(Debug, Clone, Deserialize)]
pub struct PracticeSubmission {
    /// What the learner typed, or the transcript of what they said.
    pub answer: String,
    pub expected: String,
    pub modality: OutputModality,
    pub submitted_at: DateTime<Utc>,
    /// Grade supplied by an external reviewer (for example AI feedback on a
    /// spoken sentence). Takes precedence over answer comparison.
    #[serde(default)]
    pub score: Option<f64>,
}

impl PracticeSubmission {
    pub fn quality(&self) -> Result<Quality, PracticeError> {
        match self.score {
            Some(score) => Ok(Quality::try_from(score)?),
            None => grade_answer(&self.answer, &self.expected),
        }
    }

    /// Turn the submission into the review outcome to append to the log.
    pub fn into_outcome(self) -> Result<ReviewOutcome, PracticeError> {
        let quality = self.quality()?;
        tracing::debug!(
            modality = ?self.modality,
            quality = quality.as_f64(),
            scored_externally = self.score.is_some(),
            "Graded practice submission"
        );
        Ok(ReviewOutcome::new(quality, self.modality, self.submitted_at))
    }
}
