use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::SchedulerError,
    quality::{OutputModality, Quality},
};

/// One practice event. Review logs are append-only sequences of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    quality: Quality,
    modality: OutputModality,
    reviewed_at: DateTime<Utc>,
}

impl ReviewOutcome {
    /// Record a review.
    ///
    /// # Arguments
    ///
    /// * `quality` - How well the item was recalled
    /// * `modality` - How the answer was produced
    /// * `reviewed_at` - When the review happened; the caller supplies the clock
    pub const fn new(quality: Quality, modality: OutputModality, reviewed_at: DateTime<Utc>) -> Self {
        Self {
            quality,
            modality,
            reviewed_at,
        }
    }

    /// Build an outcome from a raw numeric grade, rejecting anything outside
    /// `{0, 0.5, 1}`.
    pub fn try_new(
        quality: f64,
        modality: OutputModality,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Self, SchedulerError> {
        Ok(Self::new(Quality::try_from(quality)?, modality, reviewed_at))
    }

    /// The grade of this review.
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    /// How the answer was produced.
    pub const fn modality(&self) -> OutputModality {
        self.modality
    }

    /// When the review happened.
    pub const fn reviewed_at(&self) -> DateTime<Utc> {
        self.reviewed_at
    }
}

/// Chronologically ordered, append-only review history for one user and item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ReviewOutcome>", into = "Vec<ReviewOutcome>")]
pub struct ReviewLog {
    outcomes: Vec<ReviewOutcome>,
}

impl ReviewLog {
    /// An empty history, for an item never reviewed.
    pub const fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Append an outcome. Outcomes sharing a timestamp with the last entry are
    /// accepted; earlier ones are not.
    ///
    /// # Returns
    ///
    /// [`SchedulerError::OutOfOrder`] with the index the outcome would have
    /// taken if it is older than the last entry.
    pub fn push(&mut self, outcome: ReviewOutcome) -> Result<(), SchedulerError> {
        if let Some(last) = self.outcomes.last() {
            if outcome.reviewed_at < last.reviewed_at {
                return Err(SchedulerError::OutOfOrder {
                    index: self.outcomes.len(),
                });
            }
        }
        self.outcomes.push(outcome);
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReviewOutcome> {
        self.outcomes.iter()
    }

    pub fn as_slice(&self) -> &[ReviewOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn first(&self) -> Option<&ReviewOutcome> {
        self.outcomes.first()
    }

    pub fn last(&self) -> Option<&ReviewOutcome> {
        self.outcomes.last()
    }
}

impl TryFrom<Vec<ReviewOutcome>> for ReviewLog {
    type Error = SchedulerError;

    fn try_from(outcomes: Vec<ReviewOutcome>) -> Result<Self, Self::Error> {
        if let Some(index) = outcomes
            .windows(2)
            .position(|pair| pair[1].reviewed_at < pair[0].reviewed_at)
        {
            return Err(SchedulerError::OutOfOrder { index: index + 1 });
        }
        Ok(Self { outcomes })
    }
}

impl From<ReviewLog> for Vec<ReviewOutcome> {
    fn from(log: ReviewLog) -> Self {
        log.outcomes
    }
}

impl<'a> IntoIterator for &'a ReviewLog {
    type Item = &'a ReviewOutcome;
    type IntoIter = std::slice::Iter<'a, ReviewOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
