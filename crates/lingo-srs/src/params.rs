use serde::{Deserialize, Serialize};

use crate::{error::SchedulerError, quality::OutputModality};

/// Largest allowed `max_interval_days` (100 years).
pub const MAX_INTERVAL_DAYS_LIMIT: u32 = 36_500;

/// Tunable weights for the stability update.
///
/// The defaults are uncalibrated placeholders; they only need to keep partial
/// credit at or below full credit and spoken output at or above typed output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerParams {
    /// Stability added by a fully correct typed review.
    pub stability_gain: f64,
    /// Multiplier on `stability_gain` for spoken answers.
    pub spoken_weight: f64,
    /// Multiplier on `stability_gain` for typed answers and flashcard reviews.
    pub typed_weight: f64,
    /// Factor applied to stability on a partially correct review. Must be in `(0, 1]`.
    pub partial_damping: f64,
    /// Upper bound on the interval, in days. At most [`MAX_INTERVAL_DAYS_LIMIT`].
    pub max_interval_days: u32,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            stability_gain: 0.5,
            spoken_weight: 1.2,
            typed_weight: 1.0,
            partial_damping: 0.8,
            max_interval_days: MAX_INTERVAL_DAYS_LIMIT,
        }
    }
}

impl SchedulerParams {
    /// Check every parameter against its legal range.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or [`SchedulerError::InvalidParams`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if !self.stability_gain.is_finite() || self.stability_gain < 0.0 {
            return Err(SchedulerError::InvalidParams(format!(
                "stability_gain must be a non-negative number, got {}",
                self.stability_gain
            )));
        }
        if !self.typed_weight.is_finite() || self.typed_weight <= 0.0 {
            return Err(SchedulerError::InvalidParams(format!(
                "typed_weight must be positive, got {}",
                self.typed_weight
            )));
        }
        if !self.spoken_weight.is_finite() || self.spoken_weight < self.typed_weight {
            return Err(SchedulerError::InvalidParams(format!(
                "spoken_weight ({}) must be at least typed_weight ({})",
                self.spoken_weight, self.typed_weight
            )));
        }
        if !(self.partial_damping > 0.0 && self.partial_damping <= 1.0) {
            return Err(SchedulerError::InvalidParams(format!(
                "partial_damping must be in (0, 1], got {}",
                self.partial_damping
            )));
        }
        if !(1..=MAX_INTERVAL_DAYS_LIMIT).contains(&self.max_interval_days) {
            return Err(SchedulerError::InvalidParams(format!(
                "max_interval_days must be in 1..={MAX_INTERVAL_DAYS_LIMIT}, got {}",
                self.max_interval_days
            )));
        }
        Ok(())
    }

    /// Multiplier applied to `stability_gain` for a correct answer given in
    /// `modality`. Flashcard reviews weigh the same as typed answers.
    pub const fn modality_weight(&self, modality: OutputModality) -> f64 {
        match modality {
            OutputModality::Spoken => self.spoken_weight,
            OutputModality::Typed | OutputModality::Flashcard => self.typed_weight,
        }
    }
}
