use thiserror::Error;

use crate::state::SchedulingState;

/// Errors raised when input to the scheduler breaks its preconditions.
///
/// The fold itself never fails; these are produced while validating data
/// before it reaches the scheduler (review grades, restored states, logs and
/// tuning parameters).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    /// A grade outside `{0, 0.5, 1}`.
    #[error("Invalid quality grade: {0} (expected 0, 0.5 or 1)")]
    InvalidQuality(f64),
    /// A persisted state breaking one of the state invariants.
    #[error("Invalid scheduling state: {field} = {value}")]
    InvalidState { field: &'static str, value: String },
    /// A review log entry earlier than the entry before it.
    #[error("Review at index {index} is older than the review before it")]
    OutOfOrder { index: usize },
    /// Tuning parameters outside their legal range.
    #[error("Invalid scheduler parameters: {0}")]
    InvalidParams(String),
}

/// A cached scheduling state that disagrees with the state replayed from the
/// review log. The replayed state is authoritative.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "Cached scheduling state diverges from review log (cached next review {}, replayed {})",
    .cached.next_review(),
    .replayed.next_review()
)]
pub struct IntegrityMismatch {
    /// The state read from storage.
    pub cached: SchedulingState,
    /// The state implied by the review log; write this back.
    pub replayed: SchedulingState,
}
