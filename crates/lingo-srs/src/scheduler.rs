use chrono::{DateTime, Duration, Utc};

use crate::{
    error::{IntegrityMismatch, SchedulerError},
    outcome::{ReviewLog, ReviewOutcome},
    params::SchedulerParams,
    quality::Quality,
    state::{MIN_EASE_FACTOR, SchedulingState},
};

/// Ease lost on a failed review.
pub const FAILURE_EASE_PENALTY: f64 = 0.2;
/// Interval after a failure and after the first success.
pub const FIRST_INTERVAL_DAYS: u32 = 1;
/// Interval after the second consecutive success.
pub const SECOND_INTERVAL_DAYS: u32 = 6;

/// SM-2 scheduler with three-level grading and modality-weighted stability.
///
/// The scheduler holds only its parameters. Every method is a pure function
/// of its arguments, so one instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scheduler {
    params: SchedulerParams,
}

impl Scheduler {
    /// Create a scheduler with custom tuning.
    ///
    /// # Arguments
    ///
    /// * `params` - Stability weights and interval cap
    ///
    /// # Returns
    ///
    /// The scheduler, or [`SchedulerError::InvalidParams`] if any parameter is
    /// outside its legal range.
    pub fn new(params: SchedulerParams) -> Result<Self, SchedulerError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The parameters this scheduler was built with.
    pub const fn params(&self) -> &SchedulerParams {
        &self.params
    }

    /// State for an item first seen at `now`.
    ///
    /// # Arguments
    ///
    /// * `now` - When the user first encountered the item
    ///
    /// # Returns
    ///
    /// Ease 2.5, interval 1, no repetitions, stability 1.0, difficulty 0.3,
    /// due at `now` and never reviewed.
    pub const fn initial_state(&self, now: DateTime<Utc>) -> SchedulingState {
        SchedulingState::initial(now)
    }

    /// Apply one review to `state` and return the resulting state.
    ///
    /// # Algorithm
    ///
    /// * Fail: repetitions reset to 0, interval to 1 day, ease drops by 0.2.
    /// * Partial or correct: interval grows 1, 6, then `interval * ease`
    ///   (both taken from `state`), and ease moves by the SM-2 formula on
    ///   the 0-5 grade.
    /// * Stability grows on a correct answer (more for spoken output),
    ///   shrinks on a partial one, and is left alone on a failure.
    ///
    /// The ease factor is floored at 1.3 in every branch.
    ///
    /// # Arguments
    ///
    /// * `state` - The state before the review; left untouched
    /// * `outcome` - The review to apply
    ///
    /// # Returns
    ///
    /// The new state, reviewed at `outcome.reviewed_at()` and due `interval`
    /// days later. A due date past the end of the representable range is
    /// pinned to `DateTime::<Utc>::MAX_UTC`.
    pub fn fold(&self, state: &SchedulingState, outcome: &ReviewOutcome) -> SchedulingState {
        let quality = outcome.quality();

        let (interval, repetitions, ease_factor) = if quality.is_success() {
            let interval = match state.repetitions {
                0 => FIRST_INTERVAL_DAYS,
                1 => SECOND_INTERVAL_DAYS,
                _ => self.grow_interval(state.interval, state.ease_factor),
            };
            (
                interval,
                state.repetitions.saturating_add(1),
                adjust_ease(state.ease_factor, quality.sm2_grade()),
            )
        } else {
            (
                FIRST_INTERVAL_DAYS,
                0,
                (state.ease_factor - FAILURE_EASE_PENALTY).max(MIN_EASE_FACTOR),
            )
        };

        let reviewed_at = outcome.reviewed_at();

        SchedulingState {
            ease_factor,
            interval,
            repetitions,
            stability: self.next_stability(state.stability, outcome),
            difficulty: state.difficulty,
            next_review: reviewed_at
                .checked_add_signed(Duration::days(i64::from(interval)))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            last_review: Some(reviewed_at),
        }
    }

    /// Rebuild the state implied by a review history, starting from an item
    /// first seen at `created_at`. Outcomes must be in chronological order.
    ///
    /// # Arguments
    ///
    /// * `created_at` - When the item was first seen; the due date of an empty history
    /// * `outcomes` - The review history, oldest first
    ///
    /// # Returns
    ///
    /// The same state as folding each outcome in turn onto
    /// [`Scheduler::initial_state`].
    pub fn replay<'a, I>(&self, created_at: DateTime<Utc>, outcomes: I) -> SchedulingState
    where
        I: IntoIterator<Item = &'a ReviewOutcome>,
    {
        outcomes
            .into_iter()
            .fold(self.initial_state(created_at), |state, outcome| {
                self.fold(&state, outcome)
            })
    }

    /// Check a cached state against the one replayed from `log`.
    ///
    /// Returns the replayed state when the two agree; otherwise returns both so
    /// the caller can overwrite the cache with the replayed one.
    ///
    /// # Arguments
    ///
    /// * `created_at` - When the item was first seen
    /// * `log` - The item's full review history
    /// * `cached` - The state loaded from storage
    ///
    /// # Returns
    ///
    /// The replayed state, or an [`IntegrityMismatch`] carrying both states.
    /// Float fields are compared with a small tolerance.
    pub fn verify(
        &self,
        created_at: DateTime<Utc>,
        log: &ReviewLog,
        cached: &SchedulingState,
    ) -> Result<SchedulingState, IntegrityMismatch> {
        let replayed = self.replay(created_at, log);
        if replayed.approx_eq(cached) {
            Ok(replayed)
        } else {
            Err(IntegrityMismatch {
                cached: *cached,
                replayed,
            })
        }
    }

    fn grow_interval(&self, interval: u32, ease_factor: f64) -> u32 {
        let days = (f64::from(interval) * ease_factor).round();
        if days >= f64::from(self.params.max_interval_days) {
            self.params.max_interval_days
        } else {
            (days as u32).max(FIRST_INTERVAL_DAYS)
        }
    }

    fn next_stability(&self, stability: f64, outcome: &ReviewOutcome) -> f64 {
        match outcome.quality() {
            Quality::Fail => stability,
            Quality::Partial => stability * self.params.partial_damping,
            Quality::Correct => self
                .params
                .stability_gain
                .mul_add(self.params.modality_weight(outcome.modality()), stability),
        }
    }
}

/// SM-2 ease update: `EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))`.
fn adjust_ease(ease_factor: f64, grade: u8) -> f64 {
    let miss = f64::from(5 - grade.min(5));
    let delta = miss.mul_add(-miss.mul_add(0.02, 0.08), 0.1);
    (ease_factor + delta).max(MIN_EASE_FACTOR)
}
