use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

pub const INITIAL_EASE_FACTOR: f64 = 2.5;
/// Ease factor never drops below this.
pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const INITIAL_INTERVAL_DAYS: u32 = 1;
pub const INITIAL_STABILITY: f64 = 1.0;
pub const INITIAL_DIFFICULTY: f64 = 0.3;
pub const MIN_DIFFICULTY: f64 = 0.0;
pub const MAX_DIFFICULTY: f64 = 1.0;

/// Scheduling data for one user and one item.
///
/// This is a cache of replaying the item's review log; outside this crate it
/// is read-only. Use [`Scheduler::fold`](crate::Scheduler::fold) to advance it,
/// or [`SchedulingState::restore`] to load a persisted copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StateParts", into = "StateParts")]
pub struct SchedulingState {
    pub(crate) ease_factor: f64,
    pub(crate) interval: u32,
    pub(crate) repetitions: u32,
    pub(crate) stability: f64,
    pub(crate) difficulty: f64,
    pub(crate) next_review: DateTime<Utc>,
    pub(crate) last_review: Option<DateTime<Utc>>,
}

/// Plain field-by-field form of a [`SchedulingState`], as read from or written
/// to storage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateParts {
    pub ease_factor: f64,
    /// Days until the next review.
    pub interval: u32,
    pub repetitions: u32,
    pub stability: f64,
    pub difficulty: f64,
    pub next_review: DateTime<Utc>,
    pub last_review: Option<DateTime<Utc>>,
}

impl SchedulingState {
    /// State for an item the user has never reviewed. It is due immediately.
    pub const fn initial(now: DateTime<Utc>) -> Self {
        Self {
            ease_factor: INITIAL_EASE_FACTOR,
            interval: INITIAL_INTERVAL_DAYS,
            repetitions: 0,
            stability: INITIAL_STABILITY,
            difficulty: INITIAL_DIFFICULTY,
            next_review: now,
            last_review: None,
        }
    }

    /// Rebuild a state from persisted parts, checking its invariants.
    ///
    /// # Arguments
    ///
    /// * `parts` - The fields as read from storage
    ///
    /// # Returns
    ///
    /// The state, or [`SchedulerError::InvalidState`] naming the first field
    /// that breaks an invariant (ease below 1.3, zero interval, negative
    /// stability, difficulty outside `[0, 1]`, last review after next review).
    pub fn restore(parts: StateParts) -> Result<Self, SchedulerError> {
        if !parts.ease_factor.is_finite() || parts.ease_factor < MIN_EASE_FACTOR {
            return Err(invalid("ease_factor", parts.ease_factor));
        }
        if parts.interval == 0 {
            return Err(invalid("interval", parts.interval));
        }
        if !parts.stability.is_finite() || parts.stability < 0.0 {
            return Err(invalid("stability", parts.stability));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&parts.difficulty) {
            return Err(invalid("difficulty", parts.difficulty));
        }
        if let Some(last_review) = parts.last_review {
            if last_review > parts.next_review {
                return Err(invalid("last_review", last_review));
            }
        }

        Ok(Self {
            ease_factor: parts.ease_factor,
            interval: parts.interval,
            repetitions: parts.repetitions,
            stability: parts.stability,
            difficulty: parts.difficulty,
            next_review: parts.next_review,
            last_review: parts.last_review,
        })
    }

    pub const fn into_parts(self) -> StateParts {
        StateParts {
            ease_factor: self.ease_factor,
            interval: self.interval,
            repetitions: self.repetitions,
            stability: self.stability,
            difficulty: self.difficulty,
            next_review: self.next_review,
            last_review: self.last_review,
        }
    }

    pub const fn ease_factor(&self) -> f64 {
        self.ease_factor
    }

    /// Days between the last review and the next one.
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Consecutive successful reviews since the last failure.
    pub const fn repetitions(&self) -> u32 {
        self.repetitions
    }

    pub const fn stability(&self) -> f64 {
        self.stability
    }

    pub const fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub const fn next_review(&self) -> DateTime<Utc> {
        self.next_review
    }

    pub const fn last_review(&self) -> Option<DateTime<Utc>> {
        self.last_review
    }

    /// Whether the item should be presented at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_review
    }

    /// How long the item has been due for, or `None` if it is not due yet.
    pub fn overdue_by(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.is_due(now).then(|| now - self.next_review)
    }

    /// Compare with another state, allowing for float noise introduced by
    /// storage round-trips.
    pub fn approx_eq(&self, other: &Self) -> bool {
        const EPSILON: f64 = 1e-9;
        let close = |a: f64, b: f64| (a - b).abs() <= EPSILON;

        close(self.ease_factor, other.ease_factor)
            && self.interval == other.interval
            && self.repetitions == other.repetitions
            && close(self.stability, other.stability)
            && close(self.difficulty, other.difficulty)
            && self.next_review == other.next_review
            && self.last_review == other.last_review
    }
}

fn invalid(field: &'static str, value: impl ToString) -> SchedulerError {
    SchedulerError::InvalidState {
        field,
        value: value.to_string(),
    }
}

impl TryFrom<StateParts> for SchedulingState {
    type Error = SchedulerError;

    fn try_from(parts: StateParts) -> Result<Self, Self::Error> {
        Self::restore(parts)
    }
}

impl From<SchedulingState> for StateParts {
    fn from(state: SchedulingState) -> Self {
        state.into_parts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn valid_parts() -> StateParts {
        StateParts {
            ease_factor: 2.36,
            interval: 6,
            repetitions: 2,
            stability: 1.4,
            difficulty: 0.3,
            next_review: now() + Duration::days(6),
            last_review: Some(now()),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = SchedulingState::initial(now());
        assert_eq!(state.ease_factor(), 2.5);
        assert_eq!(state.interval(), 1);
        assert_eq!(state.repetitions(), 0);
        assert_eq!(state.stability(), 1.0);
        assert_eq!(state.difficulty(), 0.3);
        assert_eq!(state.next_review(), now());
        assert_eq!(state.last_review(), None);
    }

    #[test]
    fn test_is_due_boundary() {
        let state = SchedulingState::initial(now());
        assert!(state.is_due(now()));
        assert!(state.is_due(now() + Duration::seconds(1)));
        assert!(!state.is_due(now() - Duration::milliseconds(1)));
    }

    #[test]
    fn test_overdue_by() {
        let state = SchedulingState::initial(now());
        assert_eq!(state.overdue_by(now()), Some(Duration::zero()));
        assert_eq!(
            state.overdue_by(now() + Duration::hours(5)),
            Some(Duration::hours(5))
        );
        assert_eq!(state.overdue_by(now() - Duration::hours(1)), None);
    }

    #[test]
    fn test_restore_round_trip() {
        let state = SchedulingState::restore(valid_parts()).unwrap();
        assert_eq!(state.into_parts(), valid_parts());
    }

    #[test]
    fn test_restore_rejects_broken_invariants() {
        let cases: Vec<(&str, StateParts)> = vec![
            (
                "ease_factor",
                StateParts {
                    ease_factor: 1.2,
                    ..valid_parts()
                },
            ),
            (
                "ease_factor",
                StateParts {
                    ease_factor: f64::NAN,
                    ..valid_parts()
                },
            ),
            (
                "interval",
                StateParts {
                    interval: 0,
                    ..valid_parts()
                },
            ),
            (
                "stability",
                StateParts {
                    stability: -0.1,
                    ..valid_parts()
                },
            ),
            (
                "difficulty",
                StateParts {
                    difficulty: 1.5,
                    ..valid_parts()
                },
            ),
            (
                "last_review",
                StateParts {
                    last_review: Some(now() + Duration::days(7)),
                    ..valid_parts()
                },
            ),
        ];

        for (field, parts) in cases {
            match SchedulingState::restore(parts) {
                Err(SchedulerError::InvalidState { field: got, .. }) => assert_eq!(got, field),
                other => panic!("expected {field} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let json = serde_json::to_string(&valid_parts()).unwrap();
        let state: SchedulingState = serde_json::from_str(&json).unwrap();
        assert_eq!(state.interval(), 6);

        let broken = json.replace("\"interval\":6", "\"interval\":0");
        assert!(serde_json::from_str::<SchedulingState>(&broken).is_err());
    }

    #[test]
    fn test_approx_eq_tolerates_float_noise() {
        let state = SchedulingState::restore(valid_parts()).unwrap();
        let noisy = SchedulingState::restore(StateParts {
            ease_factor: 2.36 + 1e-12,
            ..valid_parts()
        })
        .unwrap();
        assert!(state.approx_eq(&noisy));

        let moved = SchedulingState::restore(StateParts {
            interval: 7,
            ..valid_parts()
        })
        .unwrap();
        assert!(!state.approx_eq(&moved));
    }
}
