//! SRS (Spaced Repetition System) scheduling engine for Lingo
//!
//! This crate decides when each learning item should next be presented to a
//! user and how every practice outcome changes the item's memory parameters.
//! It performs no I/O and reads no clock: callers pass timestamps in, persist
//! the returned [`SchedulingState`] and append each [`ReviewOutcome`] to the
//! item's [`ReviewLog`].
//!
//! The cached state is always reproducible from the log with
//! [`Scheduler::replay`], and [`Scheduler::verify`] checks a cache against it.
//!
//! Folds for the same user and item must be serialized by the caller (one
//! read-modify-write transaction per key); different keys are independent.

pub mod error;
pub mod outcome;
pub mod params;
pub mod quality;
pub mod scheduler;
pub mod state;

pub use error::{IntegrityMismatch, SchedulerError};
pub use outcome::{ReviewLog, ReviewOutcome};
pub use params::SchedulerParams;
pub use quality::{OutputModality, Quality};
pub use scheduler::Scheduler;
pub use state::{SchedulingState, StateParts};
