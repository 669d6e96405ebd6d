//! Caller-side helpers around the Lingo scheduler.
//!
//! Turns practice submissions into review outcomes, loads scheduler tuning
//! from the environment, sets up logging and reconciles cached scheduling
//! state against the review log.

pub mod config;
pub mod error;
pub mod grading;
pub mod integrity;
pub mod normalization;
pub mod submission;
pub mod tracing;

pub use config::{Environment, PracticeConfig};
pub use error::PracticeError;
pub use integrity::{ReviewKey, reconcile};
pub use submission::PracticeSubmission;
