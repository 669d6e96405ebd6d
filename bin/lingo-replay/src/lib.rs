//! Rebuild a scheduling state from a stored review log, optionally checking a
//! cached copy against it.

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use lingo_practice::PracticeConfig;
use lingo_srs::{IntegrityMismatch, ReviewLog, Scheduler, SchedulingState};
use serde::de::DeserializeOwned;

#[derive(Debug, Parser)]
#[command(version, about = "Replay a review log into a scheduling state", long_about = None)]
pub struct Args {
    /// JSON array of review outcomes, oldest first.
    pub log: PathBuf,
    /// Cached scheduling state to check against the log.
    pub cached: Option<PathBuf>,
}

/// Load the files named in `args` and replay them.
///
/// On a cache mismatch the error wraps an [`IntegrityMismatch`], whose
/// `replayed` state is the one to write back.
pub fn run(args: &Args, config: &PracticeConfig) -> anyhow::Result<SchedulingState> {
    let log: ReviewLog = read_json(&args.log)?;
    let cached: Option<SchedulingState> = args.cached.as_deref().map(read_json).transpose()?;

    replay_log(&log, cached.as_ref(), config)
        .with_context(|| format!("failed to replay {}", args.log.display()))
}

/// Replay `log`, anchoring the initial state at its first review, and check
/// `cached` against the result when given.
pub fn replay_log(
    log: &ReviewLog,
    cached: Option<&SchedulingState>,
    config: &PracticeConfig,
) -> anyhow::Result<SchedulingState> {
    let Some(first) = log.first() else {
        bail!("review log is empty, nothing to replay");
    };
    let created_at = first.reviewed_at();

    let scheduler = Scheduler::new(config.scheduler)?;
    tracing::info!(reviews = log.len(), %created_at, "Replaying review log");

    let Some(cached) = cached else {
        return Ok(scheduler.replay(created_at, log));
    };

    let state = scheduler.verify(created_at, log, cached)?;
    tracing::info!(next_review = %state.next_review(), "Cached state matches review log");
    Ok(state)
}

/// The authoritative state carried by a failed run, if it failed on a cache
/// mismatch.
pub fn replayed_state(err: &anyhow::Error) -> Option<SchedulingState> {
    err.downcast_ref::<IntegrityMismatch>()
        .map(|mismatch| mismatch.replayed)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}
