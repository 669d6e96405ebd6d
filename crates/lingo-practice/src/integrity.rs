use chrono::{DateTime, Utc};
use lingo_srs::{ReviewLog, Scheduler, SchedulingState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one scheduled item for one user. Folds for the same key must
/// never run concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewKey {
    pub user_id: Uuid,
    pub item_id: Uuid,
}

/// Pick the authoritative scheduling state for `key`.
///
/// The review log always wins: a missing cache is rebuilt from it, and a
/// cache that disagrees with it is replaced (and the discrepancy logged so
/// storage corruption or a lost fold can be investigated). The caller should
/// write the returned state back when it differs from `cached`.
pub fn reconcile(
    scheduler: &Scheduler,
    key: ReviewKey,
    created_at: DateTime<Utc>,
    log: &ReviewLog,
    cached: Option<&SchedulingState>,
) -> SchedulingState {
    let Some(cached) = cached else {
        tracing::debug!(
            user_id = %key.user_id,
            item_id = %key.item_id,
            reviews = log.len(),
            "No cached scheduling state, rebuilding from review log"
        );
        return scheduler.replay(created_at, log);
    };

    match scheduler.verify(created_at, log, cached) {
        Ok(state) => state,
        Err(mismatch) => {
            tracing::warn!(
                user_id = %key.user_id,
                item_id = %key.item_id,
                reviews = log.len(),
                cached_next_review = %mismatch.cached.next_review(),
                replayed_next_review = %mismatch.replayed.next_review(),
                cached_repetitions = mismatch.cached.repetitions(),
                replayed_repetitions = mismatch.replayed.repetitions(),
                "Cached scheduling state diverges from review log, using replayed state"
            );
            mismatch.replayed
        }
    }
}
