use std::{collections::HashMap, sync::Mutex};

use chrono::{DateTime, TimeZone, Utc};
use lingo_practice::ReviewKey;
use lingo_srs::{ReviewLog, ReviewOutcome, Scheduler, SchedulingState};
use uuid::Uuid;

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 19, 30, 0).unwrap()
}

pub fn key(user: u128, item: u128) -> ReviewKey {
    ReviewKey {
        user_id: Uuid::from_u128(user),
        item_id: Uuid::from_u128(item),
    }
}

/// Stored row for one key: the cached state plus its append-only log
#[derive(Debug, Clone)]
pub struct StoredItem {
    pub created_at: DateTime<Utc>,
    pub state: SchedulingState,
    pub log: ReviewLog,
}

/// In-memory stand-in for the storage layer.
///
/// The whole map sits behind one mutex, so each `record` is an atomic
/// read-modify-write of the state and log for its key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<ReviewKey, StoredItem>>,
}

impl MemoryStore {
    pub fn record(
        &self,
        scheduler: &Scheduler,
        key: ReviewKey,
        outcome: ReviewOutcome,
    ) -> SchedulingState {
        let mut items = self.items.lock().unwrap();
        let item = items.entry(key).or_insert_with(|| StoredItem {
            created_at: outcome.reviewed_at(),
            state: scheduler.initial_state(outcome.reviewed_at()),
            log: ReviewLog::new(),
        });
        item.log.push(outcome).unwrap();
        item.state = scheduler.fold(&item.state, &outcome);
        item.state
    }

    pub fn get(&self, key: ReviewKey) -> Option<StoredItem> {
        self.items.lock().unwrap().get(&key).cloned()
    }

    pub fn overwrite_state(&self, key: ReviewKey, state: SchedulingState) {
        if let Some(item) = self.items.lock().unwrap().get_mut(&key) {
            item.state = state;
        }
    }

    pub fn due(&self, now: DateTime<Utc>) -> Vec<ReviewKey> {
        let mut due = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, item)| item.state.is_due(now))
            .map(|(key, _)| *key)
            .collect::<Vec<_>>();
        due.sort_by_key(|key| (key.user_id, key.item_id));
        due
    }
}
