use chrono::{DateTime, Duration, TimeZone, Utc};
use lingo_srs::{OutputModality, Quality, ReviewLog, ReviewOutcome};

/// Fixed creation time so every test is reproducible
pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 3, 7, 15, 0).unwrap()
}

pub fn review(quality: Quality, modality: OutputModality, hours: i64) -> ReviewOutcome {
    ReviewOutcome::new(quality, modality, created_at() + Duration::hours(hours))
}

/// Build a chronological log from `(quality, modality)` pairs, one review every 20 hours
pub fn log_of(entries: &[(Quality, OutputModality)]) -> ReviewLog {
    let outcomes = entries
        .iter()
        .enumerate()
        .map(|(i, &(quality, modality))| review(quality, modality, 20 * i as i64))
        .collect::<Vec<_>>();
    ReviewLog::try_from(outcomes).expect("log helper produces ordered outcomes")
}

/// A longer history mixing all grades and modalities
pub fn mixed_history() -> ReviewLog {
    use OutputModality::{Flashcard, Spoken, Typed};
    use Quality::{Correct, Fail, Partial};

    log_of(&[
        (Correct, Typed),
        (Correct, Spoken),
        (Partial, Typed),
        (Fail, Spoken),
        (Correct, Flashcard),
        (Correct, Spoken),
        (Correct, Spoken),
        (Partial, Spoken),
        (Fail, Typed),
        (Fail, Typed),
        (Correct, Typed),
        (Partial, Flashcard),
    ])
}
