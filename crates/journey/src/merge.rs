use chrono::{DateTime, Utc};

use crate::record::ActivityRecord;
use crate::timestamp::{parse_timestamp, sentinel};

/// Sort key of a record. Undated or unparsable records fall back to the
/// sentinel so they lead the timeline instead of being dropped.
pub fn sort_key(record: &ActivityRecord) -> DateTime<Utc> {
    record
        .timestamp()
        .and_then(|ts| parse_timestamp(ts.raw()))
        .unwrap_or_else(sentinel)
}

/// Stable in-place sort: records sharing a key keep their discovery order.
pub fn sort_chronologically(records: &mut [ActivityRecord]) {
    records.sort_by_cached_key(sort_key);
}

/// Concatenates per-source batches in the order given, then sorts.
pub fn merge<I>(batches: I) -> Vec<ActivityRecord>
where
    I: IntoIterator<Item = Vec<ActivityRecord>>,
{
    let mut records: Vec<ActivityRecord> = batches.into_iter().flatten().collect();
    sort_chronologically(&mut records);
    records
}
