use std::collections::HashMap;

use abi::{AvailabilityRecord, RoomType};
use serde::Serialize;

/// Grouping key of a summary. Records carrying neither `room_type.id` nor
/// `room_type_id` all land in the single `Unknown` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomTypeKey {
    Id(i64),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomTypeSummary {
    #[serde(skip)]
    pub key: RoomTypeKey,
    #[serde(flatten)]
    pub room_type: RoomType,
    pub available_count: usize,
}

/// Which records count towards `available_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountPolicy {
    /// every record sharing the key, whatever its `is_available` flag
    #[default]
    AllRecords,
    /// skip records explicitly flagged `is_available: false`
    AvailableOnly,
}

impl RoomTypeKey {
    pub fn of(record: &AvailabilityRecord) -> Self {
        record
            .room_type_key()
            .map(RoomTypeKey::Id)
            .unwrap_or(RoomTypeKey::Unknown)
    }
}

impl CountPolicy {
    fn counts(self, record: &AvailabilityRecord) -> bool {
        match self {
            CountPolicy::AllRecords => true,
            CountPolicy::AvailableOnly => record.is_available != Some(false),
        }
    }
}

/// Group records per room type, in order of first appearance.
pub fn aggregate(records: &[AvailabilityRecord]) -> Vec<RoomTypeSummary> {
    aggregate_with(records, CountPolicy::AllRecords)
}

pub fn aggregate_with(records: &[AvailabilityRecord], policy: CountPolicy) -> Vec<RoomTypeSummary> {
    let mut index: HashMap<RoomTypeKey, usize> = HashMap::new();
    let mut summaries: Vec<RoomTypeSummary> = Vec::new();

    for record in records.iter().filter(|r| policy.counts(r)) {
        let key = RoomTypeKey::of(record);
        let pos = *index.entry(key).or_insert_with(|| {
            summaries.push(RoomTypeSummary {
                key,
                room_type: record.room_type.clone().unwrap_or_default(),
                available_count: 0,
            });
            summaries.len() - 1
        });
        summaries[pos].available_count += 1;
    }
    summaries
}
