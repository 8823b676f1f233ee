use chrono::NaiveDateTime;

use crate::types::Played;

/// Timestamp layout shared by the history export and the dataset file.
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Serde adapter for `YYYY-MM-DD HH:MM` timestamps.
pub mod minute_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::MINUTE_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(MINUTE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, MINUTE_FORMAT)
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
    }
}

pub fn format_minute(value: &NaiveDateTime) -> String {
    value.format(MINUTE_FORMAT).to_string()
}

/// Record selection shared by the history and dataset readers.
///
/// Steps run in a fixed order: minimum duration, then offset, then limit.
/// A zero offset or limit counts as not given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub min_duration_secs: Option<u64>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl RecordFilter {
    pub fn apply<R: Played>(&self, records: Vec<R>) -> Vec<R> {
        let mut records = records;

        if let Some(secs) = self.min_duration_secs.filter(|s| *s > 0) {
            let threshold = secs.saturating_mul(1000);
            records.retain(|r| r.ms_played() >= threshold);
        }

        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            records = records.into_iter().skip(offset).collect();
        }

        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            records.truncate(limit);
        }

        records
    }
}

/// Share of `hits` in `total` as a percentage, zero for an empty run.
pub fn hit_rate(hits: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    hits as f64 / total as f64 * 100.0
}
