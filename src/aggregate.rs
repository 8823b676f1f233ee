//! Turns enriched records into plot values.
//!
//! Day grouping keeps the order in which each calendar date first appears in
//! the input, which for a chronological history is plain date order.

use std::{collections::HashMap, fmt};

use chrono::{NaiveDate, NaiveDateTime};

use crate::types::{DailyListening, EnrichedRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum AggregateError {
    MissingFeature { feature: String, catalog_id: String },
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::MissingFeature {
                feature,
                catalog_id,
            } => write!(
                f,
                "feature '{}' is missing or not numeric for {}",
                feature, catalog_id
            ),
        }
    }
}

impl std::error::Error for AggregateError {}

fn feature_of(record: &EnrichedRecord, feature: &str) -> Result<f64, AggregateError> {
    record
        .feature(feature)
        .ok_or_else(|| AggregateError::MissingFeature {
            feature: feature.to_string(),
            catalog_id: record.catalog_id.clone(),
        })
}

/// One point per record: its end time and the value of `feature`.
pub fn feature_timeline(
    records: &[EnrichedRecord],
    feature: &str,
) -> Result<Vec<(NaiveDateTime, f64)>, AggregateError> {
    records
        .iter()
        .map(|r| Ok((r.end_time, feature_of(r, feature)?)))
        .collect()
}

/// Mean of `feature` per calendar day.
pub fn daily_feature_means(
    records: &[EnrichedRecord],
    feature: &str,
) -> Result<Vec<(NaiveDate, f64)>, AggregateError> {
    let values = records
        .iter()
        .map(|r| feature_of(r, feature))
        .collect::<Result<Vec<f64>, _>>()?;

    Ok(group_by_day(records.iter().map(|r| r.end_time.date()).zip(values))
        .into_iter()
        .map(|(date, values)| (date, values.iter().sum::<f64>() / values.len() as f64))
        .collect())
}

/// Number of plays and minutes listened per calendar day.
pub fn daily_listening(records: &[EnrichedRecord]) -> Vec<DailyListening> {
    group_by_day(
        records
            .iter()
            .map(|r| (r.end_time.date(), r.minutes_played())),
    )
    .into_iter()
    .map(|(date, minutes)| DailyListening {
        date,
        plays: minutes.len(),
        minutes: minutes.iter().sum(),
    })
    .collect()
}

fn group_by_day<I>(entries: I) -> Vec<(NaiveDate, Vec<f64>)>
where
    I: IntoIterator<Item = (NaiveDate, f64)>,
{
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut groups: Vec<(NaiveDate, Vec<f64>)> = Vec::new();

    for (date, value) in entries {
        let slot = *index.entry(date).or_insert_with(|| {
            groups.push((date, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(value);
    }

    groups
}
