use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;
use sporlviz::aggregate::*;
use sporlviz::types::{EnrichedRecord, FeatureMap};

fn enriched(end_time: &str, ms: u64, energy: f64) -> EnrichedRecord {
    let mut features = FeatureMap::new();
    features.insert("energy".to_string(), json!(energy));
    features.insert("type".to_string(), json!("audio_features"));
    EnrichedRecord {
        play_duration_ms: ms,
        end_time: NaiveDateTime::parse_from_str(end_time, "%Y-%m-%d %H:%M").unwrap(),
        artist_name: "Artist".to_string(),
        track_name: "Track".to_string(),
        catalog_id: format!("id-{}", end_time),
        features,
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_feature_timeline_is_one_to_one() {
    let records = vec![
        enriched("2021-01-01 10:00", 60_000, 0.2),
        enriched("2021-01-01 11:30", 60_000, 0.4),
        enriched("2021-01-02 09:15", 60_000, 0.6),
    ];

    let points = feature_timeline(&records, "energy").unwrap();
    assert_eq!(points.len(), records.len());
    for (point, record) in points.iter().zip(&records) {
        assert_eq!(point.0, record.end_time);
    }
    assert_eq!(
        points.iter().map(|p| p.1).collect::<Vec<_>>(),
        vec![0.2, 0.4, 0.6]
    );
}

#[test]
fn test_daily_means_follow_first_seen_order() {
    // days deliberately out of calendar order
    let records = vec![
        enriched("2021-03-05 08:00", 60_000, 0.5),
        enriched("2021-03-01 09:00", 60_000, 0.25),
        enriched("2021-03-05 21:00", 60_000, 1.0),
        enriched("2021-03-03 12:00", 60_000, 0.75),
        enriched("2021-03-01 23:59", 60_000, 0.75),
        enriched("2021-03-05 23:00", 60_000, 0.0),
    ];

    let means = daily_feature_means(&records, "energy").unwrap();
    assert_eq!(
        means.iter().map(|(d, _)| *d).collect::<Vec<_>>(),
        vec![date("2021-03-05"), date("2021-03-01"), date("2021-03-03")]
    );
    assert!((means[0].1 - 0.5).abs() < 1e-12);
    assert!((means[1].1 - 0.5).abs() < 1e-12);
    assert!((means[2].1 - 0.75).abs() < 1e-12);
}

#[test]
fn test_missing_feature_is_reported() {
    let records = vec![enriched("2021-01-01 10:00", 60_000, 0.2)];

    let err = feature_timeline(&records, "tempo").unwrap_err();
    assert_eq!(
        err,
        AggregateError::MissingFeature {
            feature: "tempo".to_string(),
            catalog_id: "id-2021-01-01 10:00".to_string(),
        }
    );

    // present but not a number
    assert!(daily_feature_means(&records, "type").is_err());
}

#[test]
fn test_daily_listening_counts_plays_and_minutes() {
    let records = vec![
        enriched("2021-01-01 10:00", 120_000, 0.0),
        enriched("2021-01-01 10:05", 30_000, 0.0),
        enriched("2021-01-02 18:00", 240_000, 0.0),
    ];

    let days = daily_listening(&records);
    assert_eq!(days.len(), 2);

    assert_eq!(days[0].date, date("2021-01-01"));
    assert_eq!(days[0].plays, 2);
    assert!((days[0].minutes - 2.5).abs() < 1e-12);

    assert_eq!(days[1].date, date("2021-01-02"));
    assert_eq!(days[1].plays, 1);
    assert!((days[1].minutes - 4.0).abs() < 1e-12);
}

#[test]
fn test_empty_dataset_aggregates_to_nothing() {
    assert!(daily_listening(&[]).is_empty());
    assert!(daily_feature_means(&[], "energy").unwrap().is_empty());
    assert!(feature_timeline(&[], "energy").unwrap().is_empty());
}
