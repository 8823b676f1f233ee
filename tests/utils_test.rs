use std::io::Write;

use chrono::NaiveDateTime;
use sporlviz::config::{read_credential_file, resolve_credentials_in};
use sporlviz::spotify::auth::parse_access_token;
use sporlviz::types::HistoryRecord;
use sporlviz::utils::*;

// Helper function to create a history record played for `ms` milliseconds
fn record(ms: u64, track: &str) -> HistoryRecord {
    HistoryRecord {
        play_duration_ms: ms,
        end_time: NaiveDateTime::parse_from_str("2021-01-01 10:00", MINUTE_FORMAT).unwrap(),
        artist_name: "Artist".to_string(),
        track_name: track.to_string(),
    }
}

fn tracks(records: &[HistoryRecord]) -> Vec<&str> {
    records.iter().map(|r| r.track_name.as_str()).collect()
}

#[test]
fn test_min_duration_drops_short_plays() {
    let filter = RecordFilter {
        min_duration_secs: Some(10),
        ..Default::default()
    };
    let kept = filter.apply(vec![record(5_000, "short"), record(20_000, "long")]);
    assert_eq!(tracks(&kept), vec!["long"]);
}

#[test]
fn test_min_duration_threshold_is_inclusive() {
    let filter = RecordFilter {
        min_duration_secs: Some(10),
        ..Default::default()
    };
    let kept = filter.apply(vec![record(9_999, "a"), record(10_000, "b")]);
    assert_eq!(tracks(&kept), vec!["b"]);
}

#[test]
fn test_default_filter_keeps_everything() {
    let input = vec![record(0, "a"), record(1, "b")];
    assert_eq!(RecordFilter::default().apply(input.clone()), input);
}

#[test]
fn test_zero_offset_and_limit_are_ignored() {
    let filter = RecordFilter {
        min_duration_secs: Some(0),
        offset: Some(0),
        limit: Some(0),
    };
    let kept = filter.apply(vec![record(0, "a"), record(1, "b")]);
    assert_eq!(tracks(&kept), vec!["a", "b"]);
}

#[test]
fn test_filter_order_is_duration_offset_limit() {
    let input = vec![
        record(1_000, "a"),
        record(30_000, "b"),
        record(2_000, "c"),
        record(40_000, "d"),
        record(50_000, "e"),
        record(60_000, "f"),
    ];
    let filter = RecordFilter {
        min_duration_secs: Some(10),
        offset: Some(1),
        limit: Some(2),
    };

    let kept = filter.apply(input.clone());
    assert_eq!(tracks(&kept), vec!["d", "e"]);

    // offset and limit before the duration filter select something else
    let reordered: Vec<HistoryRecord> = input
        .into_iter()
        .skip(1)
        .take(2)
        .filter(|r| r.play_duration_ms >= 10_000)
        .collect();
    assert_eq!(tracks(&reordered), vec!["b"]);
    assert_ne!(kept, reordered);
}

#[test]
fn test_filter_matches_stepwise_application() {
    let input: Vec<HistoryRecord> = (0..20)
        .map(|i| record(i * 1_500, &format!("t{}", i)))
        .collect();
    let filter = RecordFilter {
        min_duration_secs: Some(6),
        offset: Some(3),
        limit: Some(5),
    };

    let by_duration = RecordFilter {
        min_duration_secs: Some(6),
        ..Default::default()
    }
    .apply(input.clone());
    let by_offset = RecordFilter {
        offset: Some(3),
        ..Default::default()
    }
    .apply(by_duration);
    let by_limit = RecordFilter {
        limit: Some(5),
        ..Default::default()
    }
    .apply(by_offset);

    assert_eq!(filter.apply(input), by_limit);
}

#[test]
fn test_offset_past_end_yields_empty() {
    let filter = RecordFilter {
        offset: Some(5),
        ..Default::default()
    };
    assert!(filter.apply(vec![record(1, "a")]).is_empty());
}

#[test]
fn test_history_record_parses_export_fields() {
    let json = r#"{"endTime":"2021-02-03 04:05","artistName":"Björk","trackName":"Jóga","msPlayed":305000}"#;
    let parsed: HistoryRecord = serde_json::from_str(json).unwrap();

    assert_eq!(parsed.play_duration_ms, 305_000);
    assert_eq!(format_minute(&parsed.end_time), "2021-02-03 04:05");
    assert_eq!(parsed.artist_name, "Björk");
    assert_eq!(parsed.track_name, "Jóga");
}

#[test]
fn test_history_record_rejects_bad_timestamp() {
    let json = r#"{"endTime":"03.02.2021","artistName":"a","trackName":"b","msPlayed":1}"#;
    assert!(serde_json::from_str::<HistoryRecord>(json).is_err());
}

#[test]
fn test_hit_rate() {
    assert_eq!(hit_rate(0, 0), 0.0);
    assert!((hit_rate(1, 4) - 25.0).abs() < f64::EPSILON);
    assert!((hit_rate(3, 3) - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_parse_access_token_builds_authorization() {
    let token =
        parse_access_token(r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600}"#)
            .unwrap();
    assert_eq!(token.authorization(), "Bearer abc");
    assert_eq!(token.expires_in, 3600);

    assert!(parse_access_token(r#"{"error":"invalid_client"}"#).is_err());
}

#[test]
fn test_read_credential_file_trims() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "  my-client-id  ").unwrap();

    assert_eq!(read_credential_file(file.path()).unwrap(), "my-client-id");
}

#[test]
fn test_read_credential_file_errors() {
    let empty = tempfile::NamedTempFile::new().unwrap();
    assert!(read_credential_file(empty.path()).is_err());

    let dir = tempfile::tempdir().unwrap();
    assert!(read_credential_file(&dir.path().join("client_id")).is_err());
}

fn env_with(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}

fn credential_dir(id: &str, secret: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("client_id"), id).unwrap();
    std::fs::write(dir.path().join("client_secret"), secret).unwrap();
    dir
}

const CREDENTIAL_ENV: &[(&str, &str)] = &[
    ("SPOTIFY_API_AUTH_CLIENT_ID", "env-id"),
    ("SPOTIFY_API_AUTH_CLIENT_SECRET", "env-secret"),
];

#[test]
fn test_resolve_credentials_flag_beats_env() {
    let dir = credential_dir("file-id", "file-secret");
    let creds = resolve_credentials_in(
        Some("flag-id".to_string()),
        Some("flag-secret".to_string()),
        env_with(CREDENTIAL_ENV),
        dir.path(),
    )
    .unwrap();

    assert_eq!(creds.client_id, "flag-id");
    assert_eq!(creds.client_secret, "flag-secret");
}

#[test]
fn test_resolve_credentials_env_beats_file() {
    let dir = credential_dir("file-id", "file-secret");
    let creds = resolve_credentials_in(None, None, env_with(CREDENTIAL_ENV), dir.path()).unwrap();

    assert_eq!(creds.client_id, "env-id");
    assert_eq!(creds.client_secret, "env-secret");
}

#[test]
fn test_resolve_credentials_empty_flag_falls_through() {
    let dir = credential_dir("file-id", "file-secret");

    let creds = resolve_credentials_in(
        Some(String::new()),
        Some(String::new()),
        env_with(CREDENTIAL_ENV),
        dir.path(),
    )
    .unwrap();
    assert_eq!(creds.client_id, "env-id");
    assert_eq!(creds.client_secret, "env-secret");

    // empty env values fall through to the files as well
    let creds = resolve_credentials_in(
        Some(String::new()),
        None,
        env_with(&[
            ("SPOTIFY_API_AUTH_CLIENT_ID", ""),
            ("SPOTIFY_API_AUTH_CLIENT_SECRET", ""),
        ]),
        dir.path(),
    )
    .unwrap();
    assert_eq!(creds.client_id, "file-id");
    assert_eq!(creds.client_secret, "file-secret");
}

#[test]
fn test_resolve_credentials_mixes_sources() {
    let dir = credential_dir("file-id\n", "file-secret\n");
    let creds = resolve_credentials_in(
        Some("flag-id".to_string()),
        None,
        env_with(&[]),
        dir.path(),
    )
    .unwrap();

    assert_eq!(creds.client_id, "flag-id");
    assert_eq!(creds.client_secret, "file-secret");
}

#[test]
fn test_resolve_credentials_missing_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    let err = resolve_credentials_in(None, None, env_with(&[]), dir.path()).unwrap_err();
    assert!(err.contains("client_id"), "{}", err);
}
