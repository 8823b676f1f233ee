use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::minute_format;

/// Audio features of a track as returned by the API, kept verbatim.
pub type FeatureMap = Map<String, Value>;

/// Anything that carries a play duration and can therefore be filtered.
pub trait Played {
    fn ms_played(&self) -> u64;
}

/// One entry of a Spotify streaming history export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "msPlayed")]
    pub play_duration_ms: u64,
    #[serde(rename = "endTime", with = "minute_format")]
    pub end_time: NaiveDateTime,
    #[serde(rename = "artistName")]
    pub artist_name: String,
    #[serde(rename = "trackName")]
    pub track_name: String,
}

impl Played for HistoryRecord {
    fn ms_played(&self) -> u64 {
        self.play_duration_ms
    }
}

/// A history record together with the catalog id and features found for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(rename = "ms_played")]
    pub play_duration_ms: u64,
    #[serde(with = "minute_format")]
    pub end_time: NaiveDateTime,
    pub artist_name: String,
    pub track_name: String,
    #[serde(rename = "spotify_id")]
    pub catalog_id: String,
    #[serde(rename = "data")]
    pub features: FeatureMap,
}

impl EnrichedRecord {
    pub fn new(record: HistoryRecord, catalog_id: String, features: FeatureMap) -> Self {
        Self {
            play_duration_ms: record.play_duration_ms,
            end_time: record.end_time,
            artist_name: record.artist_name,
            track_name: record.track_name,
            catalog_id,
            features,
        }
    }

    /// Numeric value of a single feature, if present.
    pub fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).and_then(Value::as_f64)
    }

    pub fn minutes_played(&self) -> f64 {
        self.play_duration_ms as f64 / 1000.0 / 60.0
    }
}

impl Played for EnrichedRecord {
    fn ms_played(&self) -> u64 {
        self.play_duration_ms
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

impl AccessToken {
    /// Value of the `Authorization` header for API requests.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<TrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Plays and minutes listened on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyListening {
    pub date: chrono::NaiveDate,
    pub plays: usize,
    pub minutes: f64,
}
