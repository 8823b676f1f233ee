use std::{fmt, time::Duration};

use indicatif::ProgressBar;
use reqwest::StatusCode;
use tokio::time::sleep;

use crate::{
    management::LookupCache,
    spotify::{Backoff, CatalogResponse, CatalogTransport},
    types::{AccessToken, FeatureMap, SearchResponse},
    warning,
};

#[derive(Debug)]
pub enum LookupError {
    Http(reqwest::Error),
    Status {
        status: StatusCode,
        body: String,
    },
    Malformed {
        context: String,
        source: serde_json::Error,
    },
    NoMatch {
        artist: String,
        track: String,
    },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Http(e) => write!(f, "request failed: {}", e),
            LookupError::Status { status, body } => {
                write!(f, "unexpected response {}: {}", status, body)
            }
            LookupError::Malformed { context, source } => {
                write!(f, "cannot parse {}: {}", context, source)
            }
            LookupError::NoMatch { artist, track } => {
                write!(f, "no catalog match for '{}' by '{}'", track, artist)
            }
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Http(e) => Some(e),
            LookupError::Malformed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Http(err)
    }
}

/// Resolves history entries to catalog ids and audio features.
///
/// Owns its transport, the bearer authorization and, when caching is
/// enabled, a fresh [`LookupCache`] that lives as long as the client.
pub struct LookupClient<T> {
    transport: T,
    api_url: String,
    authorization: String,
    cache: Option<LookupCache>,
    progress: Option<ProgressBar>,
}

impl<T: CatalogTransport> LookupClient<T> {
    pub fn new(transport: T, api_url: impl Into<String>, token: &AccessToken, cache: bool) -> Self {
        Self {
            transport,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            authorization: token.authorization(),
            cache: cache.then(LookupCache::new),
            progress: None,
        }
    }

    /// Routes rate-limit notices through `progress` so the bar stays intact.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn cache(&self) -> Option<&LookupCache> {
        self.cache.as_ref()
    }

    /// Searches for `track` by `artist` and returns the first hit's id.
    ///
    /// The first search result is taken as is; title and artist are not
    /// compared against the query.
    ///
    /// # Errors
    ///
    /// Fails with `LookupError::NoMatch` when the search returns no items, and
    /// with `Status`/`Malformed`/`Http` for anything that is not a usable
    /// response. Rate limiting is retried without limit.
    pub async fn resolve_id(&mut self, artist: &str, track: &str) -> Result<String, LookupError> {
        if let Some(cache) = self.cache.as_mut() {
            if let Some(id) = cache.lookup_id(artist, track) {
                return Ok(id);
            }
        }

        let url = format!("{}/search", self.api_url);
        let q = format!("{} {}", track, artist);
        let query = [("q", q.as_str()), ("type", "track"), ("limit", "1")];
        let response = self.get_with_backoff(&url, &query).await?;

        let search: SearchResponse =
            serde_json::from_str(&response.body).map_err(|source| LookupError::Malformed {
                context: format!("search response for '{}' by '{}'", track, artist),
                source,
            })?;

        let catalog_id = search
            .tracks
            .items
            .into_iter()
            .next()
            .map(|item| item.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| LookupError::NoMatch {
                artist: artist.to_string(),
                track: track.to_string(),
            })?;

        if let Some(cache) = self.cache.as_mut() {
            cache.store_id(artist, track, catalog_id.clone());
        }

        Ok(catalog_id)
    }

    /// Fetches the audio feature document for `catalog_id`.
    pub async fn fetch_features(&mut self, catalog_id: &str) -> Result<FeatureMap, LookupError> {
        if let Some(cache) = self.cache.as_mut() {
            if let Some(features) = cache.lookup_features(catalog_id) {
                return Ok(features);
            }
        }

        let url = format!("{}/audio-features/{}", self.api_url, catalog_id);
        let response = self.get_with_backoff(&url, &[]).await?;

        let features: FeatureMap =
            serde_json::from_str(&response.body).map_err(|source| LookupError::Malformed {
                context: format!("audio features for {}", catalog_id),
                source,
            })?;

        if let Some(cache) = self.cache.as_mut() {
            cache.store_features(catalog_id, features.clone());
        }

        Ok(features)
    }

    async fn get_with_backoff(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<CatalogResponse, LookupError> {
        let mut backoff = Backoff::new();

        loop {
            let response = self.transport.get(url, query, &self.authorization).await?;

            if response.is_rate_limited() {
                let delay = backoff.next_delay(response.retry_after.map(Duration::from_secs));
                self.announce_pause(delay);
                sleep(delay).await;
                continue;
            }

            if !response.status.is_success() {
                return Err(LookupError::Status {
                    status: response.status,
                    body: response.body,
                });
            }

            return Ok(response);
        }
    }

    fn announce_pause(&self, delay: Duration) {
        let secs = delay.as_secs();
        match &self.progress {
            Some(pb) => pb.suspend(|| warning!("Rate limit hit - sleeping for {} seconds", secs)),
            None => warning!("Rate limit hit - sleeping for {} seconds", secs),
        }
    }
}
