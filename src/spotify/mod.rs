//! # Spotify Integration Module
//!
//! Thin client for the three Spotify Web API calls the enrichment needs:
//!
//! ```text
//! POST {token_url}                  client-credentials token exchange
//! GET  {api}/search?type=track      (track, artist) -> catalog id
//! GET  {api}/audio-features/{id}    catalog id -> feature map
//! ```
//!
//! ## Rate Limiting
//!
//! Both `GET` calls go through the same retry loop: a `429 Too Many Requests`
//! response puts the caller to sleep for the `Retry-After` value if the server
//! sent one, otherwise for the current backoff delay (starting at 10 seconds),
//! and the delay doubles for the next attempt. There is no retry limit.
//! Any other non-success status or an unparsable body ends the lookup with a
//! [`LookupError`].
//!
//! ## Testing Seam
//!
//! Requests are issued through the [`CatalogTransport`] trait so the retry and
//! caching logic can be driven by scripted responses in tests. The production
//! implementation is [`HttpTransport`], a wrapper around `reqwest::Client`.

pub mod auth;
pub mod backoff;
pub mod lookup;
pub mod transport;

pub use auth::request_access_token;
pub use backoff::Backoff;
pub use lookup::{LookupClient, LookupError};
pub use transport::{CatalogResponse, CatalogTransport, HttpTransport};
