//! Enrichment of a listening history, one record at a time.

use indicatif::ProgressBar;

use crate::{
    spotify::{CatalogTransport, LookupClient, LookupError},
    types::{EnrichedRecord, HistoryRecord},
    utils::hit_rate,
};

/// Cache statistics of one enrichment pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichmentReport {
    pub total: usize,
    pub id_hits: usize,
    pub feature_hits: usize,
}

impl EnrichmentReport {
    /// Id cache hits as a percentage of processed records.
    pub fn id_hit_rate(&self) -> f64 {
        hit_rate(self.id_hits, self.total)
    }

    /// Feature cache hits as a percentage of processed records.
    pub fn feature_hit_rate(&self) -> f64 {
        hit_rate(self.feature_hits, self.total)
    }
}

/// Resolves and fetches features for every record, in order.
///
/// Stops at the first record that cannot be enriched; nothing is skipped.
/// The report is `None` when the client runs without a cache.
pub async fn enrich<T: CatalogTransport>(
    history: Vec<HistoryRecord>,
    client: &mut LookupClient<T>,
    progress: &ProgressBar,
) -> Result<(Vec<EnrichedRecord>, Option<EnrichmentReport>), LookupError> {
    let total = history.len();
    let mut dataset = Vec::with_capacity(total);

    for record in history {
        progress.set_message(format!("{} - {}", record.artist_name, record.track_name));
        let catalog_id = client
            .resolve_id(&record.artist_name, &record.track_name)
            .await?;
        let features = client.fetch_features(&catalog_id).await?;
        dataset.push(EnrichedRecord::new(record, catalog_id, features));
        progress.inc(1);
    }

    let report = client.cache().map(|cache| EnrichmentReport {
        total,
        id_hits: cache.id_hits(),
        feature_hits: cache.feature_hits(),
    });

    Ok((dataset, report))
}
