use std::collections::HashMap;

use crate::types::FeatureMap;

/// In-memory memoization for catalog lookups, scoped to one run.
///
/// Holds two maps: `(artist, track) -> catalog id` and
/// `catalog id -> features`. Entries are never evicted. Every successful
/// lookup counts as a hit.
#[derive(Debug, Default)]
pub struct LookupCache {
    ids: HashMap<(String, String), String>,
    features: HashMap<String, FeatureMap>,
    id_hits: usize,
    feature_hits: usize,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup_id(&mut self, artist: &str, track: &str) -> Option<String> {
        let key = (artist.to_string(), track.to_string());
        let id = self.ids.get(&key).cloned();
        if id.is_some() {
            self.id_hits += 1;
        }
        id
    }

    pub fn store_id(&mut self, artist: &str, track: &str, catalog_id: String) {
        self.ids
            .insert((artist.to_string(), track.to_string()), catalog_id);
    }

    pub fn lookup_features(&mut self, catalog_id: &str) -> Option<FeatureMap> {
        let features = self.features.get(catalog_id).cloned();
        if features.is_some() {
            self.feature_hits += 1;
        }
        features
    }

    pub fn store_features(&mut self, catalog_id: &str, features: FeatureMap) {
        self.features.insert(catalog_id.to_string(), features);
    }

    pub fn id_hits(&self) -> usize {
        self.id_hits
    }

    pub fn feature_hits(&self) -> usize {
        self.feature_hits
    }
}
