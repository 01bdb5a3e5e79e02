//! Deduplication of matched file URLs across CDN mirrors.

use std::collections::{BTreeMap, BTreeSet};

use crate::filter::MatchedFile;

/// Matched files grouped by network description, deduplicated by file identity.
///
/// Explicit value threaded through the pipeline and returned at the end; the
/// BTreeMaps give the lexicographic (network, then file id) enumeration order
/// the report relies on for reproducible output.
#[derive(Debug, Default)]
pub struct MatchSet {
    networks: BTreeMap<String, BTreeMap<String, String>>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one URL under (network, file id). Idempotent: the first URL
    /// seen for an identity is kept, later mirrors of the same file are dropped.
    pub fn insert(&mut self, network: &str, file_id: &str, url: &str) {
        self.networks
            .entry(network.to_string())
            .or_default()
            .entry(file_id.to_string())
            .or_insert_with(|| url.to_string());
    }

    /// Records one matched file under its own description.
    pub fn add(&mut self, matched: &MatchedFile) {
        self.insert(&matched.description, &matched.file_id, &matched.url);
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Number of distinct network descriptions.
    pub fn network_count(&self) -> usize {
        self.networks.len()
    }

    /// Sum of per-network unique file counts.
    pub fn total_files(&self) -> usize {
        self.networks.values().map(|files| files.len()).sum()
    }

    /// Distinct file identities across all networks (a file can be listed
    /// under more than one network).
    pub fn unique_file_ids(&self) -> usize {
        let mut ids: BTreeSet<&str> = BTreeSet::new();
        for files in self.networks.values() {
            ids.extend(files.keys().map(String::as_str));
        }
        ids.len()
    }

    /// Networks in lexicographic order, each with its file-id -> URL map
    /// (itself in file-id order).
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, String>)> {
        self.networks.iter()
    }
}
