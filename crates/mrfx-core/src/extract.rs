//! Pipeline driver: fetch -> gunzip -> stream parse -> filter -> aggregate.

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::aggregate::MatchSet;
use crate::config::MrfxConfig;
use crate::error::ExtractError;
use crate::fetch::{self, FetchOptions};
use crate::filter::{self, MatchedFile};
use crate::index::{self, REPORTING_STRUCTURE_FIELD};

/// Per-run options on top of the loaded config.
#[derive(Debug, Default)]
pub struct ExtractOptions {
    /// Override the configured index URL.
    pub index_url: Option<String>,
    /// Keep per-record match detail (plan descriptors plus matching entries)
    /// for the structured report. Off for the plain text report, where only
    /// the aggregated map is needed.
    pub capture_records: bool,
}

/// Match detail for one index record (only collected when requested).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMatch {
    pub reporting_plans: Vec<serde_json::Value>,
    pub files: Vec<MatchedFile>,
}

/// Outcome of one full pass over the index.
#[derive(Debug)]
pub struct ExtractReport {
    /// Records seen in the index array.
    pub processed: u64,
    /// Records with at least one matching file entry.
    pub matched_records: u64,
    /// Deduplicated (network, file id) -> URL map.
    pub matches: MatchSet,
    /// Per-record detail, empty unless `capture_records` was set.
    pub records: Vec<RecordMatch>,
}

/// Runs one sequential pass over the index and returns the aggregated result.
///
/// The fetch, decompression, and parse handles are all scoped to this call and
/// released on every exit path. A failed run returns an error and nothing else;
/// there is no partial result and no resume.
pub fn run(cfg: &MrfxConfig, opts: &ExtractOptions) -> Result<ExtractReport, ExtractError> {
    let url = opts.index_url.as_deref().unwrap_or(&cfg.index_url);
    let fetch_opts = FetchOptions {
        connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
        low_speed_limit: cfg.low_speed_limit_bytes,
        low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
    };

    let stream = fetch::open_stream(url, &fetch_opts)?;
    let failure = stream.failure_handle();
    let decoder = GzDecoder::new(stream);

    let mut matches = MatchSet::new();
    let mut records: Vec<RecordMatch> = Vec::new();
    let mut matched_records = 0u64;

    let result = index::stream_records(decoder, REPORTING_STRUCTURE_FIELD, |record| {
        let matched = filter::match_entries(&record.in_network_files);
        if matched.is_empty() {
            return;
        }
        matched_records += 1;
        for m in &matched {
            matches.add(m);
        }
        if opts.capture_records {
            records.push(RecordMatch {
                reporting_plans: record.reporting_plans,
                files: matched,
            });
        }
    });

    let processed = match result {
        Ok(n) => n,
        Err(err) => {
            // A transport abort surfaces through the reader as an io error and
            // would otherwise masquerade as a parse failure.
            if let Some(msg) = failure.get() {
                return Err(ExtractError::Fetch(msg));
            }
            return Err(ExtractError::Parse(err));
        }
    };

    tracing::info!(
        processed,
        matched_records,
        networks = matches.network_count(),
        unique_files = matches.unique_file_ids(),
        "index pass complete"
    );

    Ok(ExtractReport {
        processed,
        matched_records,
        matches,
        records,
    })
}
