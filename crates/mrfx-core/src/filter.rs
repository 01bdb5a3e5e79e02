//! NY PPO network predicate over file entry descriptions.
//!
//! Matching is substring-based and case-insensitive, exactly as the network
//! descriptions are published. Known limitation: a description containing
//! "NY" inside an unrelated word still matches; that imprecision is part of
//! the heuristic, not something to suppress here.

use serde::{Deserialize, Serialize};

use crate::file_id::file_id_from_url;
use crate::index::FileEntry;

/// Regional markers recognized in an uppercased description.
const NY_MARKERS: [&str; 5] = ["NEW YORK", " NY ", " NY:", "_NY_", "(NY)"];

/// One file entry that satisfied the predicate, enriched with its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedFile {
    pub url: String,
    pub description: String,
    pub file_id: String,
}

/// True if the description identifies a New York PPO network.
///
/// Rules, all on the uppercased description:
/// - plan type: contains "PPO";
/// - region: contains an explicit NY marker, or names Highmark (a separate
///   BCBS licensee serving Western/Northeastern NY) alongside "NY" anywhere;
/// - affiliate: Excellus BCBS covers upstate NY without an explicit NY token,
///   so "EXCELLUS" plus the plan type matches on its own.
pub fn description_matches(description: &str) -> bool {
    let desc = description.to_uppercase();

    let is_ppo = desc.contains("PPO");
    let is_ny = NY_MARKERS.iter().any(|marker| desc.contains(marker))
        || (desc.contains("HIGHMARK") && desc.contains("NY"));
    let is_excellus_ppo = desc.contains("EXCELLUS") && is_ppo;

    (is_ppo && is_ny) || is_excellus_ppo
}

/// Applies the predicate to every file entry of one index record.
///
/// The record matches iff the returned list is non-empty; all matching entries
/// are reported together.
pub fn match_entries(files: &[FileEntry]) -> Vec<MatchedFile> {
    let mut matched = Vec::new();
    for entry in files {
        if description_matches(&entry.description) {
            matched.push(MatchedFile {
                url: entry.location.clone(),
                description: entry.description.clone(),
                file_id: file_id_from_url(&entry.location).to_string(),
            });
        }
    }
    matched
}
