//! Incremental parse of the index document.
//!
//! The index is a single top-level object holding one very large array of
//! reporting records. Records are deserialized one at a time straight off the
//! reader, so memory stays bounded by the largest single record, not the
//! document (which is multi-gigabyte once decompressed).

mod seed;

use serde::de::DeserializeSeed;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Top-level array field holding the reporting records.
pub const REPORTING_STRUCTURE_FIELD: &str = "reporting_structure";

/// One reference to a downloadable machine-readable file. The same logical
/// file may appear under several CDN locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
}

/// One element of the reporting array. Lives only for one iteration step.
///
/// Plan descriptors are kept as raw values; their shape varies by payer and
/// only the structured report echoes them back out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexRecord {
    #[serde(default)]
    pub in_network_files: Vec<FileEntry>,
    #[serde(default)]
    pub reporting_plans: Vec<serde_json::Value>,
}

/// Streams records of the `array_field` array out of the JSON document on
/// `reader`, invoking `on_record` for each. Returns the number of records
/// seen. All other top-level keys are skipped without materializing them.
///
/// Fails if the document is not an object, the field is missing, or the field
/// is not an array of objects. Restart is from scratch only.
pub fn stream_records<R, F>(
    reader: R,
    array_field: &str,
    mut on_record: F,
) -> Result<u64, serde_json::Error>
where
    R: Read,
    F: FnMut(IndexRecord),
{
    let mut de = serde_json::Deserializer::from_reader(reader);
    let count = seed::IndexDocument {
        array_field,
        on_record: &mut on_record,
    }
    .deserialize(&mut de)?;
    de.end()?;
    Ok(count)
}
