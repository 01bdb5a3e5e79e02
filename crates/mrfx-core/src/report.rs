//! Report serialization: grouped text or a structured JSON document.

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::error::ExtractError;
use crate::extract::{ExtractReport, RecordMatch};

/// Output shape for the report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Per-network URL lists with `# network (n files)` headers.
    Text,
    /// One pretty-printed object with counts and per-record match detail.
    Json,
}

impl OutputFormat {
    /// Default output filename for this shape.
    pub fn default_filename(&self) -> &'static str {
        match self {
            OutputFormat::Text => "ny_ppo_urls.txt",
            OutputFormat::Json => "ny_ppo_urls.json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format `{}` (expected text or json)", other)),
        }
    }
}

/// Shape of the structured report document.
#[derive(Serialize)]
struct JsonReport<'a> {
    processed: u64,
    matched: u64,
    records: &'a [RecordMatch],
}

/// Writes the report to `path` in the requested format.
///
/// The body is staged in a temp file next to the destination and renamed into
/// place on success, so a failed run never leaves a truncated report behind.
pub fn write_report(
    path: &Path,
    format: OutputFormat,
    report: &ExtractReport,
) -> Result<(), ExtractError> {
    let body = match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => render_json(report)?,
    };

    let write_err = |source: std::io::Error| ExtractError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(body.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %path.display(), bytes = body.len(), "report written");
    Ok(())
}

/// One block per network (sorted): header comment with the file count, then one
/// representative URL per file identity (sorted), then a blank separator line.
fn render_text(report: &ExtractReport) -> String {
    let mut out = String::new();
    for (network, files) in report.matches.iter() {
        out.push_str(&format!("# {} ({} files)\n", network, files.len()));
        for url in files.values() {
            out.push_str(url);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

fn render_json(report: &ExtractReport) -> Result<String, ExtractError> {
    let doc = JsonReport {
        processed: report.processed,
        matched: report.matched_records,
        records: &report.records,
    };
    serde_json::to_string_pretty(&doc).map_err(ExtractError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::MatchSet;
    use crate::filter::MatchedFile;

    fn report_with(matches: MatchSet, processed: u64, matched_records: u64) -> ExtractReport {
        ExtractReport {
            processed,
            matched_records,
            matches,
            records: Vec::new(),
        }
    }

    #[test]
    fn text_format_matches_expected_bytes() {
        let mut set = MatchSet::new();
        set.insert("Net B", "b1.json.gz", "https://cdn/b1.json.gz");
        set.insert("Net A", "a2.json.gz", "https://cdn/a2.json.gz");
        set.insert("Net A", "a1.json.gz", "https://cdn/a1.json.gz");
        let report = report_with(set, 10, 2);

        let expected = "\
# Net A (2 files)
https://cdn/a1.json.gz
https://cdn/a2.json.gz

# Net B (1 files)
https://cdn/b1.json.gz

";
        assert_eq!(render_text(&report), expected);
    }

    #[test]
    fn text_format_empty_result_is_empty_file() {
        let report = report_with(MatchSet::new(), 5, 0);
        assert_eq!(render_text(&report), "");
    }

    #[test]
    fn json_format_zero_matches_is_well_formed() {
        let report = report_with(MatchSet::new(), 7, 0);
        let body = render_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["processed"], 7);
        assert_eq!(value["matched"], 0);
        assert_eq!(value["records"], serde_json::json!([]));
    }

    #[test]
    fn json_format_includes_record_detail() {
        let mut report = report_with(MatchSet::new(), 3, 1);
        report.records.push(RecordMatch {
            reporting_plans: vec![serde_json::json!({"plan_name": "Empire PPO"})],
            files: vec![MatchedFile {
                url: "https://cdn/f.json.gz?sig=x".to_string(),
                description: "Empire NY PPO".to_string(),
                file_id: "f.json.gz".to_string(),
            }],
        });
        let body = render_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["records"][0]["reporting_plans"][0]["plan_name"], "Empire PPO");
        assert_eq!(value["records"][0]["files"][0]["file_id"], "f.json.gz");
    }

    #[test]
    fn write_report_creates_file_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut set = MatchSet::new();
        set.insert("Net A", "a.json.gz", "https://cdn/a.json.gz");
        let report = report_with(set, 1, 1);

        write_report(&path, OutputFormat::Text, &report).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("# Net A (1 files)\n"));
    }

    #[test]
    fn write_report_unwritable_destination_is_write_error() {
        let report = report_with(MatchSet::new(), 0, 0);
        let path = Path::new("/nonexistent-dir-mrfx/out.txt");
        match write_report(path, OutputFormat::Text, &report) {
            Err(ExtractError::Write { .. }) => {}
            other => panic!("expected Write error, got {:?}", other.err()),
        }
    }

    #[test]
    fn format_parse_and_default_filenames() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Text.default_filename(), "ny_ppo_urls.txt");
        assert_eq!(OutputFormat::Json.default_filename(), "ny_ppo_urls.json");
    }
}
