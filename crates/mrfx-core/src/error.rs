//! Pipeline error type. None of these are recovered locally; each aborts the run.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error from one stage of the extraction pipeline.
#[derive(Debug)]
pub enum ExtractError {
    /// URL invalid, connection could not be established, HTTP error status,
    /// or the transfer aborted mid-stream.
    Fetch(String),
    /// The decompressed byte stream is not the expected nested-array-of-objects
    /// document (includes a corrupt gzip stream).
    Parse(serde_json::Error),
    /// The output destination could not be written.
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Fetch(msg) => write!(f, "fetch: {}", msg),
            ExtractError::Parse(e) => write!(f, "parse: {}", e),
            ExtractError::Write { path, source } => {
                write!(f, "write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Fetch(_) => None,
            ExtractError::Parse(e) => Some(e),
            ExtractError::Write { source, .. } => Some(source),
        }
    }
}
