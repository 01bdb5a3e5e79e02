//! Streaming HTTP GET for the index document.
//!
//! Uses the curl crate (libcurl) with a push callback; a bounded channel turns
//! that into a pull `std::io::Read` the decompressor and parser can consume.
//! Memory stays O(1) in the body size regardless of how large the index is.

mod byte_stream;

pub use byte_stream::{ByteStream, FetchFailure};

use std::time::Duration;

use crate::error::ExtractError;

/// Transfer tuning for the index fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// Abort when throughput stays below this many bytes/sec for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
        }
    }
}

/// Opens a GET transfer for `url` and returns a lazy byte stream over the body.
///
/// The URL is validated up front; transport failures after that point surface
/// through the returned stream (as read errors and via its failure handle).
/// No resume or seek: dropping the stream aborts the transfer, and a new call
/// restarts from the beginning.
pub fn open_stream(url: &str, opts: &FetchOptions) -> Result<ByteStream, ExtractError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| ExtractError::Fetch(format!("invalid URL {}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ExtractError::Fetch(format!(
                "unsupported URL scheme `{}` in {}",
                other, url
            )))
        }
    }

    tracing::debug!(url, "opening index stream");
    Ok(ByteStream::spawn(url.to_string(), opts.clone()))
}
