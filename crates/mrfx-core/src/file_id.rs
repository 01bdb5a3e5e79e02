//! File identity derivation from a URL.

/// Derives the file identifier from a URL, ignoring CDN host and query params.
///
/// The same file is often served from several CDN domains with per-domain
/// signing parameters; only the final path segment identifies the underlying
/// file. Pure string slicing on purpose: entries with locations the `url`
/// crate would reject still get an identity.
///
/// `https://cdn1.example/X/file123.json.gz?sig=abc` -> `file123.json.gz`
pub fn file_id_from_url(url: &str) -> &str {
    let base = match url.split_once('?') {
        Some((base, _query)) => base,
        None => url,
    };
    match base.rsplit_once('/') {
        Some((_, id)) => id,
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_query_and_path() {
        assert_eq!(
            file_id_from_url("https://cdn1.example/X/file123.json.gz?sig=abc"),
            "file123.json.gz"
        );
    }

    #[test]
    fn mirrors_share_identity() {
        let a = file_id_from_url("https://cdn1.example/X/file123.json.gz?sig=abc");
        let b = file_id_from_url("https://cdn2.example/Y/file123.json.gz?sig=def");
        assert_eq!(a, b);
    }

    #[test]
    fn no_query_no_path() {
        assert_eq!(file_id_from_url("https://h/file.json.gz"), "file.json.gz");
        assert_eq!(file_id_from_url("file.json.gz"), "file.json.gz");
        assert_eq!(file_id_from_url("opaque?x=1"), "opaque");
    }

    #[test]
    fn trailing_slash_gives_empty_identity() {
        // Degenerate input; identity is the (empty) last segment, not an error.
        assert_eq!(file_id_from_url("https://h/a/"), "");
    }
}
