//! Public short URL composition.

/// Joins the configured base URL and a code into the public short URL.
///
/// A trailing slash on `base_url` is ignored.
pub fn compose_short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
