//! Predicates for destination URLs and inbound short codes.

use regex::Regex;
use std::sync::LazyLock;

/// Compiled regex for codes that could have been issued by the allocator.
static CODE_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]{1,64}$").expect("static regex"));

/// Returns true if `url` starts with `http://` or `https://`.
///
/// Applied by the allocator before any store access and by the resolver to
/// every record it reads.
pub fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Returns true if `code` is non-empty, at most 64 characters and alphanumeric.
///
/// Anything else cannot exist in the store, so lookups for it are skipped.
pub fn is_well_formed_code(code: &str) -> bool {
    CODE_SHAPE_REGEX.is_match(code)
}
