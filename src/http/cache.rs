//! HTTP cache validator module
//!
//! `ETag` generation and evaluation of the conditional request headers
//! (`If-None-Match`, `If-Modified-Since`, `If-Range`).

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from content using fast hashing
///
/// Deterministic function of the content only, e.g. `"a1b2c3"`.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if the client's `If-None-Match` header matches the server's `ETag`
///
/// Supports a single `ETag`, a comma-separated list, and the `*` wildcard.
/// Returns true if matched (the response should be 304).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Format a timestamp as an HTTP-date (IMF-fixdate, always GMT)
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP-date header value
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Evaluate `If-Modified-Since` against the last-modified timestamp
///
/// Returns true when the client's copy is still fresh (the response should
/// be 304). HTTP-dates carry second granularity, so the comparison
/// truncates to whole seconds. An absent or malformed header never
/// produces a 304.
pub fn check_unmodified_since(
    if_modified_since: Option<&str>,
    last_modified: DateTime<Utc>,
) -> bool {
    if_modified_since
        .and_then(parse_http_date)
        .is_some_and(|since| last_modified.timestamp() <= since.timestamp())
}

/// Decide whether an `If-Range` header permits a partial response
///
/// With no `If-Range` header the `Range` header stands on its own. The
/// header value is either an entity tag, which must equal the current
/// `ETag`, or an HTTP-date, which must equal the last-modified time to
/// the second (RFC 7233: a date validator only matches exactly). Any
/// mismatch means the range is ignored and the full content served.
pub fn check_if_range(
    if_range: Option<&str>,
    etag: &str,
    last_modified: DateTime<Utc>,
) -> bool {
    match if_range {
        None => true,
        Some(value) if value.starts_with('"') => value.trim() == etag,
        Some(value) => parse_http_date(value)
            .is_some_and(|date| date.timestamp() == last_modified.timestamp()),
    }
}
