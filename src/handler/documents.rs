//! Document serving module
//!
//! Conditional and range serving of a document table hit. Everything here
//! works against in-memory bytes; no branch can fail at request time.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, RangeOutcome};
use crate::store::Document;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Serve a document with full conditional-request and range support
///
/// Evaluation order follows the conditional-request precedence:
/// `If-None-Match` wins over `If-Modified-Since`, and `If-Range` gates
/// whether a `Range` header is honored at all.
pub fn serve_document(
    ctx: &RequestContext<'_>,
    document: &Document,
    content_type: Option<&str>,
) -> Response<Full<Bytes>> {
    let etag = document.etag.as_str();

    if cache::check_etag_match(ctx.if_none_match.as_deref(), etag) {
        return http::build_not_modified_response(etag);
    }

    // If-Modified-Since only applies when the client sent no entity validator
    if ctx.if_none_match.is_none()
        && cache::check_unmodified_since(ctx.if_modified_since.as_deref(), document.loaded_at)
    {
        return http::build_not_modified_response(etag);
    }

    let last_modified = cache::http_date(document.loaded_at);
    let total_size = document.content.len();

    // A stale If-Range validator downgrades the request to a full response
    let range_header = if cache::check_if_range(ctx.if_range.as_deref(), etag, document.loaded_at)
    {
        ctx.range.as_deref()
    } else {
        None
    };

    match http::evaluate_range(range_header, total_size) {
        RangeOutcome::Partial(range) => http::build_partial_response(
            document.content.slice(range.start..=range.end),
            content_type,
            etag,
            &last_modified,
            range.start,
            range.end,
            total_size,
            ctx.is_head,
        ),
        RangeOutcome::Unsatisfiable => http::build_unsatisfiable_range_response(total_size, etag),
        RangeOutcome::Full => http::build_document_response(
            document.content.clone(),
            content_type,
            etag,
            &last_modified,
            ctx.is_head,
        ),
    }
}
