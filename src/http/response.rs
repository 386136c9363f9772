//! HTTP response building module
//!
//! Builders for every response the resolver can emit. All of them carry
//! the permissive CORS header set, matching the policy that every
//! response, including redirects and preflight answers, is usable
//! cross-origin.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::Response;

/// Cache policy applied to every table hit
pub const CACHE_CONTROL: &str = "public, must-revalidate";

/// Start a response builder with the CORS header set applied
fn cors_builder(status: u16) -> Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
        .header(
            "Access-Control-Allow-Headers",
            "Origin, X-Requested-With, Content-Type, Accept",
        )
}

/// Finish a builder, falling back to an empty response on error
fn finish(builder: Builder, body: Bytes, status: &str) -> Response<Full<Bytes>> {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        crate::logger::log_error(&format!("Failed to build {status} response: {e}"));
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 204 No Content response for CORS preflight
pub fn build_preflight_response() -> Response<Full<Bytes>> {
    finish(cors_builder(204), Bytes::new(), "204")
}

/// Build 302 Found redirect response
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    finish(
        cors_builder(302).header("Location", location),
        Bytes::new(),
        "302",
    )
}

/// Build the health check response
pub fn build_health_response() -> Response<Full<Bytes>> {
    finish(
        cors_builder(200).header("Content-Type", "text/plain"),
        Bytes::from_static(b"healthy\n"),
        "200",
    )
}

/// Build 304 Not Modified response
///
/// The `ETag` is re-asserted so caches retain the validator.
pub fn build_not_modified_response(etag: &str) -> Response<Full<Bytes>> {
    finish(
        cors_builder(304)
            .header("ETag", etag)
            .header("Cache-Control", CACHE_CONTROL),
        Bytes::new(),
        "304",
    )
}

/// Build 200 response with the full document body and caching headers
pub fn build_document_response(
    body: Bytes,
    content_type: Option<&str>,
    etag: &str,
    last_modified: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let mut builder = cors_builder(200)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", CACHE_CONTROL)
        .header("Last-Modified", last_modified);
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }

    let body = if is_head { Bytes::new() } else { body };
    finish(builder, body, "200")
}

/// Build 206 Partial Content response
#[allow(clippy::too_many_arguments)]
pub fn build_partial_response(
    body: Bytes,
    content_type: Option<&str>,
    etag: &str,
    last_modified: &str,
    start: usize,
    end: usize,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let mut builder = cors_builder(206)
        .header("Content-Length", end - start + 1)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", CACHE_CONTROL)
        .header("Last-Modified", last_modified);
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }

    let body = if is_head { Bytes::new() } else { body };
    finish(builder, body, "206")
}

/// Build 416 Range Not Satisfiable response
///
/// The caching headers of the table hit still apply; only the range
/// evaluation failed.
pub fn build_unsatisfiable_range_response(total_size: usize, etag: &str) -> Response<Full<Bytes>> {
    finish(
        cors_builder(416)
            .header("Content-Range", format!("bytes */{total_size}"))
            .header("ETag", etag)
            .header("Cache-Control", CACHE_CONTROL),
        Bytes::new(),
        "416",
    )
}
