//! Request resolution module
//!
//! Entry point for HTTP request processing. Resolves every request to a
//! terminal response: preflight answer, redirect, health response, or
//! document serving. Unknown paths are never a 404; they redirect to the
//! canonical site, carrying the original request URI.

use crate::config::AppState;
use crate::handler::documents;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating everything the resolver needs
pub struct RequestContext<'a> {
    /// URL path, without the query string
    pub path: &'a str,
    /// Full original request URI including the query string
    pub request_uri: &'a str,
    pub is_preflight: bool,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub if_range: Option<String>,
    pub range: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let ctx = RequestContext {
        path: uri.path(),
        request_uri: uri
            .path_and_query()
            .map_or_else(|| uri.path(), |pq| pq.as_str()),
        is_preflight: method == Method::OPTIONS,
        is_head: method == Method::HEAD,
        if_none_match: header("if-none-match"),
        if_modified_since: header("if-modified-since"),
        if_range: header("if-range"),
        range: header("range"),
    };

    let response = resolve(&ctx, &state);

    if state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed)
    {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = format!("{version:?}")
            .trim_start_matches("HTTP/")
            .to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.referer = header("referer");
        entry.user_agent = header("user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolve a request to its terminal response
///
/// Pure function of the context and the immutable state; every branch is
/// deterministic and none performs I/O.
pub fn resolve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    // CORS preflight is answered before any routing
    if ctx.is_preflight {
        return http::build_preflight_response();
    }

    // Root goes to the canonical site
    if ctx.path == "/" {
        return http::build_redirect_response(&format!("https://{}", state.config.base_fqdn));
    }

    // Health check bypasses the document table
    if ctx.path == "/health" {
        return http::build_health_response();
    }

    let Some(document) = state.store.get(ctx.path) else {
        // Unknown content funnels to the canonical site, URI preserved
        return http::build_redirect_response(&format!(
            "https://{}{}",
            state.config.base_fqdn, ctx.request_uri
        ));
    };

    let content_type = ctx.path.ends_with(".json").then_some("application/json");
    documents::serve_document(ctx, document, content_type)
}
