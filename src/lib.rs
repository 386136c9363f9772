//! jserve - embedded JSON document server
//!
//! Serves a build-time-bundled tree of JSON documents over a flat URL
//! namespace with conditional-request caching (`ETag`, `If-None-Match`,
//! `If-Modified-Since`), byte-range support, and permissive CORS. The
//! root path and anything not in the table redirect to the canonical
//! site configured via `BASE_FQDN`.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod store;
