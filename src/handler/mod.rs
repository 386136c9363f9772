//! Request handler module
//!
//! Resolves every inbound request against the document table and emits a
//! terminal response: preflight, redirect, health, or document content.

pub mod documents;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
