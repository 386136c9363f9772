//! HTTP protocol layer module
//!
//! Protocol-level helpers decoupled from the document-serving logic:
//! cache validators, range parsing, and response builders.

pub mod cache;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use range::{evaluate_range, ByteRange, RangeOutcome};
pub use response::{
    build_document_response, build_health_response, build_not_modified_response,
    build_partial_response, build_preflight_response, build_redirect_response,
    build_unsatisfiable_range_response,
};
