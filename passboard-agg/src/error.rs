//! Error types for passboard-agg
//!
//! Only `AggregationError` reaches callers of the assemblers. `PassFetchError`
//! is absorbed per asset by the enricher; `IndexError` is always fatal and is
//! wrapped into `AggregationError::IndexService`.

use std::time::Duration;
use thiserror::Error;

/// Asset index client errors
#[derive(Debug, Error)]
pub enum IndexError {
    /// Network communication error (includes client timeouts)
    #[error("Network error: {0}")]
    Network(String),

    /// Index service answered with a non-success HTTP status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Index service answered with a JSON-RPC error object
    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Pass store errors (per asset or per program)
#[derive(Debug, Error)]
pub enum PassFetchError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// No pass or program at this address
    #[error("Not found: {0}")]
    NotFound(String),

    /// Pass store answered with a non-success HTTP status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Call exceeded the configured per-request timeout
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

/// Fatal aggregation failures surfaced to the caller
#[derive(Debug, Error)]
pub enum AggregationError {
    /// Missing or empty collection address (rejected before any I/O)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Asset index could not be read
    #[error("Asset index service error: {0}")]
    IndexService(#[from] IndexError),

    /// Asset index kept returning items past the page ceiling
    #[error("Asset index returned non-empty pages up to the limit of {max_pages}")]
    TooManyPages { max_pages: u32 },

    /// Any other fatal failure while assembling a response
    #[error("Failed to build {operation}: {source}")]
    AggregationFailed {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl AggregationError {
    pub(crate) fn failed(
        operation: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AggregationError::AggregationFailed {
            operation,
            source: Box::new(source),
        }
    }
}

/// Result type for aggregation entry points
pub type AggregationResult<T> = Result<T, AggregationError>;
