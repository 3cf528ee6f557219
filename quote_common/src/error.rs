//! Error types shared by the feed and the client.
//!
//! The `QuoteError` enum unifies transport failures, malformed payloads and form
//! validation, allowing crates to propagate a single error type. Per-endpoint
//! fetch errors are collected rather than propagated; see `quote_feed::provider`.
use std::io;

use thiserror::Error;

/// Unified error type shared by the feed and the client.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// The request could not be sent or the connection failed mid-way.
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success HTTP status.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The shared fetch deadline ran out before this endpoint was tried.
    #[error("Fetch deadline exceeded")]
    Timeout,

    /// Payload did not have the fields the endpoint's mapper expects.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error originating from the standard library (stdin, sockets).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// User input rejected by form validation; the message is user-facing.
    #[error("{0}")]
    Validation(String),

    /// A fallback list must hold at least one quote.
    #[error("Fallback list is empty")]
    EmptyFallback,
}
