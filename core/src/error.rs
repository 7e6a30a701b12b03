//! Error types for the judicial-records client.
//!
//! # Design
//! Non-200 statuses are not errors: they travel back to the caller as data
//! (`HttpResponse::status`, `FetchedVerdict::status`, `SearchPage::status`).
//! `ApiError` covers what cannot be expressed that way: the transport failed,
//! a body was not JSON, or JSON arrived without a field the client needs.

use thiserror::Error;

/// Errors returned by `VerdictClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS, TLS or body-read failure in the transport.
    #[error("network error: {0}")]
    Network(#[from] ureq::Error),

    /// A response body that had to be JSON was not.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON that lacks a field the client reads, e.g. `pagination.pages`.
    #[error("unexpected response shape: missing or invalid `{0}`")]
    UnexpectedShape(String),

    /// A filter key outside the nine the search endpoint recognizes.
    #[error("unknown search filter key: {0}")]
    UnknownFilterKey(String),

    #[error("query encoding failed: {0}")]
    QueryEncoding(#[from] serde_urlencoded::ser::Error),
}
