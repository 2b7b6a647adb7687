//! Catalog error taxonomy.

use thiserror::Error;

/// Errors raised by the catalog request pipeline.
///
/// Every error aborts the query it was raised in and is surfaced once
/// to the caller; nothing is retried or corrected internally.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request resolves to no registered endpoint, or carries
    /// malformed pagination parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The operation type is outside the closed set `search`/`detail`/`get`.
    #[error("invalid request type: {0}")]
    InvalidRequestType(String),

    /// The upstream answered with a non-success HTTP status.
    #[error("upstream HTTP error {status} for {endpoint}")]
    UpstreamHttp {
        /// Status code as returned by the upstream.
        status: reqwest::StatusCode,
        /// Relative endpoint path the request was sent to.
        endpoint: String,
    },

    /// The response body failed to parse as JSON, or violated a shape
    /// assumption (array vs. object).
    #[error("upstream data error: {0}")]
    UpstreamData(String),

    /// The request never produced an HTTP status (connection, TLS, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The client was constructed with invalid configuration.
    #[error("client configuration error: {0}")]
    Configuration(String),
}

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
