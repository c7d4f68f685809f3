//! Execution-gateway error types.

use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while executing a query through the gateway.
///
/// The reporting core never retries; `is_retriable()` lets gateway
/// implementations or callers decide outside of it.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Could not reach the relational store.
    #[error("database connection failed: {0}")]
    ConnectionFailed(String),

    /// The store rejected or aborted the query.
    #[error("query execution failed: {message} (code: {code})")]
    QueryFailed {
        /// Error code reported by the store.
        code: String,
        /// Error message reported by the store.
        message: String,
    },

    /// The call exceeded the gateway's deadline.
    #[error("query timed out after {0} seconds")]
    Timeout(u64),

    /// The call was canceled before completion.
    #[error("query was canceled")]
    Canceled,
}

impl GatewayError {
    /// Create a query-failure error from the store's code and message.
    pub fn query_failed(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueryFailed {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether retrying the same call could succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::Timeout(_))
    }
}
