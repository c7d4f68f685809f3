//! Caller-facing error taxonomy for report operations.
//!
//! Degenerate inputs (empty category list, inverted date range, unknown
//! identifiers) are not errors - they produce empty results. Everything the
//! gateway reports propagates unchanged as the source of a
//! [`ReportError::QueryExecution`]; the core adds no retry or recovery.

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::report::MappingError;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// A report operation failed.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The gateway could not execute the report's query.
    #[error("report {report} failed to execute ({params}): {source}")]
    QueryExecution {
        /// Name of the report operation.
        report: &'static str,
        /// Rendered invocation parameters.
        params: String,
        #[source]
        source: GatewayError,
    },

    /// A returned row did not match the report's projection. This is a
    /// query-construction bug, not an input problem.
    #[error("report {report} returned a row that does not match its projection: {source}")]
    ResultMapping {
        /// Name of the report operation.
        report: &'static str,
        #[source]
        source: MappingError,
    },
}

impl ReportError {
    /// Name of the report operation that failed.
    pub fn report(&self) -> &'static str {
        match self {
            ReportError::QueryExecution { report, .. } => report,
            ReportError::ResultMapping { report, .. } => report,
        }
    }
}
