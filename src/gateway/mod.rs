//! Execution gateway - the boundary between query construction and the store.
//!
//! The reporting core builds a logical [`Query`] and hands it to an
//! [`ExecutionGateway`] implementation, which owns connections, transactions
//! (read-only, snapshot-isolated per call), pooling, timeouts and
//! cancellation. The gateway returns rows as fixed-arity tuples of scalar
//! values addressable by name or position.

mod error;

pub use error::{GatewayError, GatewayResult};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::sql::{Dialect, Query};

/// Executes logical queries against the relational store.
///
/// Implementations render the query for their [`Dialect`] and run it inside
/// a read-only transaction. Dropping the returned future cancels the call
/// from the core's perspective; any deadline policy lives behind this trait.
#[async_trait]
pub trait ExecutionGateway: Send + Sync {
    /// The SQL dialect this gateway renders queries for.
    fn dialect(&self) -> Dialect {
        Dialect::default()
    }

    /// Run one query and materialize its full result.
    async fn execute(&self, query: &Query) -> GatewayResult<QueryOutput>;
}

/// One column of a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultColumn {
    pub name: String,
}

impl ResultColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Materialized result of one query execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOutput {
    /// Column headers, in SELECT-list order.
    pub columns: Vec<ResultColumn>,
    /// Rows of scalar cells, one `Vec` per row, positionally aligned
    /// with `columns`.
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl QueryOutput {
    /// Build an output from column names and rows.
    pub fn new(columns: Vec<&str>, rows: Vec<Vec<serde_json::Value>>) -> Self {
        Self {
            columns: columns.into_iter().map(ResultColumn::new).collect(),
            rows,
        }
    }

    /// Position of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
