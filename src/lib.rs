//! # Magpie
//!
//! Typed analytical reporting over an order-fulfillment schema, compiled to
//! multi-dialect SQL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Report operations (typed parameters)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [report::planner + closure + expr]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Logical Query (joins, grouping, CTEs, windows)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql - tokens + dialects]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Dialect-specific SQL                    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [gateway::ExecutionGateway]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Rows of scalar cells (per call)             │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [report::row + projection]
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Typed projections                      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The core is read-only and stateless: each operation builds one logical
//! query, delegates execution to the gateway (which owns connections and
//! transactions), and maps the materialized rows into typed records.

pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod report;
pub mod schema;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::ReportConfig;
    pub use crate::domain::OrderStatus;
    pub use crate::error::{ReportError, ReportResult};
    pub use crate::gateway::{ExecutionGateway, GatewayError, QueryOutput, ResultColumn};
    pub use crate::report::{
        OrderDayStatistic, OrderShortInfo, OrderWithTotalPrice, ReportService, SentToStoreOrder,
        StoreStatistic,
    };
    pub use crate::sql::{Dialect, Expr, ExprExt, Query, SqlDialect, TableRef};
}

// Also export the main entry points at the crate root
pub use error::{ReportError, ReportResult};
pub use gateway::ExecutionGateway;
pub use report::ReportService;
pub use sql::Dialect;
