//! SQL generation module.
//!
//! This module provides a type-safe SQL builder that generates multi-dialect
//! SELECT statements. It includes:
//!
//! - [`query`] - SELECT query builder (joins, grouping, CTEs, set operations)
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations
//! - [`types`] - SQL data types used by CAST

pub mod dialect;
pub mod expr;
pub mod query;
pub mod token;
pub mod types;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, SqlDialect};
pub use expr::{
    cast, col, count, count_distinct, exists, func, lead, lit_bool, lit_date, lit_decimal,
    lit_float, lit_int, lit_null, lit_str, lit_uuid, paren, sum, table_col, BinaryOperator, Expr,
    ExprExt, Literal, SortDir, WindowBuilder, WindowExt, WindowOrderBy,
};
pub use query::{Cte, Join, JoinType, OrderByExpr, Query, SelectExpr, SetOperation, TableRef};
pub use token::{Token, TokenStream};
pub use types::DataType;
