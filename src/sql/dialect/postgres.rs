//! PostgreSQL SQL dialect.
//!
//! PostgreSQL features relied on here:
//! - ANSI identifier quoting (`"`)
//! - Native boolean type (true/false)
//! - Native BOOL_AND aggregate
//! - WITH RECURSIVE and window functions

use super::helpers;
use super::SqlDialect;

/// PostgreSQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    // Uses default quote_string, format_date_literal; no function remapping.
}
