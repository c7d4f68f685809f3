//! MySQL SQL dialect.
//!
//! MySQL differences from ANSI:
//! - Backtick identifier quoting (`` `name` ``)
//! - Boolean is TINYINT(1), literals render as 1/0
//! - No BOOL_AND/BOOL_OR aggregates; MIN/MAX over 0/1 expressions are
//!   the standard substitutes
//! - WITH RECURSIVE and window functions require MySQL 8.0+

use super::helpers;
use super::SqlDialect;

/// MySQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn remap_function(&self, name: &str) -> Option<&'static str> {
        match name.to_uppercase().as_str() {
            "BOOL_AND" => Some("MIN"),
            "BOOL_OR" => Some("MAX"),
            _ => None,
        }
    }
}
