//! Row decoding - converts raw gateway cells into typed scalars.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::OrderStatus;

/// Result type for row decoding.
pub type MappingResult<T> = Result<T, MappingError>;

/// A returned row does not match the expected projection.
///
/// This always indicates a query-construction bug, never bad user input,
/// and is surfaced to the caller unswallowed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The row has the wrong number of columns.
    #[error("expected {expected} columns, row has {actual}")]
    Arity { expected: usize, actual: usize },

    /// A cell could not be decoded as the expected type.
    #[error("column {index}: expected {expected}, got {found}")]
    Decode {
        index: usize,
        expected: &'static str,
        found: String,
    },
}

/// A borrowed view over one gateway result row with typed positional getters.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    values: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn new(values: &'a [Value]) -> Self {
        Self { values }
    }

    pub fn width(&self) -> usize {
        self.values.len()
    }

    /// Check the row has exactly `expected` columns.
    pub fn require_width(&self, expected: usize) -> MappingResult<()> {
        if self.values.len() != expected {
            return Err(MappingError::Arity {
                expected,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    fn cell(&self, index: usize) -> MappingResult<&'a Value> {
        self.values.get(index).ok_or(MappingError::Arity {
            expected: index + 1,
            actual: self.values.len(),
        })
    }

    fn decode_error(&self, index: usize, expected: &'static str) -> MappingError {
        MappingError::Decode {
            index,
            expected,
            found: self.values.get(index).map_or("<missing>".into(), summarize),
        }
    }

    pub fn uuid(&self, index: usize) -> MappingResult<Uuid> {
        match self.cell(index)? {
            Value::String(s) => {
                Uuid::parse_str(s).map_err(|_| self.decode_error(index, "uuid"))
            }
            _ => Err(self.decode_error(index, "uuid")),
        }
    }

    pub fn i64(&self, index: usize) -> MappingResult<i64> {
        match self.cell(index)? {
            Value::Number(n) => n.as_i64().ok_or_else(|| self.decode_error(index, "integer")),
            _ => Err(self.decode_error(index, "integer")),
        }
    }

    pub fn decimal(&self, index: usize) -> MappingResult<Decimal> {
        let value = self.cell(index)?;
        decode_decimal(value).ok_or_else(|| self.decode_error(index, "decimal"))
    }

    pub fn opt_decimal(&self, index: usize) -> MappingResult<Option<Decimal>> {
        let value = self.cell(index)?;
        if value.is_null() {
            return Ok(None);
        }
        decode_decimal(value)
            .map(Some)
            .ok_or_else(|| self.decode_error(index, "decimal or null"))
    }

    pub fn date(&self, index: usize) -> MappingResult<NaiveDate> {
        match self.cell(index)? {
            Value::String(s) => {
                NaiveDate::from_str(s).map_err(|_| self.decode_error(index, "date"))
            }
            _ => Err(self.decode_error(index, "date")),
        }
    }

    pub fn datetime(&self, index: usize) -> MappingResult<DateTime<FixedOffset>> {
        match self.cell(index)? {
            Value::String(s) => {
                decode_datetime(s).ok_or_else(|| self.decode_error(index, "timestamp"))
            }
            _ => Err(self.decode_error(index, "timestamp")),
        }
    }

    pub fn status(&self, index: usize) -> MappingResult<OrderStatus> {
        match self.cell(index)? {
            Value::String(s) => s
                .parse::<OrderStatus>()
                .map_err(|_| self.decode_error(index, "order status")),
            _ => Err(self.decode_error(index, "order status")),
        }
    }
}

/// Decimal cells arrive either as JSON numbers or as exact strings
/// (drivers commonly stringify NUMERIC to avoid float rounding).
fn decode_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let digits = n.to_string();
            Decimal::from_str(&digits)
                .ok()
                .or_else(|| Decimal::from_scientific(&digits).ok())
        }
        Value::String(s) => Decimal::from_str(s)
            .ok()
            .or_else(|| Decimal::from_scientific(s).ok()),
        _ => None,
    }
}

/// Timestamps arrive as RFC 3339 or the common `YYYY-MM-DD HH:MM:SS±TZ`
/// driver format.
fn decode_datetime(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%z"))
        .ok()
}

/// Short human-readable description of a cell for error messages.
fn summarize(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => format!("bool {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "array".into(),
        Value::Object(_) => "object".into(),
    }
}
