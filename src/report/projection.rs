//! Typed projection records returned by the report operations.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::row::{MappingResult, Row};
use crate::domain::OrderStatus;

/// Decode a projection from one positional result row.
pub trait FromRow: Sized {
    /// Number of columns the projection's query selects.
    const COLUMNS: usize;

    fn from_row(row: &Row<'_>) -> MappingResult<Self>;

    /// Arity-checked decoding of one raw row.
    fn decode(values: &[serde_json::Value]) -> MappingResult<Self> {
        let row = Row::new(values);
        row.require_width(Self::COLUMNS)?;
        Self::from_row(&row)
    }
}

/// One order sent to the queried store, with its aggregated total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentToStoreOrder {
    pub id: Uuid,
    pub created_at: DateTime<FixedOffset>,
    pub total_price: Decimal,
}

impl FromRow for SentToStoreOrder {
    const COLUMNS: usize = 3;

    fn from_row(row: &Row<'_>) -> MappingResult<Self> {
        Ok(Self {
            id: row.uuid(0)?,
            created_at: row.datetime(1)?,
            total_price: row.decimal(2)?,
        })
    }
}

/// Per-store terminal status counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatistic {
    pub store_id: Uuid,
    pub completed_count: i64,
    pub canceled_count: i64,
    pub rejected_count: i64,
}

impl FromRow for StoreStatistic {
    const COLUMNS: usize = 4;

    fn from_row(row: &Row<'_>) -> MappingResult<Self> {
        Ok(Self {
            store_id: row.uuid(0)?,
            completed_count: row.i64(1)?,
            canceled_count: row.i64(2)?,
            rejected_count: row.i64(3)?,
        })
    }
}

/// Identifying slice of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderShortInfo {
    pub id: Uuid,
    pub store_id: Uuid,
    pub status: OrderStatus,
}

impl FromRow for OrderShortInfo {
    const COLUMNS: usize = 3;

    fn from_row(row: &Row<'_>) -> MappingResult<Self> {
        Ok(Self {
            id: row.uuid(0)?,
            store_id: row.uuid(1)?,
            status: row.status(2)?,
        })
    }
}

/// An order qualified by the category-subtree report, with its total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithTotalPrice {
    pub short_info: OrderShortInfo,
    pub total_price: Decimal,
}

impl FromRow for OrderWithTotalPrice {
    const COLUMNS: usize = 4;

    fn from_row(row: &Row<'_>) -> MappingResult<Self> {
        Ok(Self {
            short_info: OrderShortInfo {
                id: row.uuid(0)?,
                store_id: row.uuid(1)?,
                status: row.status(2)?,
            },
            total_price: row.decimal(3)?,
        })
    }
}

/// One calendar day's revenue, its share of the whole dataset, and the
/// delta against the chronologically next day.
///
/// `diff` is `None` for the most recent day in the dataset (no successor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDayStatistic {
    pub day: NaiveDate,
    pub total_amount: Decimal,
    pub percentage: Decimal,
    pub diff: Option<Decimal>,
}

impl FromRow for OrderDayStatistic {
    const COLUMNS: usize = 4;

    fn from_row(row: &Row<'_>) -> MappingResult<Self> {
        Ok(Self {
            day: row.date(0)?,
            total_amount: row.decimal(1)?,
            percentage: row.decimal(2)?,
            diff: row.opt_decimal(3)?,
        })
    }
}
