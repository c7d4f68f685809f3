//! Report query planners - one logical query per report.
//!
//! Planners are pure: they assemble joins, grouping, conditional aggregation,
//! recursive hierarchy traversal and window arithmetic into a [`Query`] and
//! never touch the gateway. Report-specific semantics live here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::closure::{descendant_categories, DESCENDANT_CTE};
use super::expr::{
    count_distinct_orders_with_status, ever_had_status, every_category_in, line_total,
};
use crate::domain::OrderStatus;
use crate::schema::{ORDERS, ORDER_ITEMS, PRODUCTS, CATEGORIES};
use crate::sql::{
    cast, lead, lit_date, lit_decimal, lit_int, lit_uuid, paren, sum, table_col, Cte, DataType,
    ExprExt, OrderByExpr, Query, SelectExpr, TableRef, WindowExt, WindowOrderBy,
};

/// FROM `"order"` with the item and product joins shared by most reports.
fn order_lines() -> Query {
    Query::new()
        .from(ORDERS.table_ref())
        .inner_join(
            ORDER_ITEMS.table_ref(),
            ORDER_ITEMS.order_id.expr().eq(ORDERS.id.expr()),
        )
        .inner_join(
            PRODUCTS.table_ref(),
            PRODUCTS.id.expr().eq(ORDER_ITEMS.product_id.expr()),
        )
}

/// Orders sent to a store: one row per order that ever reached
/// SENT_TO_STORE in the given store, with its aggregated line total,
/// most recent first.
///
/// The history restriction is an EXISTS semi-join, so an order that
/// re-entered SENT_TO_STORE is neither duplicated nor double-summed.
/// Orders without items are omitted by the inner item join.
pub fn sent_to_store_orders(store_id: Uuid) -> Query {
    order_lines()
        .select(vec![
            ORDERS.id.expr().alias("id"),
            ORDERS.created_at.expr().alias("created_at"),
            sum(line_total()).alias("total_price"),
        ])
        .filter(
            ORDERS
                .store_id
                .expr()
                .eq(lit_uuid(store_id))
                .and(ever_had_status(OrderStatus::SentToStore)),
        )
        .group_by(vec![ORDERS.id.expr(), ORDERS.created_at.expr()])
        .order_by(vec![OrderByExpr::desc(ORDERS.created_at.expr())])
}

/// Store statistics: terminal status counts per store, restricted to stores
/// whose total order value lies strictly between the bounds.
///
/// All three conditional distinct counts run in the same grouped pass; the
/// HAVING sum is not status-filtered. Sorted by the combined count
/// descending, then store id ascending as the deterministic tie-break.
pub fn store_statistics(lower_bound: Decimal, upper_bound: Decimal) -> Query {
    let completed = count_distinct_orders_with_status(OrderStatus::Completed);
    let canceled = count_distinct_orders_with_status(OrderStatus::Canceled);
    let rejected = count_distinct_orders_with_status(OrderStatus::Rejected);
    let total_order_price = sum(line_total());

    let combined = completed.clone().add(canceled.clone()).add(rejected.clone());

    order_lines()
        .select(vec![
            ORDERS.store_id.expr().alias("store_id"),
            completed.alias("completed_count"),
            canceled.alias("canceled_count"),
            rejected.alias("rejected_count"),
        ])
        .group_by(vec![ORDERS.store_id.expr()])
        .having(
            total_order_price
                .clone()
                .gt(lit_decimal(lower_bound))
                .and(total_order_price.lt(lit_decimal(upper_bound))),
        )
        .order_by(vec![
            OrderByExpr::desc(combined),
            OrderByExpr::asc(ORDERS.store_id.expr()),
        ])
}

/// Orders whose product categories all fall within the supplied names.
///
/// Grouped per order; the BOOL_AND membership aggregate keeps an order only
/// if every joined product category is one of the names. An empty name list
/// keeps nothing.
pub fn orders_in_categories(category_names: &[String]) -> Query {
    order_lines()
        .inner_join(
            CATEGORIES.table_ref(),
            CATEGORIES.id.expr().eq(PRODUCTS.category_id.expr()),
        )
        .select(order_short_info_columns())
        .group_by(vec![
            ORDERS.id.expr(),
            ORDERS.store_id.expr(),
            ORDERS.status.expr(),
        ])
        .having(every_category_in(category_names))
}

/// Orders containing at least one product under the named category's
/// subtree, with the total price over all of the order's items.
///
/// The recursive closure CTE feeds a DISTINCT order-id CTE; the outer query
/// re-joins the full line set for exactly those orders so the total covers
/// every item, not only the matching ones. An unmatched name yields an
/// empty closure and therefore an empty result.
pub fn orders_in_category_tree(category_name: &str) -> Query {
    let matched_orders = order_lines()
        .distinct()
        .select(vec![ORDERS.id.expr().alias("id")])
        .inner_join(
            TableRef::new(DESCENDANT_CTE).with_alias("d"),
            table_col("d", "id").eq(PRODUCTS.category_id.expr()),
        );

    let mut columns = order_short_info_columns();
    columns.push(sum(line_total()).alias("total_price"));

    order_lines()
        .with_cte(descendant_categories(category_name))
        .with_cte(Cte::new("matched_order", matched_orders))
        .inner_join(
            TableRef::new("matched_order").with_alias("m"),
            table_col("m", "id").eq(ORDERS.id.expr()),
        )
        .select(columns)
        .group_by(vec![
            ORDERS.id.expr(),
            ORDERS.store_id.expr(),
            ORDERS.status.expr(),
        ])
}

/// Daily revenue trend: per-day totals inside the requested range, each
/// with its share of the entire dataset's volume and the delta against the
/// chronologically next day.
///
/// The window functions are computed in a CTE over the unfiltered per-day
/// aggregate and the date-range filter is applied afterwards: the
/// percentage denominator spans every day with orders, and a day adjacent
/// to the range boundary still diffs against its real successor. The most
/// recent day in the dataset has no successor; its diff is NULL. Days
/// without orders are absent, not zero-filled.
pub fn daily_statistics(start_date: NaiveDate, end_date: NaiveDate) -> Query {
    let day = cast(ORDERS.created_at.expr(), DataType::Date);

    let day_order = order_lines()
        .select(vec![
            day.clone().alias("day"),
            sum(line_total()).alias("total_amount"),
        ])
        .group_by(vec![day]);

    let amount = table_col("t", "total_amount");
    let percentage = paren(amount.clone().div(sum(amount.clone()).over().build())).mul(lit_int(100));
    let next_day_amount = lead(amount.clone())
        .over()
        .order_by(vec![WindowOrderBy::asc(table_col("t", "day"))])
        .build();

    let day_trend = Query::new()
        .select(vec![
            table_col("t", "day").alias("day"),
            amount.clone().alias("total_amount"),
            percentage.alias("percentage"),
            amount.sub(next_day_amount).alias("diff"),
        ])
        .from(TableRef::new("day_order").with_alias("t"));

    Query::new()
        .with_cte(Cte::new("day_order", day_order))
        .with_cte(Cte::new("day_trend", day_trend))
        .select(vec![
            table_col("dt", "day").alias("day"),
            table_col("dt", "total_amount").alias("total_amount"),
            table_col("dt", "percentage").alias("percentage"),
            table_col("dt", "diff").alias("diff"),
        ])
        .from(TableRef::new("day_trend").with_alias("dt"))
        .filter(table_col("dt", "day").between(lit_date(start_date), lit_date(end_date)))
        .order_by(vec![OrderByExpr::desc(table_col("dt", "day"))])
}

/// The {id, store_id, status} SELECT list shared by the category reports.
fn order_short_info_columns() -> Vec<SelectExpr> {
    vec![
        ORDERS.id.expr().alias("id"),
        ORDERS.store_id.expr().alias("store_id"),
        ORDERS.status.expr().alias("status"),
    ]
}
