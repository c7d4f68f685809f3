//! Reusable predicate and aggregate fragments shared by the report planners.

use crate::domain::OrderStatus;
use crate::schema::{CATEGORIES, ORDERS, ORDER_ITEMS, PRODUCTS, STATUS_HISTORY};
use crate::sql::{count_distinct, exists, func, lit_int, lit_str, Expr, ExprExt, Query};

/// The order status as a SQL literal.
pub fn lit_status(status: OrderStatus) -> Expr {
    lit_str(status.as_str())
}

/// Line total of one order item: `p.price * i.quantity`.
pub fn line_total() -> Expr {
    PRODUCTS.price.expr().mul(ORDER_ITEMS.quantity.expr())
}

/// Count of distinct orders whose current status equals `status`:
/// `COUNT(DISTINCT CASE WHEN o.status = 'S' THEN o.id END)`.
///
/// The ELSE-less CASE yields NULL for non-matching rows and COUNT DISTINCT
/// ignores them, so several of these combine in a single grouped pass
/// instead of one scan per status.
pub fn count_distinct_orders_with_status(status: OrderStatus) -> Expr {
    count_distinct(Expr::Case {
        when_clauses: vec![(ORDERS.status.expr().eq(lit_status(status)), ORDERS.id.expr())],
        else_clause: None,
    })
}

/// AND-aggregate membership test: `BOOL_AND(c.name IN (names...))`.
///
/// True for a grouped order only if every joined product category is one of
/// the supplied names. An empty name list renders `BOOL_AND(FALSE)`, which
/// keeps no group.
pub fn every_category_in(names: &[String]) -> Expr {
    let membership = CATEGORIES
        .category_name
        .expr()
        .in_list(names.iter().map(|name| lit_str(name)).collect());
    func("BOOL_AND", vec![membership])
}

/// Semi-join test for "the order ever passed through `status`":
/// `EXISTS (SELECT 1 FROM order_status_history h WHERE h.order_id = o.id
/// AND h.status = 'S')`.
///
/// History rows may repeat a status; EXISTS keeps the outer row set
/// duplicate-free where an inner join would multiply it.
pub fn ever_had_status(status: OrderStatus) -> Expr {
    exists(
        Query::new()
            .select(vec![lit_int(1)])
            .from(STATUS_HISTORY.table_ref())
            .filter(
                STATUS_HISTORY
                    .order_id
                    .expr()
                    .eq(ORDERS.id.expr())
                    .and(STATUS_HISTORY.status.expr().eq(lit_status(status))),
            ),
    )
}
