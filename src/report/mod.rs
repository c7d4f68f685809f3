//! Report operations: plan, execute, map.
//!
//! [`ReportService`] is the caller-facing facade. Each operation builds its
//! logical query through a pure planner, runs it through the execution
//! gateway, and decodes the rows into typed projections. The service holds
//! no mutable state; concurrent invocations are safe whenever the gateway's
//! are.

pub mod closure;
pub mod expr;
pub mod planner;
pub mod projection;
pub mod row;

pub use projection::{
    FromRow, OrderDayStatistic, OrderShortInfo, OrderWithTotalPrice, SentToStoreOrder,
    StoreStatistic,
};
pub use row::{MappingError, MappingResult, Row};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{ReportError, ReportResult};
use crate::gateway::ExecutionGateway;
use crate::sql::Query;

/// The analytical report operations over the order-fulfillment schema.
pub struct ReportService<G> {
    gateway: G,
}

impl<G: ExecutionGateway> ReportService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Orders that were sent to the given store, newest first, each with
    /// its aggregated total price.
    ///
    /// An unknown store id yields an empty list.
    pub async fn sent_to_store_orders(
        &self,
        store_id: Uuid,
    ) -> ReportResult<Vec<SentToStoreOrder>> {
        let query = planner::sent_to_store_orders(store_id);
        self.run("sent_to_store_orders", format!("store_id={store_id}"), &query)
            .await
    }

    /// Terminal status counts per store, restricted to stores whose total
    /// order value lies strictly between the bounds.
    ///
    /// A degenerate range yields an empty list.
    pub async fn store_statistics(
        &self,
        lower_bound: Decimal,
        upper_bound: Decimal,
    ) -> ReportResult<Vec<StoreStatistic>> {
        let query = planner::store_statistics(lower_bound, upper_bound);
        self.run(
            "store_statistics",
            format!("lower_bound={lower_bound}, upper_bound={upper_bound}"),
            &query,
        )
        .await
    }

    /// Orders whose product categories all fall within the supplied names.
    ///
    /// An empty name list yields an empty list.
    pub async fn orders_in_categories(
        &self,
        category_names: &[String],
    ) -> ReportResult<Vec<OrderShortInfo>> {
        let query = planner::orders_in_categories(category_names);
        self.run(
            "orders_in_categories",
            format!("category_names={category_names:?}"),
            &query,
        )
        .await
    }

    /// Orders containing a product under the named category's subtree,
    /// each with the total price over all of its items.
    ///
    /// An unknown category name yields an empty list.
    pub async fn orders_in_category_tree(
        &self,
        category_name: &str,
    ) -> ReportResult<Vec<OrderWithTotalPrice>> {
        let query = planner::orders_in_category_tree(category_name);
        self.run(
            "orders_in_category_tree",
            format!("category_name={category_name}"),
            &query,
        )
        .await
    }

    /// Daily revenue inside the requested range with whole-dataset share
    /// and day-over-day delta, newest day first.
    ///
    /// An inverted range yields an empty list; days without orders are
    /// absent from the output.
    pub async fn daily_statistics(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ReportResult<Vec<OrderDayStatistic>> {
        let query = planner::daily_statistics(start_date, end_date);
        self.run(
            "daily_statistics",
            format!("start_date={start_date}, end_date={end_date}"),
            &query,
        )
        .await
    }

    /// Identifiers of every category in the named category's subtree,
    /// resolved through the recursive closure query.
    pub async fn descendant_category_ids(&self, category_name: &str) -> ReportResult<Vec<Uuid>> {
        const REPORT: &str = "descendant_category_ids";
        let query = closure::descendant_ids_query(category_name);
        let output = self
            .gateway
            .execute(&query)
            .await
            .map_err(|source| ReportError::QueryExecution {
                report: REPORT,
                params: format!("category_name={category_name}"),
                source,
            })?;

        output
            .rows
            .iter()
            .map(|values| {
                let row = Row::new(values);
                row.require_width(1).and_then(|()| row.uuid(0))
            })
            .collect::<MappingResult<Vec<_>>>()
            .map_err(|source| ReportError::ResultMapping {
                report: REPORT,
                source,
            })
    }

    /// Execute one planned query and decode every row.
    async fn run<T: FromRow>(
        &self,
        report: &'static str,
        params: String,
        query: &Query,
    ) -> ReportResult<Vec<T>> {
        let output = self
            .gateway
            .execute(query)
            .await
            .map_err(|source| ReportError::QueryExecution {
                report,
                params,
                source,
            })?;

        output
            .rows
            .iter()
            .map(|values| T::decode(values))
            .collect::<MappingResult<Vec<_>>>()
            .map_err(|source| ReportError::ResultMapping { report, source })
    }
}
