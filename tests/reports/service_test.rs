#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use magpie::domain::OrderStatus;
    use magpie::gateway::{ExecutionGateway, GatewayError, GatewayResult, QueryOutput};
    use magpie::sql::{Dialect, Query};
    use magpie::{ReportError, ReportService};
    use rust_decimal::Decimal;
    use serde_json::json;
    use uuid::Uuid;

    /// Gateway double: records the rendered SQL it was asked to run and
    /// replays canned responses.
    struct FakeGateway {
        responses: Mutex<VecDeque<GatewayResult<QueryOutput>>>,
        executed: Mutex<Vec<String>>,
    }

    impl FakeGateway {
        fn returning(output: QueryOutput) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from([Ok(output)])),
                executed: Mutex::new(vec![]),
            }
        }

        fn failing(error: GatewayError) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from([Err(error)])),
                executed: Mutex::new(vec![]),
            }
        }

        fn executed_sql(&self) -> Vec<String> {
            self.executed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ExecutionGateway for FakeGateway {
        fn dialect(&self) -> Dialect {
            Dialect::Postgres
        }

        async fn execute(&self, query: &Query) -> GatewayResult<QueryOutput> {
            self.executed
                .lock()
                .unwrap()
                .push(query.to_sql(self.dialect()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(QueryOutput::default()))
        }
    }

    #[tokio::test]
    async fn test_sent_to_store_orders_maps_rows_in_gateway_order() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let output = QueryOutput::new(
            vec!["id", "created_at", "total_price"],
            vec![
                vec![
                    json!(first.to_string()),
                    json!("2024-03-02T09:00:00+00:00"),
                    json!("500.00"),
                ],
                vec![
                    json!(second.to_string()),
                    json!("2024-03-01T09:00:00+00:00"),
                    json!("120.00"),
                ],
            ],
        );
        let store_id = Uuid::new_v4();
        let service = ReportService::new(FakeGateway::returning(output));

        let orders = service.sent_to_store_orders(store_id).await.unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, first);
        assert_eq!(orders[0].total_price, Decimal::from(500));
        assert_eq!(orders[1].id, second);

        // The planner-built query reached the gateway unchanged
        let executed = service.gateway().executed_sql();
        assert_eq!(executed.len(), 1);
        assert!(executed[0].contains(&format!("\"o\".\"store_id\" = '{store_id}'")));
        assert!(executed[0].contains("ORDER BY \"o\".\"created_at\" DESC"));
    }

    #[tokio::test]
    async fn test_unknown_store_yields_empty_result() {
        let service = ReportService::new(FakeGateway::returning(QueryOutput::default()));
        let orders = service.sent_to_store_orders(Uuid::new_v4()).await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_store_statistics_decodes_counts() {
        let store_id = Uuid::new_v4();
        let output = QueryOutput::new(
            vec!["store_id", "completed_count", "canceled_count", "rejected_count"],
            vec![vec![json!(store_id.to_string()), json!(7), json!(2), json!(1)]],
        );
        let service = ReportService::new(FakeGateway::returning(output));

        let stats = service
            .store_statistics(Decimal::from(100), Decimal::from(200))
            .await
            .unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].store_id, store_id);
        assert_eq!(stats[0].completed_count, 7);
        assert_eq!(stats[0].canceled_count, 2);
        assert_eq!(stats[0].rejected_count, 1);
    }

    #[tokio::test]
    async fn test_daily_statistics_maps_trend_rows() {
        // Daily totals {2024-01-01: 100, 2024-01-02: 300}: the older day's
        // share is 25% and it diffs -200 against its successor; the most
        // recent day has no successor
        let output = QueryOutput::new(
            vec!["day", "total_amount", "percentage", "diff"],
            vec![
                vec![json!("2024-01-02"), json!("300"), json!("75.00"), json!(null)],
                vec![json!("2024-01-01"), json!("100"), json!("25.00"), json!("-200")],
            ],
        );
        let service = ReportService::new(FakeGateway::returning(output));

        let days = service
            .daily_statistics(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(days[0].diff, None);
        assert_eq!(days[1].percentage, Decimal::new(2500, 2));
        assert_eq!(days[1].diff, Some(Decimal::from(-200)));
    }

    #[tokio::test]
    async fn test_orders_in_categories_renders_names() {
        let service = ReportService::new(FakeGateway::returning(QueryOutput::default()));
        let names = vec!["Electronics".to_string(), "Books".to_string()];

        let orders = service.orders_in_categories(&names).await.unwrap();
        assert!(orders.is_empty());

        let executed = service.gateway().executed_sql();
        assert!(executed[0].contains("BOOL_AND(\"c\".\"name\" IN ('Electronics', 'Books'))"));
    }

    #[tokio::test]
    async fn test_orders_in_category_tree_maps_nested_projection() {
        let id = Uuid::new_v4();
        let store_id = Uuid::new_v4();
        let output = QueryOutput::new(
            vec!["id", "store_id", "status", "total_price"],
            vec![vec![
                json!(id.to_string()),
                json!(store_id.to_string()),
                json!("COMPLETED"),
                json!("810.00"),
            ]],
        );
        let service = ReportService::new(FakeGateway::returning(output));

        let orders = service.orders_in_category_tree("Electronics").await.unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].short_info.id, id);
        assert_eq!(orders[0].short_info.status, OrderStatus::Completed);
        assert_eq!(orders[0].total_price, Decimal::from(810));

        let executed = service.gateway().executed_sql();
        assert!(executed[0].starts_with("WITH RECURSIVE"));
    }

    #[tokio::test]
    async fn test_descendant_category_ids() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let output = QueryOutput::new(
            vec!["id"],
            vec![
                vec![json!(first.to_string())],
                vec![json!(second.to_string())],
            ],
        );
        let service = ReportService::new(FakeGateway::returning(output));

        let ids = service.descendant_category_ids("Electronics").await.unwrap();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn test_gateway_failure_carries_report_and_params() {
        let service = ReportService::new(FakeGateway::failing(GatewayError::query_failed(
            "42601",
            "syntax error",
        )));

        let err = service
            .store_statistics(Decimal::from(100), Decimal::from(200))
            .await
            .unwrap_err();

        assert_eq!(err.report(), "store_statistics");
        match err {
            ReportError::QueryExecution { params, source, .. } => {
                assert!(params.contains("lower_bound=100"));
                assert!(!source.is_retriable());
            }
            other => panic!("expected an execution error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_row_is_a_mapping_error() {
        // Three columns where the projection expects four: a
        // query-construction bug that must surface, not be swallowed
        let output = QueryOutput::new(
            vec!["store_id", "completed_count", "canceled_count"],
            vec![vec![json!(Uuid::new_v4().to_string()), json!(1), json!(2)]],
        );
        let service = ReportService::new(FakeGateway::returning(output));

        let err = service
            .store_statistics(Decimal::from(100), Decimal::from(200))
            .await
            .unwrap_err();

        assert_eq!(err.report(), "store_statistics");
        assert!(matches!(err, ReportError::ResultMapping { .. }));
    }
}
