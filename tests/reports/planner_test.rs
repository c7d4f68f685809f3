#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use magpie::report::planner;
    use magpie::sql::Dialect;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn test_sent_to_store_orders_plan() {
        let store_id = Uuid::new_v4();
        let sql = planner::sent_to_store_orders(store_id).to_sql(Dialect::Postgres);

        assert!(sql.contains("\"o\".\"id\" AS \"id\""));
        assert!(sql.contains("\"o\".\"created_at\" AS \"created_at\""));
        assert!(sql.contains("SUM(\"p\".\"price\" * \"i\".\"quantity\") AS \"total_price\""));
        assert!(sql.contains("FROM \"order\" AS \"o\""));
        assert!(sql.contains(
            "INNER JOIN \"order_item\" AS \"i\" ON \"i\".\"order_id\" = \"o\".\"id\""
        ));
        assert!(sql.contains(
            "INNER JOIN \"product\" AS \"p\" ON \"p\".\"id\" = \"i\".\"product_id\""
        ));
        assert!(sql.contains(&format!("\"o\".\"store_id\" = '{store_id}'")));
        assert!(sql.contains("GROUP BY \"o\".\"id\", \"o\".\"created_at\""));
        assert!(sql.contains("ORDER BY \"o\".\"created_at\" DESC"));
    }

    #[test]
    fn test_sent_to_store_orders_uses_exists_not_history_join() {
        let sql = planner::sent_to_store_orders(Uuid::new_v4()).to_sql(Dialect::Postgres);

        // A re-entered SENT_TO_STORE status must not multiply line totals:
        // the history restriction is a semi-join, never a joined table.
        assert!(sql.contains("EXISTS ("));
        assert!(sql.contains("\"h\".\"status\" = 'SENT_TO_STORE'"));
        assert!(sql.contains("\"h\".\"order_id\" = \"o\".\"id\""));
        assert!(!sql.contains("JOIN \"order_status_history\""));
    }

    #[test]
    fn test_store_statistics_plan() {
        let sql = planner::store_statistics(Decimal::from(100), Decimal::from(200))
            .to_sql(Dialect::Postgres);

        assert!(sql.contains("\"o\".\"store_id\" AS \"store_id\""));
        for (status, alias) in [
            ("COMPLETED", "completed_count"),
            ("CANCELED", "canceled_count"),
            ("REJECTED", "rejected_count"),
        ] {
            assert!(sql.contains(&format!(
                "COUNT(DISTINCT CASE WHEN \"o\".\"status\" = '{status}' THEN \"o\".\"id\" END) AS \"{alias}\""
            )));
        }
        assert!(sql.contains("GROUP BY \"o\".\"store_id\""));
        // Both bounds are strict and the total is not status-filtered
        assert!(sql.contains(
            "HAVING SUM(\"p\".\"price\" * \"i\".\"quantity\") > 100 AND SUM(\"p\".\"price\" * \"i\".\"quantity\") < 200"
        ));
    }

    #[test]
    fn test_store_statistics_sort_is_deterministic() {
        let sql = planner::store_statistics(Decimal::from(100), Decimal::from(200))
            .to_sql(Dialect::Postgres);

        // Combined count descending, then store id as the tie-break
        let order_by = sql.split("ORDER BY").nth(1).expect("has ORDER BY");
        assert!(order_by.contains("DESC, \"o\".\"store_id\" ASC"));
        assert_eq!(order_by.matches("COUNT(DISTINCT").count(), 3);
    }

    #[test]
    fn test_orders_in_categories_plan() {
        let names = vec!["Electronics".to_string(), "Books".to_string()];
        let sql = planner::orders_in_categories(&names).to_sql(Dialect::Postgres);

        assert!(sql.contains("\"o\".\"id\" AS \"id\""));
        assert!(sql.contains("\"o\".\"store_id\" AS \"store_id\""));
        assert!(sql.contains("\"o\".\"status\" AS \"status\""));
        assert!(sql.contains(
            "INNER JOIN \"category\" AS \"c\" ON \"c\".\"id\" = \"p\".\"category_id\""
        ));
        assert!(sql.contains("GROUP BY \"o\".\"id\", \"o\".\"store_id\", \"o\".\"status\""));
        assert!(sql.contains("HAVING BOOL_AND(\"c\".\"name\" IN ('Electronics', 'Books'))"));
    }

    #[test]
    fn test_orders_in_categories_empty_list_keeps_no_group() {
        let sql = planner::orders_in_categories(&[]).to_sql(Dialect::Postgres);
        assert!(sql.contains("HAVING BOOL_AND(FALSE)"));
    }

    #[test]
    fn test_orders_in_categories_mysql_spelling() {
        let names = vec!["Electronics".to_string()];
        let sql = planner::orders_in_categories(&names).to_sql(Dialect::MySql);

        // MySQL has no BOOL_AND; MIN over the 0/1 membership test is the
        // AND-aggregate there
        assert!(sql.contains("HAVING MIN(`c`.`name` IN ('Electronics'))"));
        assert!(sql.contains("FROM `order` AS `o`"));
    }

    #[test]
    fn test_orders_in_category_tree_plan() {
        let sql = planner::orders_in_category_tree("Electronics").to_sql(Dialect::Postgres);

        assert!(sql.starts_with("WITH RECURSIVE \"descendant_category\" (\"id\") AS ("));
        assert!(sql.contains("UNION ALL"));
        assert!(sql.contains("WHERE \"pc\".\"name\" = 'Electronics'"));
        // Matching orders are collapsed before the re-join
        assert!(sql.contains("\"matched_order\" AS ("));
        assert!(sql.contains("SELECT DISTINCT"));
        assert!(sql.contains(
            "INNER JOIN \"descendant_category\" AS \"d\" ON \"d\".\"id\" = \"p\".\"category_id\""
        ));
        // The outer query re-joins the full line set for the matched orders
        assert!(sql.contains(
            "INNER JOIN \"matched_order\" AS \"m\" ON \"m\".\"id\" = \"o\".\"id\""
        ));
        assert!(sql.contains("SUM(\"p\".\"price\" * \"i\".\"quantity\") AS \"total_price\""));
        assert!(sql.contains("GROUP BY \"o\".\"id\", \"o\".\"store_id\", \"o\".\"status\""));
    }

    #[test]
    fn test_orders_in_category_tree_emits_recursive_once() {
        let sql = planner::orders_in_category_tree("Electronics").to_sql(Dialect::Postgres);
        assert_eq!(sql.matches("RECURSIVE").count(), 1);
    }

    #[test]
    fn test_daily_statistics_plan() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let sql = planner::daily_statistics(start, end).to_sql(Dialect::Postgres);

        // Per-day aggregate groups on the date-truncated creation timestamp
        assert!(sql.contains("CAST(\"o\".\"created_at\" AS DATE) AS \"day\""));
        assert!(sql.contains("GROUP BY CAST(\"o\".\"created_at\" AS DATE)"));

        // Share of the whole dataset: windowed total over the unfiltered
        // aggregate, divided then scaled
        assert!(sql.contains(
            "(\"t\".\"total_amount\" / SUM(\"t\".\"total_amount\") OVER ()) * 100 AS \"percentage\""
        ));

        // Delta against the chronologically next day
        assert!(sql.contains(
            "\"t\".\"total_amount\" - LEAD(\"t\".\"total_amount\") OVER (ORDER BY \"t\".\"day\" ASC) AS \"diff\""
        ));

        assert!(sql.contains(
            "WHERE \"dt\".\"day\" BETWEEN DATE '2024-01-01' AND DATE '2024-01-31'"
        ));
        assert!(sql.contains("ORDER BY \"dt\".\"day\" DESC"));
    }

    #[test]
    fn test_daily_statistics_filters_after_windows() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let sql = planner::daily_statistics(start, end).to_sql(Dialect::Postgres);

        // The date-range filter must sit outside the windowed CTE so the
        // percentage denominator spans every day with orders
        let trend_cte_start = sql.find("\"day_trend\" AS (").expect("day_trend cte");
        let where_pos = sql.find("WHERE \"dt\".\"day\" BETWEEN").expect("range filter");
        assert!(where_pos > trend_cte_start);

        let trend_body = &sql[trend_cte_start..where_pos];
        assert!(trend_body.contains("OVER ()"));
        assert!(!trend_body.contains("BETWEEN DATE"));
    }

    #[test]
    fn test_plans_are_deterministic() {
        let store_id = Uuid::new_v4();
        let first = planner::sent_to_store_orders(store_id).to_sql(Dialect::Postgres);
        let second = planner::sent_to_store_orders(store_id).to_sql(Dialect::Postgres);
        assert_eq!(first, second);
    }
}
