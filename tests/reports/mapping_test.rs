#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate};
    use magpie::domain::OrderStatus;
    use magpie::report::{
        FromRow, MappingError, OrderDayStatistic, OrderShortInfo, OrderWithTotalPrice,
        SentToStoreOrder, StoreStatistic,
    };
    use rust_decimal::Decimal;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_sent_to_store_order_decodes() {
        let id = Uuid::new_v4();
        let decoded = SentToStoreOrder::decode(&[
            json!(id.to_string()),
            json!("2024-03-01T12:00:00+03:00"),
            json!("1250.50"),
        ])
        .unwrap();

        assert_eq!(decoded.id, id);
        assert_eq!(
            decoded.created_at,
            DateTime::parse_from_rfc3339("2024-03-01T12:00:00+03:00").unwrap()
        );
        assert_eq!(decoded.total_price, Decimal::new(125050, 2));
    }

    #[test]
    fn test_store_statistic_decodes_counts() {
        let store_id = Uuid::new_v4();
        let decoded = StoreStatistic::decode(&[
            json!(store_id.to_string()),
            json!(12),
            json!(3),
            json!(0),
        ])
        .unwrap();

        assert_eq!(
            decoded,
            StoreStatistic {
                store_id,
                completed_count: 12,
                canceled_count: 3,
                rejected_count: 0,
            }
        );
    }

    #[test]
    fn test_order_with_total_price_nests_short_info() {
        let id = Uuid::new_v4();
        let store_id = Uuid::new_v4();
        let decoded = OrderWithTotalPrice::decode(&[
            json!(id.to_string()),
            json!(store_id.to_string()),
            json!("IN_PROCESSING"),
            json!(99.9),
        ])
        .unwrap();

        assert_eq!(
            decoded.short_info,
            OrderShortInfo {
                id,
                store_id,
                status: OrderStatus::InProcessing,
            }
        );
        assert_eq!(decoded.total_price, Decimal::new(999, 1));
    }

    #[test]
    fn test_day_statistic_decodes_with_diff() {
        let decoded = OrderDayStatistic::decode(&[
            json!("2024-01-01"),
            json!("100"),
            json!("25.00"),
            json!("-200"),
        ])
        .unwrap();

        assert_eq!(decoded.day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(decoded.total_amount, Decimal::from(100));
        assert_eq!(decoded.percentage, Decimal::new(2500, 2));
        assert_eq!(decoded.diff, Some(Decimal::from(-200)));
    }

    #[test]
    fn test_most_recent_day_has_absent_diff() {
        let decoded = OrderDayStatistic::decode(&[
            json!("2024-01-02"),
            json!("300"),
            json!("75.00"),
            json!(null),
        ])
        .unwrap();
        assert_eq!(decoded.diff, None);
    }

    #[test]
    fn test_arity_mismatch_is_reported() {
        let err = SentToStoreOrder::decode(&[json!("too"), json!("short")]).unwrap_err();
        assert_eq!(
            err,
            MappingError::Arity {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_type_mismatch_names_the_column() {
        let id = Uuid::new_v4();
        let err = OrderShortInfo::decode(&[
            json!(id.to_string()),
            json!(id.to_string()),
            json!("NOT_A_STATUS"),
        ])
        .unwrap_err();

        match err {
            MappingError::Decode {
                index, expected, ..
            } => {
                assert_eq!(index, 2);
                assert_eq!(expected, "order status");
            }
            other => panic!("expected a decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_decimal_accepts_numbers_and_strings() {
        let id = Uuid::new_v4();
        let from_number = SentToStoreOrder::decode(&[
            json!(id.to_string()),
            json!("2024-03-01T12:00:00+00:00"),
            json!(42.5),
        ])
        .unwrap();
        let from_string = SentToStoreOrder::decode(&[
            json!(id.to_string()),
            json!("2024-03-01T12:00:00+00:00"),
            json!("42.5"),
        ])
        .unwrap();
        assert_eq!(from_number.total_price, from_string.total_price);
    }

    #[test]
    fn test_projections_serialize() {
        // Projections are response records; they must serialize cleanly
        let statistic = StoreStatistic {
            store_id: Uuid::nil(),
            completed_count: 1,
            canceled_count: 0,
            rejected_count: 2,
        };
        let json = serde_json::to_value(&statistic).unwrap();
        assert_eq!(json["completed_count"], json!(1));
        assert_eq!(json["rejected_count"], json!(2));
    }
}
