use std::sync::Arc;

use sqlrs::drivers::{InMemoryTestDriver, InMemoryTestResponseBuilder};
use sqlrs::error::SqlRsError;
use sqlrs::mapping::{ColumnAlias, ExactName};
use sqlrs::traits::DatabaseDriver;
use sqlrs::{
    ColumnType, ColumnTypes, FromRow, PlaceholderStyle, RowProcessor, SqlRsClient, SqlValue,
    Statement, TargetType, UnmatchedColumn,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Default, PartialEq)]
struct User {
    user_name: String,
    user_age: i32,
    email: Option<String>,
}

impl FromRow for User {
    fn target_type() -> TargetType<Self> {
        TargetType::new("User")
            .property("userName", |u: &mut User, v| u.user_name = v)
            .property("userAge", |u: &mut User, v| u.user_age = v)
            .property("email", |u: &mut User, v| u.email = v)
    }
}

fn client_for(driver: &Arc<InMemoryTestDriver>) -> SqlRsClient {
    let driver: Arc<dyn DatabaseDriver> = Arc::clone(driver) as Arc<dyn DatabaseDriver>;
    SqlRsClient::with_driver(driver)
}

#[tokio::test]
async fn test_list_expands_sequences_and_maps_rows() {
    init_logs();
    let in_memory_test_driver = Arc::new(
        InMemoryTestDriver::new().with_response(
            InMemoryTestResponseBuilder::new()
                .columns(&["user_name", "user_age", "email"])
                .row(vec!["Alice".into(), 30.into(), "alice@example.com".into()])
                .row(vec!["Bob".into(), 41.into(), SqlValue::Null])
                .build(),
        ),
    );
    let querier = client_for(&in_memory_test_driver).querier();

    let users = querier
        .list(
            Statement::new(
                "SELECT user_name, user_age, email FROM users \
                 WHERE id IN (:ids) AND status IN (:statuses)",
            )
            .bind("ids", vec![1, 2, 3])
            .bind("statuses", ["active", "invited"]),
            &RowProcessor::<User>::for_type(),
        )
        .await
        .unwrap();

    in_memory_test_driver.assert_last_query(
        "SELECT user_name, user_age, email FROM users WHERE id IN (?,?,?) AND status IN (?,?)",
        &[
            SqlValue::Int32(1),
            SqlValue::Int32(2),
            SqlValue::Int32(3),
            SqlValue::from("active"),
            SqlValue::from("invited"),
        ],
    );
    in_memory_test_driver.assert_query_count(1);

    assert_eq!(
        users,
        vec![
            User {
                user_name: "Alice".to_string(),
                user_age: 30,
                email: Some("alice@example.com".to_string()),
            },
            User {
                user_name: "Bob".to_string(),
                user_age: 41,
                email: None,
            },
        ]
    );
}

#[tokio::test]
async fn test_numbered_placeholders() {
    init_logs();
    let in_memory_test_driver = Arc::new(InMemoryTestDriver::new());
    let querier = client_for(&in_memory_test_driver)
        .placeholder_style(PlaceholderStyle::Numbered)
        .querier();

    let result = querier
        .execute(
            Statement::new("DELETE FROM users WHERE id IN (:ids) OR name = :name")
                .bind("ids", vec![7i64, 8])
                .bind("name", "Carol"),
        )
        .await
        .unwrap();

    assert!(result.is_empty());
    in_memory_test_driver.assert_last_query(
        "DELETE FROM users WHERE id IN ($1,$2) OR name = $3",
        &[SqlValue::Int64(7), SqlValue::Int64(8), SqlValue::from("Carol")],
    );
}

#[tokio::test]
async fn test_unbound_parameter_is_not_executed() {
    init_logs();
    let in_memory_test_driver = Arc::new(InMemoryTestDriver::new());
    let querier = client_for(&in_memory_test_driver).querier();

    let err = querier
        .execute(Statement::new("SELECT * FROM users WHERE id = :id"))
        .await
        .unwrap_err();

    assert!(matches!(err, SqlRsError::UnboundParameter(ref name) if name == "id"));
    in_memory_test_driver.assert_query_count(0);
}

#[tokio::test]
async fn test_single_requires_exactly_one_row() {
    init_logs();
    let in_memory_test_driver = Arc::new(
        InMemoryTestDriver::new()
            .with_response(
                InMemoryTestResponseBuilder::new()
                    .columns(&["user_name"])
                    .row(vec!["Alice".into()])
                    .build(),
            )
            .with_response(InMemoryTestResponseBuilder::new().columns(&["user_name"]).build()),
    );
    let querier = client_for(&in_memory_test_driver).querier();
    let processor = RowProcessor::<User>::for_type();

    let user = querier
        .single(
            Statement::new("SELECT user_name FROM users WHERE id = :id").bind("id", 1),
            &processor,
        )
        .await
        .unwrap();
    assert_eq!(user.user_name, "Alice");

    let err = querier
        .single(
            Statement::new("SELECT user_name FROM users WHERE id = :id").bind("id", 2),
            &processor,
        )
        .await
        .unwrap_err();
    match err {
        SqlRsError::UnexpectedRowCount { expected, actual } => {
            assert_eq!(expected, 1);
            assert_eq!(actual, 0);
        }
        _ => panic!("Expected UnexpectedRowCount error"),
    }
}

#[tokio::test]
async fn test_optional_and_count() {
    init_logs();
    let in_memory_test_driver = Arc::new(
        InMemoryTestDriver::new()
            .with_response(InMemoryTestResponseBuilder::new().columns(&["user_name"]).build())
            .with_response(
                InMemoryTestResponseBuilder::new()
                    .columns(&["count"])
                    .row(vec![SqlValue::Int64(12)])
                    .build(),
            ),
    );
    let querier = client_for(&in_memory_test_driver).querier();

    let missing = querier
        .optional(
            Statement::new("SELECT user_name FROM users WHERE id = :id").bind("id", 99),
            &RowProcessor::<User>::for_type(),
        )
        .await
        .unwrap();
    assert!(missing.is_none());

    let count = querier
        .count(Statement::new("SELECT COUNT(*) AS count FROM users WHERE age > :age").bind("age", 18))
        .await
        .unwrap();
    assert_eq!(count, 12);

    let queries = in_memory_test_driver.recorded_queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[1].sql, "SELECT COUNT(*) AS count FROM users WHERE age > ?");
}

#[tokio::test]
async fn test_unmatched_column_policy() {
    init_logs();
    let response = InMemoryTestResponseBuilder::new()
        .columns(&["user_name", "last_login"])
        .row(vec!["Alice".into(), "2015-08-03".into()])
        .build();
    let in_memory_test_driver =
        Arc::new(InMemoryTestDriver::new().with_default_response(response));
    let querier = client_for(&in_memory_test_driver).querier();

    let err = querier
        .list(
            Statement::new("SELECT user_name, last_login FROM users"),
            &RowProcessor::<User>::for_type(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SqlRsError::NoMatchingProperty { ref column, .. } if column == "last_login"
    ));

    let users = querier
        .list(
            Statement::new("SELECT user_name, last_login FROM users"),
            &RowProcessor::<User>::for_type().unmatched_columns(UnmatchedColumn::Ignore),
        )
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_name, "Alice");
}

#[tokio::test]
async fn test_column_types_and_aliases() {
    init_logs();
    let in_memory_test_driver = Arc::new(
        InMemoryTestDriver::new().with_response(
            InMemoryTestResponseBuilder::new()
                .columns(&["login", "age_text"])
                .row(vec!["dave".into(), "52".into()])
                .build(),
        ),
    );
    let querier = client_for(&in_memory_test_driver).querier();

    let processor = RowProcessor::<User>::for_type()
        .column_types(ColumnTypes::empty().with("age_text", ColumnType::Int32))
        .strategies(vec![
            Arc::new(
                ColumnAlias::new()
                    .alias("login", "userName")
                    .alias("age_text", "userAge"),
            ),
            Arc::new(ExactName),
        ]);

    let user = querier
        .single(Statement::new("SELECT login, age_text FROM accounts"), &processor)
        .await
        .unwrap();

    assert_eq!(user.user_name, "dave");
    assert_eq!(user.user_age, 52);
    assert_eq!(user.email, None);
}
