//! Tests against a live PostgreSQL server.
//!
//! Run with `MESSAGE_BOARD_TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.
//! The database must already contain the `messages` table from `sql/schema.sql`.

use message_board::store::{MessageStore, PgMessageStore};

fn store() -> PgMessageStore {
    let url = std::env::var("MESSAGE_BOARD_TEST_DATABASE_URL")
        .expect("MESSAGE_BOARD_TEST_DATABASE_URL must be set");
    PgMessageStore::from_url(&url).unwrap()
}

#[tokio::test]
#[ignore]
async fn insert_then_list_newest_first() {
    let store = store();

    let first = store.create_message("pg-first").await.unwrap();
    let second = store.create_message("pg-second").await.unwrap();
    assert!(second > first);

    let messages = store.list_messages().await.unwrap();
    let pos_first = messages.iter().position(|m| m.id == first).unwrap();
    let pos_second = messages.iter().position(|m| m.id == second).unwrap();
    assert!(pos_second < pos_first);
    assert_eq!(messages[pos_second].content, "pg-second");
    assert!(!messages[pos_second].created_at.is_empty());
}

#[tokio::test]
#[ignore]
async fn list_is_stable_without_writes() {
    let store = store();
    store.create_message("pg-stable").await.unwrap();

    let a = store.list_messages().await.unwrap();
    let b = store.list_messages().await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
#[ignore]
async fn null_created_at_does_not_fail_the_list() {
    use sqlx::{Connection, PgConnection};

    let url = std::env::var("MESSAGE_BOARD_TEST_DATABASE_URL")
        .expect("MESSAGE_BOARD_TEST_DATABASE_URL must be set");
    let mut conn = PgConnection::connect(&url).await.unwrap();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO messages (content, created_at) VALUES ('pg-null', NULL) RETURNING id::BIGINT",
    )
    .fetch_one(&mut conn)
    .await
    .unwrap();
    conn.close().await.unwrap();

    let messages = store().list_messages().await.unwrap();
    let row = messages.iter().find(|m| m.id == id).unwrap();
    assert_eq!(row.created_at, "");
}
