//! PostgreSQL message store
//!
//! There is no pool: every call connects, runs one statement and closes the
//! connection again.

use std::future::Future;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};

use crate::types::Message;
use crate::Result;

use super::MessageStore;

const LIST_MESSAGES_SQL: &str = "SELECT id::BIGINT AS id, content, COALESCE(created_at::TEXT, '') AS created_at \
     FROM messages \
     ORDER BY messages.created_at DESC, messages.id DESC";

const INSERT_MESSAGE_SQL: &str = "INSERT INTO messages (content) VALUES ($1) RETURNING id::BIGINT";

pub struct PgMessageStore {
    options: PgConnectOptions,
}

impl PgMessageStore {
    pub fn new(host: &str, port: u16, database: &str, user: &str, password: &str) -> Self {
        let options = PgConnectOptions::new()
            .host(host)
            .port(port)
            .database(database)
            .username(user)
            .password(password);
        Self::with_options(options)
    }

    /// Build from a `postgres://` URL.
    pub fn from_url(url: &str) -> Result<Self> {
        let options: PgConnectOptions = url.parse()?;
        Ok(Self::with_options(options))
    }

    pub fn with_options(options: PgConnectOptions) -> Self {
        Self { options }
    }

    async fn connect(&self) -> Result<PgConnection> {
        let conn = self.options.connect().await?;
        Ok(conn)
    }
}

/// Await the connection close once the statement has already succeeded.
///
/// A failed close is logged and does not discard `value`: a committed insert
/// must still be reported as created.
async fn finish_connection<T, F>(value: T, close: F) -> T
where
    F: Future<Output = std::result::Result<(), sqlx::Error>>,
{
    if let Err(err) = close.await {
        tracing::warn!(error = %err, "failed to close database connection");
    }
    value
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn list_messages(&self) -> Result<Vec<Message>> {
        let mut conn = self.connect().await?;

        let messages = sqlx::query_as::<_, Message>(LIST_MESSAGES_SQL)
            .fetch_all(&mut conn)
            .await?;

        let messages = finish_connection(messages, conn.close()).await;
        tracing::debug!(count = messages.len(), "listed messages");
        Ok(messages)
    }

    async fn create_message(&self, content: &str) -> Result<i64> {
        let mut conn = self.connect().await?;

        let mut tx = conn.begin().await?;
        let id: i64 = sqlx::query_scalar(INSERT_MESSAGE_SQL)
            .bind(content)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        let id = finish_connection(id, conn.close()).await;
        tracing::debug!(id, "inserted message");
        Ok(id)
    }
}
