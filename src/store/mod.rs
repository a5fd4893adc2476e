//! Message persistence
//!
//! Handlers talk to a [`MessageStore`]; the PostgreSQL backend opens a fresh
//! connection per call, the in-memory backend serves tests and local demos.

use std::sync::Arc;

use async_trait::async_trait;

use crate::types::Message;
use crate::Result;

pub mod memory;
pub mod postgres;

pub use memory::MemoryMessageStore;
pub use postgres::PgMessageStore;

/// Message store trait
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// All messages, newest first
    async fn list_messages(&self) -> Result<Vec<Message>>;

    /// Insert a message and return its assigned id
    async fn create_message(&self, content: &str) -> Result<i64>;
}

/// Store configuration
#[derive(Clone)]
pub enum StoreConfig {
    Postgres {
        host: String,
        port: u16,
        name: String,
        user: String,
        password: String,
    },
    Memory,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreConfig::Postgres {
                host,
                port,
                name,
                user,
                ..
            } => f
                .debug_struct("Postgres")
                .field("host", host)
                .field("port", port)
                .field("name", name)
                .field("user", user)
                .finish_non_exhaustive(),
            StoreConfig::Memory => f.write_str("Memory"),
        }
    }
}

/// Create message store from config
pub fn create_store(config: StoreConfig) -> Arc<dyn MessageStore> {
    match config {
        StoreConfig::Postgres {
            host,
            port,
            name,
            user,
            password,
        } => Arc::new(PgMessageStore::new(&host, port, &name, &user, &password)),
        StoreConfig::Memory => Arc::new(MemoryMessageStore::new()),
    }
}
