//! In-memory message store

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};

use crate::types::{format_naive, Message};
use crate::{Error, Result};

use super::MessageStore;

#[derive(Default)]
struct Rows {
    last_id: i64,
    rows: Vec<(i64, String, NaiveDateTime)>,
}

/// Message store kept in process memory.
///
/// Ids start at 1 and increase by one per insert. Marking the store
/// unavailable makes every call fail the way an unreachable database would.
pub struct MemoryMessageStore {
    rows: Mutex<Rows>,
    available: AtomicBool,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Rows::default()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::unavailable("connection refused"))
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Rows>> {
        self.rows
            .lock()
            .map_err(|_| Error::internal("message store lock poisoned"))
    }
}

impl Default for MemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn list_messages(&self) -> Result<Vec<Message>> {
        self.check_available()?;
        let guard = self.lock()?;

        let mut rows: Vec<_> = guard.rows.iter().collect();
        rows.sort_by(|a, b| (b.2, b.0).cmp(&(a.2, a.0)));

        Ok(rows
            .into_iter()
            .map(|(id, content, created_at)| Message {
                id: *id,
                content: content.clone(),
                created_at: format_naive(created_at),
            })
            .collect())
    }

    async fn create_message(&self, content: &str) -> Result<i64> {
        self.check_available()?;
        let mut guard = self.lock()?;

        guard.last_id += 1;
        let id = guard.last_id;
        guard
            .rows
            .push((id, content.to_string(), Local::now().naive_local()));
        Ok(id)
    }
}
