//! Core data types

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Wall-clock format shared by the page, the health check and the memory store.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A stored message.
///
/// `created_at` keeps the backend's own text rendering of the timestamp, so
/// its shape depends on the store: PostgreSQL's `::TEXT` drops trailing zero
/// fraction digits (and the fraction entirely when it is zero) and yields an
/// empty string for a NULL timestamp, while the memory store always prints
/// six fraction digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub created_at: String,
}

/// Render a local timestamp the way the service reports times to clients.
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_naive(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time, rendered.
pub fn now_timestamp() -> String {
    format_timestamp(&Local::now())
}
