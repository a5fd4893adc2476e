//! message-board - two small HTTP demo services
//!
//! - `page`: a static welcome page stamped with the server time
//! - `api`: a JSON message API over a PostgreSQL `messages` table
//!
//! Both binaries share configuration, logging and error handling from here.

pub mod api;
pub mod config;
pub mod error;
pub mod page;
pub mod store;
pub mod telemetry;
pub mod types;

pub use error::{Error, Result};
