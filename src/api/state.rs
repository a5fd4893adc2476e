//! API server state

use std::sync::Arc;

use crate::api::ApiError;
use crate::store::MessageStore;
use crate::Error;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Message store
    pub store: Arc<dyn MessageStore>,

    /// Map client input errors to 400 instead of 500
    pub strict_client_errors: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self {
            store,
            strict_client_errors: false,
        }
    }

    pub fn with_strict_client_errors(mut self, strict: bool) -> Self {
        self.strict_client_errors = strict;
        self
    }

    /// Convert a failure into the response reported to the caller
    pub fn reject(&self, err: Error) -> ApiError {
        ApiError::from_error(err, self.strict_client_errors)
    }
}
