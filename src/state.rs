//! Application state management
//!
//! Contains shared state accessible across all handlers. All storage is
//! backed by PostgreSQL; handlers hold no mutable state of their own.

use crate::db::{FormService, ResponseService};
use deadpool_postgres::Pool;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Database connection pool (required)
    pub db_pool: Pool,

    /// Form service for database operations
    pub forms: FormService,

    /// Response service for database operations
    pub responses: ResponseService,
}

impl AppState {
    /// Create new application state around a verified database pool
    pub fn new(pool: Pool) -> Self {
        let forms = FormService::new(pool.clone());
        let responses = ResponseService::new(pool.clone());

        Self {
            db_pool: pool,
            forms,
            responses,
        }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
