use std::sync::Arc;

use cookorder_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cookorder_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Dish photo bucket.
    pub storage: Arc<dyn ObjectStore>,
}
