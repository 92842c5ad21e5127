use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared state handed to every handler via `State<AppState>`.
///
/// Cloning is cheap: the pool is internally reference-counted and the
/// config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: campus_db::DbPool,
    /// Server configuration (JWT settings, timeouts, CORS origins).
    pub config: Arc<ServerConfig>,
}
