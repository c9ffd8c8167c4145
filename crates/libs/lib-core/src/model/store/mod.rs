//! # Database Store
//!
//! Connection pool, schema bootstrap and the [`UserStore`] implementations.

// region: --- Modules
pub mod memory_store;
pub mod models;
pub mod schema;
pub mod sql_store;
pub mod user_store;
// endregion: --- Modules

// region: --- Re-exports
pub use memory_store::MemoryUserStore;
pub use models::{User, UserForCreate, DEFAULT_ROLE};
pub use schema::ensure_schema;
pub use sql_store::SqlUserStore;
pub use user_store::UserStore;
// endregion: --- Re-exports

// region: --- Types and Functions
use crate::{AppError, Config, Result};
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use tracing::info;

/// Pool over whichever driver the connection URL names (MySQL or SQLite).
pub type DbPool = AnyPool;

/// `AnyConnection::backend_name()` of the SQLite driver.
pub(crate) const SQLITE_BACKEND: &str = "SQLite";

/// Create a new connection pool from the configured database URL.
///
/// An in-memory SQLite database lives and dies with its connection, so such a
/// URL gets a single, never-recycled connection.
pub async fn create_pool(config: &Config) -> Result<DbPool> {
    sqlx::any::install_default_drivers();

    let url = config.database_url();
    let mut options = AnyPoolOptions::new().acquire_timeout(config.request_timeout());
    if url.starts_with("sqlite:") && url.contains(":memory:") {
        options = options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = options
        .connect(&url)
        .await
        .map_err(|e| AppError::StoreUnavailable(format!("Failed to connect: {}", e)))?;

    info!("Connected to {} database", url.split(':').next().unwrap_or("unknown"));

    Ok(pool)
}
// endregion: --- Types and Functions
