//! # Schema Bootstrap
//!
//! Creates the `user` table when it does not exist yet. The DDL differs per
//! dialect; both enforce email uniqueness so concurrent registrations cannot
//! both succeed.

use super::{DbPool, SQLITE_BACKEND};
use crate::{AppError, Result};
use tracing::debug;

const MYSQL_SCHEMA: &[&str] = &[r#"
CREATE TABLE IF NOT EXISTS user (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    address VARCHAR(255) NOT NULL,
    telp BIGINT NOT NULL,
    email VARCHAR(255) NOT NULL,
    password VARCHAR(255) NOT NULL,
    role VARCHAR(32) NOT NULL DEFAULT '3',
    token VARCHAR(255) NOT NULL,
    UNIQUE KEY uq_user_email (email),
    KEY idx_user_role (role)
)
"#];

const SQLITE_SCHEMA: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    address TEXT NOT NULL,
    telp INTEGER NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT '3',
    token TEXT NOT NULL
)
"#,
    "CREATE INDEX IF NOT EXISTS idx_user_role ON user (role)",
];

/// Run the dialect-appropriate `CREATE TABLE IF NOT EXISTS` statements.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    let mut conn = pool
        .acquire()
        .await
        .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

    let backend = conn.backend_name().to_string();
    let statements = if backend == SQLITE_BACKEND {
        SQLITE_SCHEMA
    } else {
        MYSQL_SCHEMA
    };

    debug!("Ensuring user schema for {}", backend);
    for statement in statements {
        sqlx::query(statement)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::Internal(format!("Schema setup failed: {}", e)))?;
    }

    Ok(())
}
