//! # SQL User Store
//!
//! [`UserStore`] over a pooled sqlx [`AnyPool`]. Production points it at MySQL;
//! tests run the same queries against in-memory SQLite.
//!
//! All statements use `?` placeholders, which both drivers understand. Every
//! call is bounded by the configured request timeout; an elapsed timeout
//! surfaces as `AppError::StoreUnavailable`. Dropping a call mid-flight hands
//! its connection back to the pool.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::{create_pool, ensure_schema, Config, SqlUserStore, UserStore};
//! # async fn example(config: &Config) -> lib_core::Result<()> {
//! let pool = create_pool(config).await?;
//! ensure_schema(&pool).await?;
//!
//! let store = SqlUserStore::new(pool, config.request_timeout());
//! let found = store.find_by_email("alice@example.com").await?;
//! assert!(found.is_none());
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate};
use super::user_store::UserStore;
use super::{DbPool, SQLITE_BACKEND};
use crate::{AppError, Result};
use async_trait::async_trait;
use sqlx::query_as;
use std::future::Future;
use std::time::Duration;

const SELECT_USER: &str = "SELECT id, name, address, telp, email, password, role, token FROM user";

const INSERT_USER: &str = "INSERT INTO user (name, address, telp, email, password, role, token) \
                           VALUES (?, ?, ?, ?, ?, ?, ?)";

/// SQL-backed user store.
#[derive(Clone)]
pub struct SqlUserStore {
    pool: DbPool,
    timeout: Duration,
}

impl SqlUserStore {
    pub fn new(pool: DbPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Run one database round-trip under the request timeout.
    async fn timed<T, F>(&self, fut: F) -> Result<std::result::Result<T, sqlx::Error>>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.timeout, fut).await.map_err(|_| {
            AppError::StoreUnavailable(format!(
                "store call exceeded {}ms",
                self.timeout.as_millis()
            ))
        })
    }

    /// Insert a row and report its generated id.
    ///
    /// The SQLite driver leaves `last_insert_id` empty, so there the id comes
    /// back through `RETURNING` on the same connection.
    async fn insert(&self, user: &UserForCreate) -> std::result::Result<Option<i64>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;

        if conn.backend_name() == SQLITE_BACKEND {
            let sql = format!("{INSERT_USER} RETURNING id");
            let id: i64 = sqlx::query_scalar(&sql)
                .bind(user.name.as_str())
                .bind(user.address.as_str())
                .bind(user.telp)
                .bind(user.email.as_str())
                .bind(user.password_hash.as_str())
                .bind(user.role.as_str())
                .bind(user.token.as_str())
                .fetch_one(&mut *conn)
                .await?;
            return Ok(Some(id));
        }

        let result = sqlx::query(INSERT_USER)
            .bind(user.name.as_str())
            .bind(user.address.as_str())
            .bind(user.telp)
            .bind(user.email.as_str())
            .bind(user.password_hash.as_str())
            .bind(user.role.as_str())
            .bind(user.token.as_str())
            .execute(&mut *conn)
            .await?;

        Ok(result.last_insert_id())
    }
}

/// Failures that mean "the database is unreachable" rather than "the statement failed".
fn is_unavailable(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed
    )
}

/// Classify an error raised by a read statement.
pub(crate) fn read_err(err: sqlx::Error) -> AppError {
    if is_unavailable(&err) {
        return AppError::StoreUnavailable(err.to_string());
    }
    match err {
        sqlx::Error::RowNotFound => AppError::NotFound("User not found".to_string()),
        sqlx::Error::Database(db_err) => {
            AppError::Internal(format!("Database error: {}", db_err.message()))
        }
        _ => AppError::Internal(format!("Database error: {}", err)),
    }
}

/// Classify an error raised by a write statement.
pub(crate) fn write_err(err: sqlx::Error) -> AppError {
    if is_unavailable(&err) {
        return AppError::StoreUnavailable(err.to_string());
    }
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::EmailTaken(db_err.message().to_string())
        }
        sqlx::Error::Database(db_err) => AppError::Persist(db_err.message().to_string()),
        _ => AppError::Persist(err.to_string()),
    }
}

#[async_trait]
impl UserStore for SqlUserStore {
    async fn list_all(&self) -> Result<Vec<User>> {
        let sql = format!("{SELECT_USER} ORDER BY id");
        self.timed(query_as::<_, User>(&sql).fetch_all(&self.pool))
            .await?
            .map_err(read_err)
    }

    async fn find_by_id(&self, id: i64) -> Result<User> {
        let sql = format!("{SELECT_USER} WHERE id = ?");
        self.timed(query_as::<_, User>(&sql).bind(id).fetch_optional(&self.pool))
            .await?
            .map_err(read_err)?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    async fn find_by_role(&self, role: &str) -> Result<Vec<User>> {
        let sql = format!("{SELECT_USER} WHERE role = ? ORDER BY id");
        self.timed(query_as::<_, User>(&sql).bind(role).fetch_all(&self.pool))
            .await?
            .map_err(read_err)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE email = ?");
        self.timed(query_as::<_, User>(&sql).bind(email).fetch_optional(&self.pool))
            .await?
            .map_err(read_err)
    }

    async fn save(&self, user: UserForCreate) -> Result<User> {
        let id = self
            .timed(self.insert(&user))
            .await?
            .map_err(write_err)?
            .ok_or_else(|| AppError::Persist("database did not report the new id".to_string()))?;

        Ok(user.into_user(id))
    }

    async fn update(&self, user: &User) -> Result<()> {
        self.timed(
            sqlx::query(
                "UPDATE user SET name = ?, address = ?, telp = ?, email = ?, password = ? \
                 WHERE id = ?",
            )
            .bind(user.name.as_str())
            .bind(user.address.as_str())
            .bind(user.telp)
            .bind(user.email.as_str())
            .bind(user.password.as_str())
            .bind(user.id)
            .execute(&self.pool),
        )
        .await?
        .map_err(write_err)?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.timed(
            sqlx::query("DELETE FROM user WHERE id = ?")
                .bind(id)
                .execute(&self.pool),
        )
        .await?
        .map_err(write_err)?;

        Ok(())
    }

    async fn login(&self, email: &str) -> Result<User> {
        self.find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
