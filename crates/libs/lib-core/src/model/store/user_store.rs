//! # User Store
//!
//! The capability set every user backend provides. Handlers only ever see
//! `Arc<dyn UserStore>`, so tests can swap the SQL store for
//! [`MemoryUserStore`](super::MemoryUserStore).

use super::models::{User, UserForCreate};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every user ordered by id.
    async fn list_all(&self) -> Result<Vec<User>>;

    /// Exact lookup; `AppError::NotFound` on a miss.
    async fn find_by_id(&self, id: i64) -> Result<User>;

    /// Users holding `role`, ordered by id.
    async fn find_by_role(&self, role: &str) -> Result<Vec<User>>;

    /// Duplicate-registration lookup; a miss is `Ok(None)`.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert a new row and return it with its generated id.
    ///
    /// A taken email yields `AppError::EmailTaken`; the check and the insert
    /// are a single atomic step.
    async fn save(&self, user: UserForCreate) -> Result<User>;

    /// Overwrite name, address, telp, email and password of `user.id`.
    ///
    /// Last writer wins.
    async fn update(&self, user: &User) -> Result<()>;

    /// Remove the row; deleting a missing id is not an error.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Pre-authentication lookup by email; `AppError::NotFound` on a miss.
    async fn login(&self, email: &str) -> Result<User>;
}
