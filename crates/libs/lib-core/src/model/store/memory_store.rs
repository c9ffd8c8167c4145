//! # In-Memory User Store
//!
//! A [`UserStore`] kept in a `BTreeMap` behind a single write lock. It backs
//! handler tests and local runs without a database. Email uniqueness is checked
//! and the row inserted under the same lock, mirroring the SQL unique constraint.

use super::models::{User, UserForCreate};
use super::user_store::UserStore;
use crate::{AppError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

#[derive(Debug)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                users: BTreeMap::new(),
            }),
        }
    }
}

impl Inner {
    fn email_taken_by_other(&self, email: &str, id: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != id)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_all(&self) -> Result<Vec<User>> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<User> {
        self.inner
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    async fn find_by_role(&self, role: &str) -> Result<Vec<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn save(&self, user: UserForCreate) -> Result<User> {
        let mut inner = self.inner.write().await;

        if inner.email_taken_by_other(&user.email, None) {
            return Err(AppError::EmailTaken(user.email));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let user = user.into_user(id);
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut inner = self.inner.write().await;

        if inner.email_taken_by_other(&user.email, Some(user.id)) {
            return Err(AppError::EmailTaken(user.email.clone()));
        }

        // Same column set as the SQL UPDATE; id, role and token are untouched
        if let Some(existing) = inner.users.get_mut(&user.id) {
            existing.name = user.name.clone();
            existing.address = user.address.clone();
            existing.telp = user.telp;
            existing.email = user.email.clone();
            existing.password = user.password.clone();
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.inner.write().await.users.remove(&id);
        Ok(())
    }

    async fn login(&self, email: &str) -> Result<User> {
        self.find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
