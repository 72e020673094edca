//! In-memory `UserStore` used by handler tests. Mirrors the PostgreSQL
//! store: sequential ids, unique emails, strict update, idempotent delete.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};

use crate::users::repo::{StoreError, UserStore};
use crate::users::repo_types::User;

struct StoredUser {
    user: User,
    password: String,
}

#[derive(Default)]
struct Inner {
    last_id: i32,
    rows: BTreeMap<i32, StoredUser>,
    closed: bool,
}

#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<Inner>,
    failing: bool,
}

impl MemoryUserStore {
    /// A store whose every operation fails as if the database were down.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn stored_password(&self, id: i32) -> Option<String> {
        let inner = self.inner.lock().expect("store lock");
        inner.rows.get(&id).map(|r| r.password.clone())
    }

    fn with_inner<R>(
        &self,
        f: impl FnOnce(&mut Inner) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut inner = self.inner.lock().expect("store lock");
        if self.failing || inner.closed {
            return Err(StoreError::Connectivity(sqlx::Error::PoolClosed));
        }
        f(&mut inner)
    }
}

fn email_taken(inner: &Inner, email: &str, except: Option<i32>) -> bool {
    inner
        .rows
        .values()
        .any(|r| r.user.email == email && Some(r.user.id) != except)
}

fn duplicate(email: &str) -> StoreError {
    StoreError::Conflict(format!(
        "duplicate key value violates unique constraint \"users_email_key\" ({email})"
    ))
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<i32, StoreError> {
        self.with_inner(|inner| {
            if email_taken(inner, email, None) {
                return Err(duplicate(email));
            }
            inner.last_id += 1;
            let id = inner.last_id;
            let now = OffsetDateTime::now_utc();
            inner.rows.insert(
                id,
                StoredUser {
                    user: User {
                        id,
                        name: name.to_string(),
                        email: email.to_string(),
                        created_at: now,
                        updated_at: now,
                    },
                    password: password.to_string(),
                },
            );
            Ok(id)
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.with_inner(|inner| Ok(inner.rows.values().map(|r| r.user.clone()).collect()))
    }

    async fn get_user(&self, id: i32) -> Result<User, StoreError> {
        self.with_inner(|inner| {
            inner
                .rows
                .get(&id)
                .map(|r| r.user.clone())
                .ok_or(StoreError::NotFound)
        })
    }

    async fn update_user(&self, id: i32, name: &str, email: &str) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            if !inner.rows.contains_key(&id) {
                return Err(StoreError::NotFound);
            }
            if email_taken(inner, email, Some(id)) {
                return Err(duplicate(email));
            }
            let row = inner.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
            let prev = row.user.updated_at;
            row.user.name = name.to_string();
            row.user.email = email.to_string();
            row.user.updated_at = OffsetDateTime::now_utc().max(prev + Duration::microseconds(1));
            Ok(())
        })
    }

    async fn delete_user(&self, id: i32) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            inner.rows.remove(&id);
            Ok(())
        })
    }

    async fn close(&self) {
        self.inner.lock().expect("store lock").closed = true;
    }
}
