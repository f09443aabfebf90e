//! In-memory user repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_entity::user::{CreateUser, User, normalize_email};

use crate::repositories::UserRepository;

/// User store keyed by id with a unique email index.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<DashMap<Uuid, User>>,
    /// Normalized email → user id.
    emails: Arc<DashMap<String, Uuid>>,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed user, enforcing email uniqueness.
    pub fn insert(&self, user: User) -> AppResult<User> {
        match self.emails.entry(normalize_email(&user.email)) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "An account with this email already exists",
            )),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    /// Snapshot of a stored user.
    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).map(|u| u.value().clone())
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let id = match self.emails.get(&normalize_email(email)) {
            Some(id) => *id.value(),
            None => return Ok(None),
        };
        Ok(self.get(id))
    }

    async fn create(&self, user: &CreateUser) -> AppResult<User> {
        let now = Utc::now();
        self.insert(User {
            id: Uuid::now_v7(),
            email: normalize_email(&user.email),
            name: user.name.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            email_verified: false,
            verification_token: user.verification_token.clone(),
            verification_token_expires: user.verification_token_expires,
            created_at: now,
            updated_at: now,
        })
    }

    async fn consume_verification_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        // The check and the mutation happen under the same shard write lock.
        for mut entry in self.users.iter_mut() {
            if entry.value().accepts_verification_token(token, now) {
                entry.value_mut().mark_verified(now);
                return Ok(Some(entry.value().clone()));
            }
        }
        Ok(None)
    }
}
