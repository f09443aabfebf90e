//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered portal account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email, stored lowercased.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
    /// Whether the email address has been confirmed.
    pub email_verified: bool,
    /// Outstanding email verification token.
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    /// When the outstanding verification token stops being accepted.
    #[serde(skip_serializing)]
    pub verification_token_expires: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether `token` matches the stored verification token and has not expired at `now`.
    pub fn accepts_verification_token(&self, token: &str, now: DateTime<Utc>) -> bool {
        match (&self.verification_token, self.verification_token_expires) {
            (Some(stored), Some(expires)) => stored == token && expires > now,
            _ => false,
        }
    }

    /// Mark the email verified and clear the token fields.
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.email_verified = true;
        self.verification_token = None;
        self.verification_token_expires = None;
        self.updated_at = now;
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login email, already normalized.
    pub email: String,
    /// Display name (optional).
    pub name: Option<String>,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Verification token to store.
    pub verification_token: Option<String>,
    /// Verification token expiry.
    pub verification_token_expires: Option<DateTime<Utc>>,
}

/// Normalize an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
