//! JWT claims structure and the principal it carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_entity::user::{User, UserRole};

/// JWT claims payload embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Account email at issuance.
    pub email: String,
    /// User role at issuance.
    pub role: UserRole,
    /// Whether the email was verified at issuance.
    pub verified: bool,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Build claims for `user` valid from `now` for `ttl`.
    pub fn for_user(user: &User, now: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        Self {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            verified: user.email_verified,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// The authenticated identity these claims describe.
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.sub,
            email: self.email.clone(),
            role: self.role,
            verified: self.verified,
        }
    }
}

/// A verified caller identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    /// User ID.
    pub id: Uuid,
    /// Account email.
    pub email: String,
    /// User role.
    pub role: UserRole,
    /// Whether the email was verified when the token was issued.
    pub verified: bool,
}
