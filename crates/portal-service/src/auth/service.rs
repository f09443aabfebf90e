//! Sign-up, sign-in, and email verification.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use portal_auth::jwt::{IssuedToken, JwtEncoder};
use portal_auth::password::PasswordHasher;
use portal_auth::verification::generate_verification_token;
use portal_core::config::AuthConfig;
use portal_core::error::AppError;
use portal_core::result::AppResult;
use portal_database::repositories::UserRepository;
use portal_entity::user::{CreateUser, User, UserRole, normalize_email};

/// The one message returned for every failed sign-in.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Orchestrates the credential flows over the user repository.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    password_min_length: usize,
    verification_ttl: chrono::Duration,
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignInOutcome {
    /// The authenticated account.
    pub user: User,
    /// Signed token for subsequent requests.
    pub token: IssuedToken,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            password_min_length: config.password_min_length,
            verification_ttl: chrono::Duration::hours(config.verification_ttl_hours_capped()),
        }
    }

    /// Check credentials and issue a token.
    ///
    /// Unknown email and wrong password fail with the same error, and both
    /// paths run one Argon2 verification.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignInOutcome> {
        let user = self.users.find_by_email(&normalize_email(email)).await?;

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let matched = run_blocking(move || match stored_hash {
            Some(hash) => hasher.verify_password(&password, &hash),
            None => Ok(hasher.verify_dummy(&password)),
        })
        .await?;

        let user = match user {
            Some(user) if matched => user,
            _ => {
                info!("Sign-in rejected");
                return Err(AppError::authentication(INVALID_CREDENTIALS));
            }
        };

        let token = self.encoder.issue(&user)?;
        info!(user_id = %user.id, role = %user.role, "Sign-in successful");
        Ok(SignInOutcome { user, token })
    }

    /// Register an unverified account with a fresh verification token.
    pub async fn sign_up(&self, account: NewAccount) -> AppResult<User> {
        if account.password.chars().count() < self.password_min_length {
            return Err(AppError::field_validation(
                "password",
                format!(
                    "Password must be at least {} characters",
                    self.password_min_length
                ),
            ));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = account.password;
        let password_hash = run_blocking(move || hasher.hash_password(&password)).await?;

        let name = account
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let user = self
            .users
            .create(&CreateUser {
                email: normalize_email(&account.email),
                name,
                password_hash,
                role: UserRole::User,
                verification_token: Some(generate_verification_token()),
                verification_token_expires: Some(Utc::now() + self.verification_ttl),
            })
            .await?;

        info!(user_id = %user.id, "Account created, email verification pending");
        Ok(user)
    }

    /// Consume a verification token.
    ///
    /// Unknown, expired, and already-used tokens all fail with not-found and
    /// leave every account untouched.
    pub async fn verify_email(&self, token: &str) -> AppResult<User> {
        match self
            .users
            .consume_verification_token(token.trim(), Utc::now())
            .await?
        {
            Some(user) => {
                info!(user_id = %user.id, "Email verified");
                Ok(user)
            }
            None => {
                warn!("Verification attempted with an unknown or expired token");
                Err(AppError::not_found("Invalid or expired verification token"))
            }
        }
    }
}

/// Run CPU-bound password work off the async workers.
async fn run_blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::internal(format!("Password task failed: {e}")))?
}
