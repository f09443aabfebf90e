//! # portal-auth
//!
//! Authentication primitives for the portal backend.
//!
//! ## Modules
//!
//! - `jwt` — token issuance, bearer-header parsing, and verification into a [`Principal`]
//! - `password` — Argon2id password hashing and verification
//! - `verification` — random email verification tokens

pub mod jwt;
pub mod password;
pub mod verification;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, Principal};
pub use password::PasswordHasher;
