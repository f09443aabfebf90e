//! `Authorization: Bearer <token>` header parsing.

use portal_core::error::AppError;

/// Pull the token out of an `Authorization` header value.
///
/// The scheme is matched case-insensitively. A missing header and a
/// malformed one fail with distinct messages; both are authentication errors.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AppError> {
    let header = header.ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() || token.contains(' ') {
        return Err(AppError::authentication(
            "Invalid Authorization header format",
        ));
    }

    Ok(token)
}
