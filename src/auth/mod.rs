use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod verifier;

pub use verifier::TokenVerifier;

/// Decoded token payload. Every field is optional; presence is checked
/// explicitly where a claim is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub aud: Option<Audience>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// The `aud` claim may be a single value or a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Claims {
    /// Checks that the permissions claim is present and contains `permission`.
    pub fn require_permission(&self, permission: &str) -> Result<(), AuthError> {
        let permissions = self
            .permissions
            .as_ref()
            .ok_or(AuthError::PermissionsClaimMissing)?;

        if permissions.iter().any(|p| p == permission) {
            Ok(())
        } else {
            Err(AuthError::PermissionNotFound)
        }
    }
}

/// Authorization failures. Each variant carries its client-facing message
/// and maps to a fixed HTTP status; none of them is ever recovered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    HeaderMissing,

    #[error("{0}")]
    HeaderMalformed(&'static str),

    #[error("Token expired.")]
    TokenExpired,

    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,

    #[error("Unable to verify authentication token.")]
    InvalidSignature,

    #[error("Unable to parse authentication token.")]
    Parsing,

    #[error("Permissions not included in JWT.")]
    PermissionsClaimMissing,

    #[error("Permission not found.")]
    PermissionNotFound,

    #[error("Unable to load token verification keys.")]
    KeySetUnavailable,
}

impl AuthError {
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::HeaderMissing
            | AuthError::HeaderMalformed(_)
            | AuthError::TokenExpired
            | AuthError::InvalidClaims
            | AuthError::InvalidSignature
            | AuthError::Parsing => 401,
            AuthError::PermissionsClaimMissing => 400,
            AuthError::PermissionNotFound => 403,
            AuthError::KeySetUnavailable => 503,
        }
    }
}

/// Extract the bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::HeaderMissing)?;

    let auth_str = auth_header.to_str().map_err(|_| {
        AuthError::HeaderMalformed("Authorization header must start with \"Bearer\".")
    })?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();

    if parts.is_empty() || !parts[0].eq_ignore_ascii_case("bearer") {
        return Err(AuthError::HeaderMalformed(
            "Authorization header must start with \"Bearer\".",
        ));
    }
    if parts.len() == 1 {
        return Err(AuthError::HeaderMalformed("Token not found."));
    }
    if parts.len() > 2 {
        return Err(AuthError::HeaderMalformed(
            "Authorization header must be bearer token.",
        ));
    }

    Ok(parts[1].to_string())
}

/// Map decode failures onto the authorization taxonomy.
pub(crate) fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => AuthError::InvalidClaims,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Parsing,
    }
}
