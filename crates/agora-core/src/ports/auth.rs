//! Authentication ports.
//!
//! Tokens are minted by the external identity provider; this service only
//! validates them.

use uuid::Uuid;

/// Claims carried by a validated access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// Profile id of the signed-in member.
    pub user_id: Uuid,
    pub email: Option<String>,
    pub exp: i64,
}

/// Token service trait for bearer token validation.
pub trait TokenService: Send + Sync {
    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
