//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;
use std::sync::Arc;

use agora_core::domain::Profile;
use agora_core::policy::Actor;
use agora_core::ports::{AuthError, TokenClaims, TokenService};

use crate::state::AppState;

/// Authenticated member identity, taken from the bearer token alone.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub email: Option<String>,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use agora_shared::ErrorResponse;

        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your session has expired. Please sign in again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AuthenticationError> {
    let token_service = req
        .app_data::<web::Data<Arc<dyn TokenService>>>()
        .ok_or_else(|| {
            tracing::error!("TokenService not found in app data");
            AuthenticationError(AuthError::InvalidToken(
                "Server configuration error".to_string(),
            ))
        })?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthenticationError(AuthError::MissingAuth))?;

    let auth_str = auth_header.to_str().map_err(|_| {
        AuthenticationError(AuthError::InvalidToken(
            "Invalid authorization header".to_string(),
        ))
    })?;

    // Parse "Bearer <token>"
    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        AuthenticationError(AuthError::InvalidToken(
            "Expected Bearer token".to_string(),
        ))
    })?;

    token_service
        .validate_token(token)
        .map(Identity::from)
        .map_err(AuthenticationError)
}

/// The signed-in member for the current request.
///
/// Built fresh per request: the identity comes from the token and the profile
/// row is re-read, so profile edits show up on the next request.
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: Identity,
    /// `None` when the member has no profile row yet, or the read failed.
    pub profile: Option<Profile>,
}

impl Session {
    pub fn user_id(&self) -> uuid::Uuid {
        self.identity.user_id
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.identity.user_id, self.profile.as_ref())
    }

    pub fn display_name(&self) -> String {
        match &self.profile {
            Some(profile) => profile.display_name().to_string(),
            None => self
                .identity
                .email
                .clone()
                .unwrap_or_else(|| "User".to_string()),
        }
    }
}

impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = authenticate(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let identity = identity?;
            let state = state.ok_or_else(|| {
                tracing::error!("AppState not found in app data");
                actix_web::error::ErrorInternalServerError("Server configuration error")
            })?;

            let profile = state.content.get_profile(identity.user_id).await;
            if profile.is_none() {
                tracing::debug!(user_id = %identity.user_id, "Session without profile row");
            }

            Ok(Session { identity, profile })
        })
    }
}
