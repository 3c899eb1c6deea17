//! Session handler.

use actix_web::HttpResponse;

use agora_shared::ApiResponse;
use agora_shared::dto::SessionResponse;

use super::views::profile_response;
use crate::middleware::auth::Session;
use crate::middleware::error::AppResult;

/// GET /api/session
pub async fn current_session(session: Session) -> AppResult<HttpResponse> {
    let response = SessionResponse {
        user_id: session.user_id().to_string(),
        email: session.identity.email.clone(),
        display_name: session.display_name(),
        is_admin: session.actor().is_admin(),
        profile: session.profile.map(profile_response),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}
