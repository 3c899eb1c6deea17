//! Profile handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use agora_core::DomainError;
use agora_core::domain::ProfileChanges;
use agora_shared::ApiResponse;
use agora_shared::dto::UpdateProfileRequest;

use super::views::{post_responses, profile_response};
use crate::middleware::auth::Session;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/profile
pub async fn my_profile(session: Session) -> AppResult<HttpResponse> {
    let id = session.user_id();
    let profile = session.profile.ok_or(DomainError::NotFound {
        entity_type: "Profile",
        id,
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(profile_response(profile))))
}

/// PUT /api/profile
///
/// Only the display name and bio can be edited; blank values clear the field.
pub async fn update_my_profile(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user_id = session.user_id();

    state
        .content
        .update_profile(user_id, ProfileChanges::new(req.full_name, req.bio))
        .await?;

    let refreshed = state.content.get_profile(user_id).await;
    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        data: refreshed.map(profile_response),
        message: Some("Profile updated successfully".to_string()),
    }))
}

/// GET /api/profiles/{id}
pub async fn get_profile(
    state: web::Data<AppState>,
    _session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let profile = state
        .content
        .get_profile(user_id)
        .await
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "Profile",
            id: user_id,
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(profile_response(profile))))
}

/// GET /api/users/{id}/posts
pub async fn user_posts(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let posts = state.content.get_user_posts(path.into_inner()).await;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_responses(posts, &session.actor()))))
}
