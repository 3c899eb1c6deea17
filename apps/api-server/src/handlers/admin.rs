//! Member management handlers. Admins only.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use agora_core::domain::Role;
use agora_core::policy::{ensure_can_change_role, require_admin};
use agora_shared::ApiResponse;
use agora_shared::dto::{ProfileResponse, UpdateRoleRequest};

use super::views::profile_response;
use crate::middleware::auth::Session;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/admin/profiles
pub async fn list_profiles(
    state: web::Data<AppState>,
    session: Session,
) -> AppResult<HttpResponse> {
    require_admin(&session.actor())?;

    let profiles: Vec<ProfileResponse> = state
        .content
        .get_all_profiles()
        .await
        .into_iter()
        .map(profile_response)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(profiles)))
}

/// PUT /api/admin/profiles/{id}/role
pub async fn update_role(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<UpdateRoleRequest>,
) -> AppResult<HttpResponse> {
    let target = path.into_inner();
    let actor = session.actor();
    ensure_can_change_role(&actor, target)?;

    let role: Role = body.role.parse()?;
    state.content.update_user_role(target, role).await?;

    tracing::info!(admin_id = %actor.id, user_id = %target, %role, "Role changed");

    let refreshed = state.content.get_profile(target).await;
    Ok(HttpResponse::Ok().json(ApiResponse {
        success: true,
        data: refreshed.map(profile_response),
        message: Some("Role updated successfully".to_string()),
    }))
}
