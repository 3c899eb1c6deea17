//! Dashboard handlers: the post listing and the post form.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use agora_core::domain::{
    DEFAULT_CATEGORY, NewPost, PostChanges, PostFilters, PostStatus, SUGGESTED_CATEGORIES,
};
use agora_core::DomainError;
use agora_core::policy::{Actor, ensure_can_manage_post};
use agora_shared::ApiResponse;
use agora_shared::dto::{CategoriesResponse, CreatePostRequest, PostListQuery, UpdatePostRequest};

use super::views::{post_response, post_responses};
use crate::middleware::auth::Session;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_TITLE_LEN: usize = 3;
const MIN_CONTENT_LEN: usize = 10;

/// Category value meaning "no category filter".
const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    All,
    Mine,
    Published,
}

impl Tab {
    fn parse(tab: Option<&str>) -> AppResult<Self> {
        match tab.map(str::trim).filter(|t| !t.is_empty()) {
            None | Some("all") => Ok(Tab::All),
            Some("mine") => Ok(Tab::Mine),
            Some("published") => Ok(Tab::Published),
            Some(other) => Err(AppError::BadRequest(format!("Unknown tab: {}", other))),
        }
    }
}

fn parse_status(status: Option<&str>) -> AppResult<Option<PostStatus>> {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => Ok(Some(s.parse()?)),
    }
}

fn check_title(title: &str, errors: &mut Vec<String>) {
    let title = title.trim();
    if title.is_empty() {
        errors.push("Title is required".to_string());
    } else if title.chars().count() < MIN_TITLE_LEN {
        errors.push(format!("Title must be at least {} characters", MIN_TITLE_LEN));
    }
}

fn check_content(content: &str, errors: &mut Vec<String>) {
    let content = content.trim();
    if content.is_empty() {
        errors.push("Content is required".to_string());
    } else if content.chars().count() < MIN_CONTENT_LEN {
        errors.push(format!("Content must be at least {} characters", MIN_CONTENT_LEN));
    }
}

fn into_result(errors: Vec<String>) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// GET /api/posts?search&category&status&tab
pub async fn list_posts(
    state: web::Data<AppState>,
    session: Session,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let tab = Tab::parse(query.tab.as_deref())?;

    let filters = PostFilters {
        search: query.search,
        category: query.category.filter(|c| c != ALL_CATEGORIES),
        status: parse_status(query.status.as_deref())?,
    };

    let actor = session.actor();
    let posts = state
        .content
        .get_posts(&filters)
        .await
        .into_iter()
        .filter(|item| match tab {
            Tab::All => true,
            Tab::Mine => item.post.user_id == actor.id,
            Tab::Published => item.post.status == PostStatus::Published,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_responses(posts, &actor))))
}

/// GET /api/posts/categories
pub async fn categories() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(CategoriesResponse {
        categories: SUGGESTED_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        default: DEFAULT_CATEGORY.to_string(),
    }))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let item = state
        .content
        .get_post(post_id)
        .await
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "Post",
            id: post_id,
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(item, &session.actor()))))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = Vec::new();
    check_title(&req.title, &mut errors);
    check_content(&req.content, &mut errors);
    into_result(errors)?;

    let status = parse_status(req.status.as_deref())?;
    let category = req
        .category
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let actor = session.actor();
    let created = state
        .content
        .create_post(NewPost {
            user_id: actor.id,
            title: req.title.trim().to_string(),
            content: req.content.trim().to_string(),
            category: Some(category),
            status,
        })
        .await?;

    // Re-read to pick up the author columns.
    let item = state
        .content
        .get_post(created.id)
        .await
        .ok_or_else(|| AppError::Internal(format!("Created post {} not readable", created.id)))?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        post_response(item, &actor),
        "Post created successfully",
    )))
}

async fn managed_post(state: &AppState, actor: &Actor, post_id: Uuid) -> AppResult<()> {
    let item = state
        .content
        .get_post(post_id)
        .await
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "Post",
            id: post_id,
        })?;
    ensure_can_manage_post(actor, &item.post)?;
    Ok(())
}

/// PUT /api/posts/{id}
///
/// The form always submits the category; leaving it out clears it.
pub async fn update_post(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let actor = session.actor();
    managed_post(&state, &actor, post_id).await?;

    let req = body.into_inner();
    let mut errors = Vec::new();
    if let Some(title) = &req.title {
        check_title(title, &mut errors);
    }
    if let Some(content) = &req.content {
        check_content(content, &mut errors);
    }
    into_result(errors)?;

    let changes = PostChanges {
        title: req.title.map(|t| t.trim().to_string()),
        content: req.content.map(|c| c.trim().to_string()),
        category: req.category,
        status: parse_status(req.status.as_deref())?,
    };
    state.content.update_post(post_id, changes).await?;

    let item = state
        .content
        .get_post(post_id)
        .await
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "Post",
            id: post_id,
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post_response(item, &actor),
        "Post updated successfully",
    )))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let actor = session.actor();
    managed_post(&state, &actor, post_id).await?;

    state.content.delete_post(post_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post_id.to_string(),
        "Post deleted successfully",
    )))
}
