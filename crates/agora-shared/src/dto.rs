//! Data Transfer Objects - request/response types for the API.
//!
//! Identifiers and timestamps travel as strings (UUIDs and RFC 3339).

use serde::{Deserialize, Serialize};

/// Request to edit the caller's own profile. Other profile fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub bio: Option<String>,
}

/// Request to change another member's role (`user` or `admin`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Request to create a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    /// `draft` (default) or `published`.
    pub status: Option<String>,
}

/// Request to edit a post. Missing title, content or status are left as they are;
/// a missing category clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Query string of the post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostListQuery {
    pub search: Option<String>,
    /// A category label, or `All`.
    pub category: Option<String>,
    pub status: Option<String>,
    /// `all` (default), `mine` or `published`.
    pub tab: Option<String>,
}

/// Public profile information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Author columns embedded in a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub username: Option<String>,
    pub full_name: Option<String>,
}

/// A post with its author, as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub author: Option<AuthorResponse>,
    /// Whether the caller may edit or delete this post.
    pub can_manage: bool,
}

/// The signed-in member and their profile row, if one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: String,
    pub is_admin: bool,
    pub profile: Option<ProfileResponse>,
}

/// Category labels offered by the post form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub default: String,
}
