use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::Profile;
use crate::error::DomainError;

/// Categories offered by the post form. The store accepts any label.
pub const SUGGESTED_CATEGORIES: [&str; 5] =
    ["General", "Tutorial", "Discussion", "Announcement", "Question"];

/// Category preselected by the post form.
pub const DEFAULT_CATEGORY: &str = "General";

/// Publication state. Both transitions are allowed, only through explicit updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::Validation(format!("Unknown status '{other}'"))),
        }
    }
}

/// Post entity - a short text owned by exactly one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The author columns embedded in post listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub username: Option<String>,
    pub full_name: Option<String>,
}

impl From<&Profile> for AuthorSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            username: profile.username.clone(),
            full_name: profile.full_name.clone(),
        }
    }
}

/// A post joined with at most one author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: Option<AuthorSummary>,
}

impl PostWithAuthor {
    pub fn new(post: Post, author: Option<AuthorSummary>) -> Self {
        Self { post, author }
    }
}

/// Fields a caller supplies when creating a post. Identity and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub status: Option<PostStatus>,
}

/// Partial post update.
///
/// `None` leaves `title`, `content` and `status` untouched, while `category`
/// is always written: `None` stores NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub status: Option<PostStatus>,
}
