use uuid::Uuid;

use super::non_empty;
use super::post::{Post, PostStatus};

/// Dashboard filters. Each present filter narrows the result (logical AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilters {
    /// Case-insensitive substring of the title or the content.
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<PostStatus>,
}

impl PostFilters {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// A fully resolved listing query handed to a post store.
///
/// Empty strings have been dropped, so stores can treat every `Some` as an
/// active predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<PostStatus>,
    pub user_id: Option<Uuid>,
}

impl PostQuery {
    pub fn from_filters(filters: &PostFilters) -> Self {
        Self {
            search: non_empty(filters.search.clone()),
            category: non_empty(filters.category.clone()),
            status: filters.status,
            user_id: None,
        }
    }

    pub fn by_author(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// Evaluate the query against a single row.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !post.title.to_lowercase().contains(&needle)
                && !post.content.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if post.category.as_ref() != Some(category) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if post.status != status {
                return false;
            }
        }
        if let Some(user_id) = self.user_id {
            if post.user_id != user_id {
                return false;
            }
        }
        true
    }
}
