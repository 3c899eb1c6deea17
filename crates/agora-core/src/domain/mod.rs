//! Domain entities - the core business objects.

mod filters;
mod post;
mod profile;

pub use filters::{PostFilters, PostQuery};
pub use post::{
    AuthorSummary, DEFAULT_CATEGORY, NewPost, Post, PostChanges, PostStatus, PostWithAuthor,
    SUGGESTED_CATEGORIES,
};
pub use profile::{Profile, ProfileChanges, Role};

/// Collapses empty text to `None`, so a blank form field clears the column.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
