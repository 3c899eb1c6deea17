use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    NewPost, Post, PostChanges, PostQuery, PostWithAuthor, Profile, ProfileChanges, Role,
};
use crate::error::RepoError;

/// Generic repository trait for keyed lookups.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// Row store for the `profiles` table.
#[async_trait]
pub trait ProfileRepository: BaseRepository<Profile, Uuid> {
    /// All profiles, newest `created_at` first.
    async fn list_newest_first(&self) -> Result<Vec<Profile>, RepoError>;

    /// Overwrite `full_name` and `bio` and stamp `updated_at`.
    async fn update_details(
        &self,
        id: Uuid,
        changes: ProfileChanges,
        at: DateTime<Utc>,
    ) -> Result<(), RepoError>;

    async fn update_role(&self, id: Uuid, role: Role, at: DateTime<Utc>) -> Result<(), RepoError>;
}

/// Row store for the `posts` table and its join onto `profiles`.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError>;

    /// Posts matching every predicate of `query`, newest `created_at` first.
    async fn list(&self, query: &PostQuery) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// Insert a post, assigning its id; both timestamps are set to `at`.
    async fn insert(&self, post: NewPost, at: DateTime<Utc>) -> Result<Post, RepoError>;

    async fn update(
        &self,
        id: Uuid,
        changes: PostChanges,
        at: DateTime<Utc>,
    ) -> Result<(), RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
