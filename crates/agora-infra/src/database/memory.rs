//! In-memory row store - used when no database is configured and in tests.
//!
//! Mirrors the relational schema closely enough for the content repository:
//! posts must reference an existing profile, listings are newest first, and
//! the join yields at most one author per post.
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use agora_core::domain::{
    AuthorSummary, NewPost, Post, PostChanges, PostQuery, PostWithAuthor, Profile, ProfileChanges,
    Role,
};
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, PostRepository, ProfileRepository};

#[derive(Default)]
struct Tables {
    profiles: HashMap<Uuid, Profile>,
    posts: HashMap<Uuid, Post>,
}

impl Tables {
    fn with_author(&self, post: &Post) -> PostWithAuthor {
        let author = self.profiles.get(&post.user_id).map(AuthorSummary::from);
        PostWithAuthor::new(post.clone(), author)
    }
}

/// Both tables behind one async `RwLock`.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile row, as the sign-up flow would.
    pub async fn put_profile(&self, profile: Profile) {
        let mut tables = self.tables.write().await;
        tables.profiles.insert(profile.id, profile);
    }
}

#[async_trait]
impl BaseRepository<Profile, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.get(&id).cloned())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn list_newest_first(&self) -> Result<Vec<Profile>, RepoError> {
        let tables = self.tables.read().await;
        let mut profiles: Vec<Profile> = tables.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles)
    }

    async fn update_details(
        &self,
        id: Uuid,
        changes: ProfileChanges,
        at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let profile = tables.profiles.get_mut(&id).ok_or(RepoError::NotFound)?;
        profile.full_name = changes.full_name;
        profile.bio = changes.bio;
        profile.updated_at = at;
        Ok(())
    }

    async fn update_role(&self, id: Uuid, role: Role, at: DateTime<Utc>) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let profile = tables.profiles.get_mut(&id).ok_or(RepoError::NotFound)?;
        profile.role = role;
        profile.updated_at = at;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).map(|post| tables.with_author(post)))
    }

    async fn list(&self, query: &PostQuery) -> Result<Vec<PostWithAuthor>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<&Post> = tables.posts.values().filter(|p| query.matches(p)).collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts.into_iter().map(|p| tables.with_author(p)).collect())
    }

    async fn insert(&self, new_post: NewPost, at: DateTime<Utc>) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.profiles.contains_key(&new_post.user_id) {
            return Err(RepoError::Constraint(format!(
                "posts_user_id_fkey: profile {} does not exist",
                new_post.user_id
            )));
        }

        let post = Post {
            id: Uuid::new_v4(),
            user_id: new_post.user_id,
            title: new_post.title,
            content: new_post.content,
            category: new_post.category,
            status: new_post.status.unwrap_or_default(),
            created_at: at,
            updated_at: at,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: PostChanges,
        at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(status) = changes.status {
            post.status = status;
        }
        post.category = changes.category;
        post.updated_at = at;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}
