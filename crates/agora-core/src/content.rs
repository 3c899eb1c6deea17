//! Content repository - the façade every handler talks to.
//!
//! Reads never fail from the caller's point of view: a failed query is logged
//! and reported as "nothing found". Writes hand the error back so the caller
//! can show it.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    NewPost, Post, PostChanges, PostFilters, PostQuery, PostWithAuthor, Profile, ProfileChanges,
    Role, non_empty,
};
use crate::error::RepoError;
use crate::lookup::Lookup;
use crate::ports::{Clock, PostRepository, ProfileRepository, SystemClock};

/// Stateless façade over the profile and post stores.
#[derive(Clone)]
pub struct ContentRepository {
    profiles: Arc<dyn ProfileRepository>,
    posts: Arc<dyn PostRepository>,
    clock: Arc<dyn Clock>,
}

impl ContentRepository {
    pub fn new(profiles: Arc<dyn ProfileRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self {
            profiles,
            posts,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to stamp `created_at` / `updated_at`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // Profiles

    pub async fn lookup_profile(&self, user_id: Uuid) -> Lookup<Profile> {
        Lookup::from(self.profiles.find_by_id(user_id).await)
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Option<Profile> {
        let lookup = self.lookup_profile(user_id).await;
        if let Lookup::QueryFailed(err) = &lookup {
            tracing::error!(error = %err, %user_id, "Error fetching profile");
        }
        lookup.into_option()
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<(), RepoError> {
        let changes = ProfileChanges::new(changes.full_name, changes.bio);
        self.profiles
            .update_details(user_id, changes, self.clock.now())
            .await
            .inspect_err(|err| tracing::warn!(error = %err, %user_id, "Profile update failed"))
    }

    pub async fn get_all_profiles(&self) -> Vec<Profile> {
        self.profiles
            .list_newest_first()
            .await
            .unwrap_or_else(|err| {
                tracing::error!(error = %err, "Error fetching profiles");
                Vec::new()
            })
    }

    /// Change a member's role. The caller is responsible for checking that
    /// the acting member is allowed to do so.
    pub async fn update_user_role(&self, user_id: Uuid, role: Role) -> Result<(), RepoError> {
        tracing::info!(%user_id, %role, "Updating user role");
        self.profiles
            .update_role(user_id, role, self.clock.now())
            .await
            .inspect_err(|err| tracing::warn!(error = %err, %user_id, "Role update failed"))
    }

    // Posts

    pub async fn get_posts(&self, filters: &PostFilters) -> Vec<PostWithAuthor> {
        self.list_posts(&PostQuery::from_filters(filters), "Error fetching posts")
            .await
    }

    pub async fn lookup_post(&self, post_id: Uuid) -> Lookup<PostWithAuthor> {
        Lookup::from(self.posts.find_with_author(post_id).await)
    }

    pub async fn get_post(&self, post_id: Uuid) -> Option<PostWithAuthor> {
        let lookup = self.lookup_post(post_id).await;
        if let Lookup::QueryFailed(err) = &lookup {
            tracing::error!(error = %err, %post_id, "Error fetching post");
        }
        lookup.into_option()
    }

    pub async fn create_post(&self, post: NewPost) -> Result<Post, RepoError> {
        let post = NewPost {
            category: non_empty(post.category),
            status: Some(post.status.unwrap_or_default()),
            ..post
        };
        let created = self
            .posts
            .insert(post, self.clock.now())
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "Post creation failed"))?;

        tracing::info!(post_id = %created.id, user_id = %created.user_id, "Post created");
        Ok(created)
    }

    pub async fn update_post(&self, post_id: Uuid, changes: PostChanges) -> Result<(), RepoError> {
        let changes = PostChanges {
            category: non_empty(changes.category),
            ..changes
        };
        self.posts
            .update(post_id, changes, self.clock.now())
            .await
            .inspect_err(|err| tracing::warn!(error = %err, %post_id, "Post update failed"))
    }

    pub async fn delete_post(&self, post_id: Uuid) -> Result<(), RepoError> {
        self.posts
            .delete(post_id)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, %post_id, "Post deletion failed"))?;

        tracing::info!(%post_id, "Post deleted");
        Ok(())
    }

    pub async fn get_user_posts(&self, user_id: Uuid) -> Vec<PostWithAuthor> {
        self.list_posts(&PostQuery::by_author(user_id), "Error fetching user posts")
            .await
    }

    async fn list_posts(&self, query: &PostQuery, context: &'static str) -> Vec<PostWithAuthor> {
        self.posts.list(query).await.unwrap_or_else(|err| {
            tracing::error!(error = %err, ?query, "{context}");
            Vec::new()
        })
    }
}
