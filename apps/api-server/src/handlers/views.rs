//! Mapping from domain records to response DTOs.

use agora_core::domain::{AuthorSummary, PostWithAuthor, Profile};
use agora_core::policy::{Actor, can_manage_post};
use agora_shared::dto::{AuthorResponse, PostResponse, ProfileResponse};

pub fn profile_response(profile: Profile) -> ProfileResponse {
    ProfileResponse {
        id: profile.id.to_string(),
        username: profile.username,
        email: profile.email,
        full_name: profile.full_name,
        bio: profile.bio,
        role: profile.role.to_string(),
        created_at: profile.created_at.to_rfc3339(),
        updated_at: profile.updated_at.to_rfc3339(),
    }
}

fn author_response(author: AuthorSummary) -> AuthorResponse {
    AuthorResponse {
        username: author.username,
        full_name: author.full_name,
    }
}

/// `can_manage` is computed for the given actor.
pub fn post_response(item: PostWithAuthor, actor: &Actor) -> PostResponse {
    let can_manage = can_manage_post(actor, &item.post);
    let post = item.post;

    PostResponse {
        id: post.id.to_string(),
        user_id: post.user_id.to_string(),
        title: post.title,
        content: post.content,
        category: post.category,
        status: post.status.to_string(),
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
        author: item.author.map(author_response),
        can_manage,
    }
}

pub fn post_responses(items: Vec<PostWithAuthor>, actor: &Actor) -> Vec<PostResponse> {
    items
        .into_iter()
        .map(|item| post_response(item, actor))
        .collect()
}
