//! Authorization checks applied by the request handlers.
//!
//! The content repository performs no checks of its own: any caller holding
//! a `ContentRepository` can write any row. These guards are the only gate.

use uuid::Uuid;

use crate::domain::{Post, Profile, Role};
use crate::error::DomainError;

/// The member performing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    /// Members without a profile row act with the default role.
    pub fn new(id: Uuid, profile: Option<&Profile>) -> Self {
        Self {
            id,
            role: match profile {
                Some(p) if p.is_admin() => Role::Admin,
                _ => Role::User,
            },
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Owners and admins may edit or delete a post.
pub fn can_manage_post(actor: &Actor, post: &Post) -> bool {
    post.user_id == actor.id || actor.is_admin()
}

pub fn ensure_can_manage_post(actor: &Actor, post: &Post) -> Result<(), DomainError> {
    if can_manage_post(actor, post) {
        Ok(())
    } else {
        Err(DomainError::Forbidden("Only the author or an admin can modify this post"))
    }
}

pub fn require_admin(actor: &Actor) -> Result<(), DomainError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(DomainError::Forbidden("You do not have permission to access this page"))
    }
}

/// Admins may change anyone's role except their own.
pub fn ensure_can_change_role(actor: &Actor, target: Uuid) -> Result<(), DomainError> {
    require_admin(actor)?;
    if actor.id == target {
        return Err(DomainError::Forbidden("You cannot change your own role"));
    }
    Ok(())
}
