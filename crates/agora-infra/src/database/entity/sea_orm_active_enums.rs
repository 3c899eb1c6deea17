//! Text-backed enum columns.

use sea_orm::entity::prelude::*;

use agora_core::domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Role {
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl From<Role> for domain::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::User => domain::Role::User,
            Role::Admin => domain::Role::Admin,
        }
    }
}

impl From<domain::Role> for Role {
    fn from(role: domain::Role) -> Self {
        match role {
            domain::Role::User => Role::User,
            domain::Role::Admin => Role::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PostStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
}

impl From<PostStatus> for domain::PostStatus {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Draft => domain::PostStatus::Draft,
            PostStatus::Published => domain::PostStatus::Published,
        }
    }
}

impl From<domain::PostStatus> for PostStatus {
    fn from(status: domain::PostStatus) -> Self {
        match status {
            domain::PostStatus::Draft => PostStatus::Draft,
            domain::PostStatus::Published => PostStatus::Published,
        }
    }
}
