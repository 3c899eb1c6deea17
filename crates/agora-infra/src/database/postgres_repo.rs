//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder,
    Select, SelectTwo, Set,
};
use uuid::Uuid;

use agora_core::domain::{
    AuthorSummary, NewPost, Post, PostChanges, PostQuery, PostWithAuthor, Profile, ProfileChanges,
    Role,
};
use agora_core::error::RepoError;
use agora_core::ports::{PostRepository, ProfileRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::profile::{self, Entity as ProfileEntity};
use super::entity::sea_orm_active_enums;
use super::postgres_base::{PostgresBaseRepository, read_error, write_error};

/// PostgreSQL profile repository.
pub type PostgresProfileRepository = PostgresBaseRepository<ProfileEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn timestamp(at: DateTime<Utc>) -> DateTimeWithTimeZone {
    at.into()
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn list_newest_first(&self) -> Result<Vec<Profile>, RepoError> {
        let rows = ProfileEntity::find()
            .order_by_desc(profile::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(read_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_details(
        &self,
        id: Uuid,
        changes: ProfileChanges,
        at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let result = ProfileEntity::update_many()
            .col_expr(profile::Column::FullName, Expr::value(changes.full_name))
            .col_expr(profile::Column::Bio, Expr::value(changes.bio))
            .col_expr(profile::Column::UpdatedAt, Expr::value(timestamp(at)))
            .filter(profile::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn update_role(&self, id: Uuid, role: Role, at: DateTime<Utc>) -> Result<(), RepoError> {
        let role = sea_orm_active_enums::Role::from(role);
        let result = ProfileEntity::update_many()
            .col_expr(profile::Column::Role, Expr::value(role.to_value()))
            .col_expr(profile::Column::UpdatedAt, Expr::value(timestamp(at)))
            .filter(profile::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// Escape `LIKE` wildcards so the search term matches literally.
fn like_escape(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Posts joined with their author row.
fn posts_with_author() -> SelectTwo<PostEntity, ProfileEntity> {
    PostEntity::find().find_also_related(ProfileEntity)
}

fn apply_query(select: Select<PostEntity>, query: &PostQuery) -> Select<PostEntity> {
    let mut condition = Condition::all();

    if let Some(search) = &query.search {
        // The term keeps its case; ILIKE folds both sides on the server.
        let pattern = format!("%{}%", like_escape(search));
        let contains = |column: post::Column| {
            Expr::col((PostEntity, column)).ilike(LikeExpr::new(pattern.clone()).escape('\\'))
        };
        condition = condition.add(
            Condition::any()
                .add(contains(post::Column::Title))
                .add(contains(post::Column::Content)),
        );
    }
    if let Some(category) = &query.category {
        condition = condition.add(post::Column::Category.eq(category.as_str()));
    }
    if let Some(status) = query.status {
        condition = condition.add(
            post::Column::Status.eq(sea_orm_active_enums::PostStatus::from(status).to_value()),
        );
    }
    if let Some(user_id) = query.user_id {
        condition = condition.add(post::Column::UserId.eq(user_id));
    }

    select.filter(condition)
}

fn project((post, author): (post::Model, Option<profile::Model>)) -> PostWithAuthor {
    PostWithAuthor::new(post.into(), author.map(AuthorSummary::from))
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = posts_with_author()
            .filter(post::Column::Id.eq(id))
            .one(self.db.as_ref())
            .await
            .map_err(read_error)?;

        Ok(row.map(project))
    }

    async fn list(&self, query: &PostQuery) -> Result<Vec<PostWithAuthor>, RepoError> {
        tracing::debug!(?query, "Listing posts");

        let rows = apply_query(PostEntity::find(), query)
            .find_also_related(ProfileEntity)
            .order_by_desc(post::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(read_error)?;

        Ok(rows.into_iter().map(project).collect())
    }

    async fn insert(&self, new_post: NewPost, at: DateTime<Utc>) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(new_post.user_id),
            title: Set(new_post.title),
            content: Set(new_post.content),
            category: Set(new_post.category),
            status: Set(new_post.status.unwrap_or_default().into()),
            created_at: Set(timestamp(at)),
            updated_at: Set(timestamp(at)),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(write_error)?;

        Ok(model.into())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: PostChanges,
        at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let mut update = PostEntity::update_many()
            .col_expr(post::Column::Category, Expr::value(changes.category))
            .col_expr(post::Column::UpdatedAt, Expr::value(timestamp(at)))
            .filter(post::Column::Id.eq(id));

        if let Some(title) = changes.title {
            update = update.col_expr(post::Column::Title, Expr::value(title));
        }
        if let Some(content) = changes.content {
            update = update.col_expr(post::Column::Content, Expr::value(content));
        }
        if let Some(status) = changes.status {
            let status = sea_orm_active_enums::PostStatus::from(status);
            update = update.col_expr(post::Column::Status, Expr::value(status.to_value()));
        }

        let result = update.exec(self.db.as_ref()).await.map_err(write_error)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(write_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
