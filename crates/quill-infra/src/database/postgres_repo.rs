//! PostgreSQL store implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter};

use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostSearchParams, PostStore, UserStore};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

/// PostgreSQL user store.
pub struct PgUserStore {
    db: DbConn,
}

impl PgUserStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

/// PostgreSQL post store.
///
/// Posts carry their owner as a snapshot, so every read joins the owner row.
pub struct PgPostStore {
    db: DbConn,
}

impl PgPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn rebuild(row: (post::Model, Option<user::Model>)) -> Result<Post, RepoError> {
    let (post, owner) = row;
    let owner =
        owner.ok_or_else(|| RepoError::Query(format!("owner row missing for post {}", post.id)))?;

    Ok(post.into_domain(owner))
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        row.map(rebuild).transpose()
    }

    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        // The owner snapshot survives the round trip; only the row columns
        // go through the database.
        let owner = post.owner.clone();

        let active: post::ActiveModel = post.into();
        let model = active.insert(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Entity already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;

        Ok(Post {
            id: model.id,
            owner,
            title: model.title,
            body: model.body,
        })
    }

    async fn update(&self, post: Post) -> Result<(), RepoError> {
        let active: post::ActiveModel = post.into();
        active
            .update(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn search(&self, params: PostSearchParams) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?params, "Searching posts");

        let mut query = PostEntity::find().find_also_related(UserEntity);
        if let Some(username) = params.username {
            query = query.filter(user::Column::Username.eq(username));
        }
        if let Some(fragment) = params.title_contains {
            query = query.filter(post::Column::Title.contains(fragment));
        }

        let rows = query
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        rows.into_iter().map(rebuild).collect()
    }
}
