//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use quill_core::domain::Post;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Rebuild a domain Post from this row and its owner row.
    pub fn into_domain(self, owner: super::user::Model) -> Post {
        Post {
            id: self.id,
            owner: owner.into(),
            title: self.title,
            body: self.body,
        }
    }
}

/// Conversion from a domain Post to a SeaORM ActiveModel.
///
/// A not-yet-persisted post (id 0) leaves the id unset so the database
/// assigns one.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: if post.id == 0 { NotSet } else { Set(post.id) },
            user_id: Set(post.owner.id),
            title: Set(post.title),
            body: Set(post.body),
        }
    }
}
