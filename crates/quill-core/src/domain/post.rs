use serde::{Deserialize, Serialize};

use super::user::User;

/// Post entity - a piece of content owned by a user.
///
/// The owner is carried as a full [`User`] snapshot resolved at create or
/// update time, not as a bare id. `id` is `0` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub owner: User,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Create a not-yet-persisted post; the store assigns the id.
    pub fn new(owner: User, title: String, body: String) -> Self {
        Self {
            id: 0,
            owner,
            title,
            body,
        }
    }
}

/// Input for creating a post.
#[derive(Debug, Clone)]
pub struct PostCreate {
    pub owner_id: i32,
    pub title: String,
    pub body: String,
}

/// Input for partially updating a post.
///
/// `None` means "keep the stored value". An explicitly supplied empty title
/// (`Some(String::new())`) survives the merge and is rejected by validation.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub id: i32,
    pub owner_id: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Denormalized read projection of a post for single-post responses.
///
/// Exposes the owner's username rather than the owner id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostBasicView {
    pub id: i32,
    pub author: String,
    pub title: String,
    pub body: String,
}
