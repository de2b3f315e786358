use async_trait::async_trait;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Filters for a post search, interpreted entirely by the store.
///
/// The service passes these through unchanged; filtering and ordering
/// semantics belong to the store implementation.
#[derive(Debug, Clone, Default)]
pub struct PostSearchParams {
    /// Exact owner username match.
    pub username: Option<String>,
    /// Title substring match.
    pub title_contains: Option<String>,
}

/// Lookup access to users. Users are created elsewhere.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<User>, RepoError>;
}

/// Persistence for posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Persist a new post, returning it with the assigned id.
    async fn create(&self, post: Post) -> Result<Post, RepoError>;

    /// Replace the stored post, keyed by `post.id`.
    async fn update(&self, post: Post) -> Result<(), RepoError>;

    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    async fn search(&self, params: PostSearchParams) -> Result<Vec<Post>, RepoError>;
}
