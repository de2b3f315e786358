//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub owner_id: i32,
    pub title: String,
    pub body: String,
}

/// Request to partially update a post; the target id comes from the URL.
///
/// Omitted fields keep their stored values. An explicitly empty title is
/// sent as `"title": ""` and is rejected server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub owner_id: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Query parameters for a post search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPostsQuery {
    pub username: Option<String>,
    pub title_contains: Option<String>,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
}

/// Response containing a full post with its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub owner: UserResponse,
    pub title: String,
    pub body: String,
}

/// Response containing the read-optimized single-post projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostBasicResponse {
    pub id: i32,
    pub author: String,
    pub title: String,
    pub body: String,
}
