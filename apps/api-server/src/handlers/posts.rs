//! Post lifecycle handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{Post, PostCreate, PostUpdate};
use quill_core::ports::PostSearchParams;
use quill_shared::dto::{
    CreatePostRequest, PostBasicResponse, PostResponse, SearchPostsQuery, UpdatePostRequest,
    UserResponse,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        owner: UserResponse {
            id: post.owner.id,
            username: post.owner.username,
        },
        title: post.title,
        body: post.body,
    }
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .create(PostCreate {
            owner_id: req.owner_id,
            title: req.title,
            body: req.body,
        })
        .await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts
pub async fn search_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    let posts = state
        .posts
        .search(PostSearchParams {
            username: query.username,
            title_contains: query.title_contains,
        })
        .await?;

    let responses: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let view = state.posts.get_basic(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(PostBasicResponse {
        id: view.id,
        author: view.author,
        title: view.title,
        body: view.body,
    }))
}

/// PATCH /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    state
        .posts
        .update(PostUpdate {
            id: path.into_inner(),
            owner_id: req.owner_id,
            title: req.title,
            body: req.body,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
