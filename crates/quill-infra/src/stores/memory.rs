//! In-memory stores - used as fallback when no database is configured.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostSearchParams, PostStore, UserStore};

/// In-memory user store using a simple HashMap with async RwLock.
///
/// The port has no create operation for users, so seed them up front (or
/// insert through [`MemoryUserStore::insert`]).
pub struct MemoryUserStore {
    users: RwLock<HashMap<i32, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    pub fn seeded(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

struct PostTable {
    rows: HashMap<i32, Post>,
    next_id: i32,
}

/// In-memory post store with monotonically increasing ids starting at 1.
pub struct MemoryPostStore {
    table: RwLock<PostTable>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(PostTable {
                rows: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn get_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;

        post.id = table.next_id;
        table.next_id += 1;
        table.rows.insert(post.id, post.clone());

        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<(), RepoError> {
        let mut table = self.table.write().await;

        match table.rows.get_mut(&post.id) {
            Some(slot) => {
                *slot = post;
                Ok(())
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        match self.table.write().await.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }

    async fn search(&self, params: PostSearchParams) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;

        let mut matches: Vec<Post> = table
            .rows
            .values()
            .filter(|p| {
                params
                    .username
                    .as_ref()
                    .map_or(true, |u| &p.owner.username == u)
            })
            .filter(|p| {
                params
                    .title_contains
                    .as_ref()
                    .map_or(true, |t| p.title.contains(t.as_str()))
            })
            .cloned()
            .collect();
        matches.sort_by_key(|p| p.id);

        Ok(matches)
    }
}
