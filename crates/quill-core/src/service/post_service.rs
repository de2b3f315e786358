use std::sync::Arc;

use crate::domain::{Post, PostBasicView, PostCreate, PostUpdate};
use crate::error::DomainError;
use crate::ports::{PostSearchParams, PostStore, UserStore};

/// Orchestrates the post lifecycle against the injected stores.
///
/// Stateless and safe for concurrent use. Every operation resolves the
/// entities it needs, validates the resulting post, then performs at most
/// one mutating store call - a failed lookup or validation never leaves a
/// partial write. Read-then-write sequences are not atomic with respect to
/// concurrent callers; that guarantee belongs to the store.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, users: Arc<dyn UserStore>) -> Self {
        Self { posts, users }
    }

    /// Create a post owned by an existing user.
    pub async fn create(&self, input: PostCreate) -> Result<Post, DomainError> {
        let owner = self.users.get_by_id(input.owner_id).await?.ok_or_else(|| {
            DomainError::NotFound(format!("User with id {} was not found.", input.owner_id))
        })?;

        let post = Post::new(owner, input.title, input.body);
        validate(&post)?;

        Ok(self.posts.create(post).await?)
    }

    /// Filtered search, delegated entirely to the store.
    pub async fn search(&self, params: PostSearchParams) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.search(params).await?)
    }

    /// Partially update a post: supplied fields replace the stored values,
    /// omitted fields keep them. The id always comes from the stored post.
    pub async fn update(&self, input: PostUpdate) -> Result<(), DomainError> {
        let existing = self.posts.get_by_id(input.id).await?.ok_or_else(|| {
            DomainError::NotFound(format!("post with ID {} not found!", input.id))
        })?;

        let owner = match input.owner_id {
            Some(owner_id) => self.users.get_by_id(owner_id).await?.ok_or_else(|| {
                DomainError::NotFound(format!("User with id {} was not found.", owner_id))
            })?,
            None => existing.owner,
        };

        let merged = Post {
            id: existing.id,
            owner,
            title: input.title.unwrap_or(existing.title),
            body: input.body.unwrap_or(existing.body),
        };
        validate(&merged)?;

        self.posts.update(merged).await?;
        Ok(())
    }

    /// Delete a post. The existence check exists to produce a precise error
    /// instead of a silent no-op.
    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if self.posts.get_by_id(id).await?.is_none() {
            return Err(DomainError::NotFound(format!(
                "post with ID {} was not found!",
                id
            )));
        }

        self.posts.delete(id).await?;
        Ok(())
    }

    /// Resolve a post into its denormalized read projection.
    pub async fn get_basic(&self, id: i32) -> Result<PostBasicView, DomainError> {
        let post = self
            .posts
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post with id {} not found", id)))?;

        Ok(PostBasicView {
            id: post.id,
            author: post.owner.username,
            title: post.title,
            body: post.body,
        })
    }
}

/// Content validity shared by create and update; runs after the merge so an
/// explicitly cleared title is caught while an omitted one is not.
fn validate(post: &Post) -> Result<(), DomainError> {
    if post.title.is_empty() {
        return Err(DomainError::Validation("Title cannot be empty.".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::User;
    use crate::error::RepoError;

    struct FakeUserStore {
        users: HashMap<i32, User>,
    }

    impl FakeUserStore {
        fn with_users(users: Vec<User>) -> Self {
            Self {
                users: users.into_iter().map(|u| (u.id, u)).collect(),
            }
        }
    }

    #[async_trait]
    impl UserStore for FakeUserStore {
        async fn get_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
            Ok(self.users.get(&id).cloned())
        }
    }

    struct FakePostStore {
        posts: Mutex<HashMap<i32, Post>>,
        next_id: AtomicI32,
    }

    impl FakePostStore {
        fn seeded(posts: Vec<Post>) -> Self {
            let max_id = posts.iter().map(|p| p.id).max().unwrap_or(0);
            Self {
                posts: Mutex::new(posts.into_iter().map(|p| (p.id, p)).collect()),
                next_id: AtomicI32::new(max_id + 1),
            }
        }

        fn stored(&self, id: i32) -> Option<Post> {
            self.posts.lock().unwrap().get(&id).cloned()
        }

        fn len(&self) -> usize {
            self.posts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PostStore for FakePostStore {
        async fn get_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().get(&id).cloned())
        }

        async fn create(&self, mut post: Post) -> Result<Post, RepoError> {
            post.id = self.next_id.fetch_add(1, Ordering::SeqCst);
            self.posts.lock().unwrap().insert(post.id, post.clone());
            Ok(post)
        }

        async fn update(&self, post: Post) -> Result<(), RepoError> {
            self.posts.lock().unwrap().insert(post.id, post);
            Ok(())
        }

        async fn delete(&self, id: i32) -> Result<(), RepoError> {
            self.posts.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn search(&self, _params: PostSearchParams) -> Result<Vec<Post>, RepoError> {
            let mut all: Vec<Post> = self.posts.lock().unwrap().values().cloned().collect();
            all.sort_by_key(|p| p.id);
            Ok(all)
        }
    }

    fn alice() -> User {
        User::new(1, "alice")
    }

    fn bob() -> User {
        User::new(2, "bob")
    }

    fn service(
        users: Vec<User>,
        posts: Vec<Post>,
    ) -> (PostService, Arc<FakePostStore>) {
        let post_store = Arc::new(FakePostStore::seeded(posts));
        let user_store = Arc::new(FakeUserStore::with_users(users));
        (
            PostService::new(post_store.clone(), user_store),
            post_store,
        )
    }

    fn seeded_post() -> Post {
        Post {
            id: 5,
            owner: alice(),
            title: "A".to_string(),
            body: "B".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_preserves_fields() {
        let (service, store) = service(vec![alice()], vec![]);

        let post = service
            .create(PostCreate {
                owner_id: 1,
                title: "Hello".to_string(),
                body: "World".to_string(),
            })
            .await
            .unwrap();

        assert_ne!(post.id, 0);
        assert_eq!(post.owner, alice());
        assert_eq!(post.title, "Hello");
        assert_eq!(post.body, "World");
        assert_eq!(store.stored(post.id), Some(post));
    }

    #[tokio::test]
    async fn test_create_unknown_owner_fails_without_write() {
        let (service, store) = service(vec![alice()], vec![]);

        let err = service
            .create(PostCreate {
                owner_id: 7,
                title: "Hello".to_string(),
                body: "World".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(err.to_string(), "User with id 7 was not found.");
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_create_empty_title_fails_without_write() {
        let (service, store) = service(vec![alice()], vec![]);

        let err = service
            .create(PostCreate {
                owner_id: 1,
                title: String::new(),
                body: "x".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Title cannot be empty.");
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_update_merges_only_supplied_fields() {
        let (service, store) = service(vec![alice()], vec![seeded_post()]);

        service
            .update(PostUpdate {
                id: 5,
                title: Some("C".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let stored = store.stored(5).unwrap();
        assert_eq!(stored.id, 5);
        assert_eq!(stored.owner, alice());
        assert_eq!(stored.title, "C");
        assert_eq!(stored.body, "B");
    }

    #[tokio::test]
    async fn test_update_replaces_owner_when_supplied() {
        let (service, store) = service(vec![alice(), bob()], vec![seeded_post()]);

        service
            .update(PostUpdate {
                id: 5,
                owner_id: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        let stored = store.stored(5).unwrap();
        assert_eq!(stored.owner, bob());
        assert_eq!(stored.title, "A");
        assert_eq!(stored.body, "B");
    }

    #[tokio::test]
    async fn test_update_unknown_post_fails_without_write() {
        let (service, store) = service(vec![alice()], vec![]);

        let err = service
            .update(PostUpdate {
                id: 999,
                title: Some("X".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(err.to_string(), "post with ID 999 not found!");
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_update_unknown_owner_fails_without_write() {
        let (service, store) = service(vec![alice()], vec![seeded_post()]);

        let err = service
            .update(PostUpdate {
                id: 5,
                owner_id: Some(42),
                title: Some("C".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "User with id 42 was not found.");
        assert_eq!(store.stored(5), Some(seeded_post()));
    }

    #[tokio::test]
    async fn test_update_cleared_title_is_rejected() {
        let (service, store) = service(vec![alice()], vec![seeded_post()]);

        let err = service
            .update(PostUpdate {
                id: 5,
                title: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Title cannot be empty.");
        assert_eq!(store.stored(5), Some(seeded_post()));
    }

    #[tokio::test]
    async fn test_update_omitted_title_keeps_existing() {
        let (service, store) = service(vec![alice()], vec![seeded_post()]);

        service
            .update(PostUpdate {
                id: 5,
                body: Some("new body".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let stored = store.stored(5).unwrap();
        assert_eq!(stored.title, "A");
        assert_eq!(stored.body, "new body");
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_the_target() {
        let mut other = seeded_post();
        other.id = 6;
        let (service, store) = service(vec![alice()], vec![seeded_post(), other]);

        service.delete(5).await.unwrap();

        assert_eq!(store.stored(5), None);
        assert!(store.stored(6).is_some());
    }

    #[tokio::test]
    async fn test_delete_unknown_post_fails() {
        let (service, _store) = service(vec![alice()], vec![]);

        let err = service.delete(999).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(err.to_string(), "post with ID 999 was not found!");
    }

    #[tokio::test]
    async fn test_get_basic_projects_owner_username() {
        let (service, _store) = service(vec![alice()], vec![seeded_post()]);

        let view = service.get_basic(5).await.unwrap();

        assert_eq!(
            view,
            PostBasicView {
                id: 5,
                author: "alice".to_string(),
                title: "A".to_string(),
                body: "B".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_get_basic_unknown_post_fails() {
        let (service, _store) = service(vec![alice()], vec![]);

        let err = service.get_basic(999).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(err.to_string(), "post with id 999 not found");
    }

    #[tokio::test]
    async fn test_search_returns_store_results_unchanged() {
        let mut other = seeded_post();
        other.id = 6;
        other.title = "Z".to_string();
        let (service, _store) = service(vec![alice()], vec![seeded_post(), other.clone()]);

        let results = service.search(PostSearchParams::default()).await.unwrap();

        assert_eq!(results, vec![seeded_post(), other]);
    }
}
