//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostStore, UserStore};
use quill_core::service::PostService;
use quill_infra::{DatabaseConfig, MemoryPostStore, MemoryUserStore};

#[cfg(feature = "postgres")]
use quill_infra::{PgPostStore, PgUserStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Build the application state with appropriate store implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let (post_store, user_store): (Arc<dyn PostStore>, Arc<dyn UserStore>) = {
            if let Some(config) = db_config {
                match quill_infra::connect(config).await {
                    Ok(conn) => (
                        Arc::new(PgPostStore::new(conn.clone())),
                        Arc::new(PgUserStore::new(conn)),
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        memory_stores()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                memory_stores()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (post_store, user_store): (Arc<dyn PostStore>, Arc<dyn UserStore>) = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory stores");
            memory_stores()
        };

        tracing::info!("Application state initialized");

        Self {
            posts: PostService::new(post_store, user_store),
        }
    }
}

fn memory_stores() -> (Arc<dyn PostStore>, Arc<dyn UserStore>) {
    (
        Arc::new(MemoryPostStore::new()),
        Arc::new(MemoryUserStore::new()),
    )
}
