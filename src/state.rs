//! Shared application state for all routes. Repositories are injected, never global.

use crate::repository::{
    MemoryStore, PgPostRepository, PgUserRepository, PostRepository, UserRepository,
};
use crate::service::{PostService, UserService};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub posts: PostService,
    /// Present when backed by PostgreSQL; pinged by `/ready`.
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        AppState {
            users: UserService::new(users.clone()),
            posts: PostService::new(posts, users),
            pool: None,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
        let posts: Arc<dyn PostRepository> = Arc::new(PgPostRepository::new(pool.clone()));
        AppState {
            pool: Some(pool),
            ..AppState::new(users, posts)
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        AppState::new(store.clone(), store)
    }
}
