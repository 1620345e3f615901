//! Users and posts REST backend: repositories over PostgreSQL (or an in-memory store), use-case
//! services enforcing email uniqueness and author existence, and axum routes.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Post, PostBody, PostCreate, PostUpdate, User, UserCreate};
pub use repository::{
    MemoryStore, PgPostRepository, PgUserRepository, PostRepository, UserRepository,
};
pub use routes::{app, router, ApiDoc};
pub use service::{PostService, UserService};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
