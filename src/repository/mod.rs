//! Repositories: one store round trip per call, no retries, no caching.
//!
//! Not-found on reads and deletes is `Ok(None)`. Store failures propagate as [`AppError`], except
//! constraint violations that map onto the two invariants (unique email, existing author).

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{PgPostRepository, PgUserRepository};

use crate::error::AppError;
use crate::model::{Post, PostCreate, PostUpdate, User, UserCreate};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by id.
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn create(&self, data: &UserCreate) -> Result<User, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;
    /// Exact match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    /// Returns the deleted row. Posts by this user keep existing with a null author.
    async fn delete(&self, id: i32) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts ordered by id.
    async fn list(&self) -> Result<Vec<Post>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, AppError>;
    /// Persists `user_email` as given; the store rejects unknown authors.
    async fn create(&self, data: &PostCreate) -> Result<Post, AppError>;
    /// Fails with [`AppError::NotFound`] when `id` does not exist.
    async fn update(&self, id: i32, data: &PostUpdate) -> Result<Post, AppError>;
    async fn delete(&self, id: i32) -> Result<Option<Post>, AppError>;
    /// Case-insensitive substring match on title or content, each post at most once.
    async fn find_by_title_or_content(&self, search: &str) -> Result<Vec<Post>, AppError>;
}
