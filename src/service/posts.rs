//! Post use cases.

use crate::error::AppError;
use crate::model::{Post, PostCreate, PostUpdate};
use crate::repository::{PostRepository, UserRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        PostService { posts, users }
    }

    pub async fn list(&self) -> Result<Vec<Post>, AppError> {
        self.posts.list().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Post>, AppError> {
        self.posts.find_by_id(id).await
    }

    /// Requires `user_email` to belong to an existing user. The foreign key on
    /// `posts.user_email` covers an author deleted between the check and the insert.
    pub async fn create(&self, data: PostCreate) -> Result<Post, AppError> {
        if self.users.find_by_email(&data.user_email).await?.is_none() {
            tracing::warn!(user_email = %data.user_email, "post author does not exist");
            return Err(AppError::AuthorNotFound(data.user_email));
        }
        let post = self.posts.create(&data).await?;
        tracing::info!(id = post.id, user_email = %data.user_email, "post created");
        Ok(post)
    }

    /// The author is not re-checked.
    pub async fn update(&self, id: i32, data: PostUpdate) -> Result<Post, AppError> {
        self.posts.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> Result<Option<Post>, AppError> {
        let deleted = self.posts.delete(id).await?;
        if deleted.is_some() {
            tracing::info!(id, "post deleted");
        }
        Ok(deleted)
    }

    pub async fn find_by_title_or_content(&self, search: &str) -> Result<Vec<Post>, AppError> {
        self.posts.find_by_title_or_content(search).await
    }
}
