use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored post. `user_email` is null once the author has been deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_email: Option<String>,
}

/// Request body for creating or updating a post. The author is taken from the `email` header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostBody {
    pub title: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostCreate {
    pub title: String,
    pub content: String,
    pub user_email: String,
}

/// Only title and content are mutable; the author is fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
}

impl PostBody {
    pub fn with_author(self, user_email: String) -> PostCreate {
        PostCreate {
            title: self.title,
            content: self.content,
            user_email,
        }
    }
}

impl From<PostBody> for PostUpdate {
    fn from(body: PostBody) -> Self {
        PostUpdate {
            title: body.title,
            content: body.content,
        }
    }
}
