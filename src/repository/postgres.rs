//! PostgreSQL repositories over a pool handed in at construction.

use super::{PostRepository, UserRepository};
use crate::error::AppError;
use crate::model::{Post, PostCreate, PostUpdate, User, UserCreate};
use async_trait::async_trait;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, username, email, created_at, updated_at";
const POST_COLUMNS: &str = "id, title, content, user_email";

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        PgUserRepository { pool }
    }
}

#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        PgPostRepository { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn create(&self, data: &UserCreate) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (username, email) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, email = %data.email, "query");
        sqlx::query_as::<_, User>(&sql)
            .bind(&data.username)
            .bind(&data.email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_user_write_error(e, &data.email))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, email, "query");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = format!("DELETE FROM users WHERE id = $1 RETURNING {}", USER_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list(&self) -> Result<Vec<Post>, AppError> {
        let sql = format!("SELECT {} FROM posts ORDER BY id", POST_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Post>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, AppError> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, data: &PostCreate) -> Result<Post, AppError> {
        let sql = format!(
            "INSERT INTO posts (title, content, user_email) VALUES ($1, $2, $3) RETURNING {}",
            POST_COLUMNS
        );
        tracing::debug!(sql = %sql, user_email = %data.user_email, "query");
        sqlx::query_as::<_, Post>(&sql)
            .bind(&data.title)
            .bind(&data.content)
            .bind(&data.user_email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_post_write_error(e, &data.user_email))
    }

    async fn update(&self, id: i32, data: &PostUpdate) -> Result<Post, AppError> {
        let sql = format!(
            "UPDATE posts SET title = $1, content = $2 WHERE id = $3 RETURNING {}",
            POST_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Post>(&sql)
            .bind(&data.title)
            .bind(&data.content)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", id)))
    }

    async fn delete(&self, id: i32) -> Result<Option<Post>, AppError> {
        let sql = format!("DELETE FROM posts WHERE id = $1 RETURNING {}", POST_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_title_or_content(&self, search: &str) -> Result<Vec<Post>, AppError> {
        let sql = format!(
            r"SELECT {} FROM posts
              WHERE title ILIKE $1 ESCAPE '\' OR content ILIKE $1 ESCAPE '\'
              ORDER BY id",
            POST_COLUMNS
        );
        let pattern = format!("%{}%", escape_like(search));
        tracing::debug!(sql = %sql, pattern = %pattern, "query");
        let rows = sqlx::query_as::<_, Post>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// Escape LIKE metacharacters so the search string matches literally.
pub(crate) fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn map_user_write_error(e: sqlx::Error, email: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            tracing::warn!(email, "unique index rejected duplicate email");
            AppError::DuplicateUser(email.to_string())
        }
        _ => AppError::Db(e),
    }
}

fn map_post_write_error(e: sqlx::Error, user_email: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            tracing::warn!(user_email, "foreign key rejected unknown author");
            AppError::AuthorNotFound(user_email.to_string())
        }
        _ => AppError::Db(e),
    }
}
