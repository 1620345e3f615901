//! DDL for the users and posts tables. Idempotent; safe to run on every start.
//!
//! The unique index on `users.email` and the foreign key on `posts.user_email` are the final
//! authority for both invariants. Deleting a user keeps their posts and nulls the author.

use crate::error::AppError;
use sqlx::PgPool;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        user_email TEXT REFERENCES users (email) ON UPDATE CASCADE ON DELETE SET NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS posts_user_email_idx ON posts (user_email)",
];

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for sql in STATEMENTS {
        tracing::debug!(sql = %sql.trim(), "migration");
        sqlx::query(sql).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(statements = STATEMENTS.len(), "migrations applied");
    Ok(())
}
