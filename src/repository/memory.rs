//! In-process store implementing both repositories over one shared table set.
//!
//! Mirrors the PostgreSQL constraints: unique `users.email`, `posts.user_email` must reference an
//! existing user on insert, and deleting a user nulls the author of their posts.

use super::{PostRepository, UserRepository};
use crate::error::AppError;
use crate::model::{Post, PostCreate, PostUpdate, User, UserCreate};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    last_user_id: i32,
    last_post_id: i32,
}

impl Tables {
    fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn create(&self, data: &UserCreate) -> Result<User, AppError> {
        let mut tables = self.write()?;
        if tables.user_by_email(&data.email).is_some() {
            return Err(AppError::DuplicateUser(data.email.clone()));
        }
        tables.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.last_user_id,
            username: data.username.clone(),
            email: data.email.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.read()?.user_by_email(email).cloned())
    }

    async fn delete(&self, id: i32) -> Result<Option<User>, AppError> {
        let mut tables = self.write()?;
        let Some(user) = tables.users.remove(&id) else {
            return Ok(None);
        };
        for post in tables.posts.values_mut() {
            if post.user_email.as_deref() == Some(user.email.as_str()) {
                post.user_email = None;
            }
        }
        Ok(Some(user))
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Post>, AppError> {
        Ok(self.read()?.posts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, AppError> {
        Ok(self.read()?.posts.get(&id).cloned())
    }

    async fn create(&self, data: &PostCreate) -> Result<Post, AppError> {
        let mut tables = self.write()?;
        if tables.user_by_email(&data.user_email).is_none() {
            return Err(AppError::AuthorNotFound(data.user_email.clone()));
        }
        tables.last_post_id += 1;
        let post = Post {
            id: tables.last_post_id,
            title: data.title.clone(),
            content: data.content.clone(),
            user_email: Some(data.user_email.clone()),
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: i32, data: &PostUpdate) -> Result<Post, AppError> {
        let mut tables = self.write()?;
        let post = tables
            .posts
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("post {}", id)))?;
        post.title = data.title.clone();
        post.content = data.content.clone();
        Ok(post.clone())
    }

    async fn delete(&self, id: i32) -> Result<Option<Post>, AppError> {
        Ok(self.write()?.posts.remove(&id))
    }

    /// ASCII letters match regardless of case; other characters must match exactly.
    /// PostgreSQL `ILIKE` may also fold non-ASCII letters, depending on the database locale.
    async fn find_by_title_or_content(&self, search: &str) -> Result<Vec<Post>, AppError> {
        let needle = search.to_ascii_lowercase();
        Ok(self
            .read()?
            .posts
            .values()
            .filter(|p| {
                p.title.to_ascii_lowercase().contains(&needle)
                    || p.content.to_ascii_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> UserCreate {
        UserCreate {
            username: username.into(),
            email: email.into(),
        }
    }

    fn post(title: &str, content: &str, user_email: &str) -> PostCreate {
        PostCreate {
            title: title.into(),
            content: content.into(),
            user_email: user_email.into(),
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order() {
        let store = MemoryStore::new();
        let a = UserRepository::create(&store, &user("alice", "a@x.com")).await.unwrap();
        let b = UserRepository::create(&store, &user("bob", "b@x.com")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert!(a.created_at.is_some());
        let listed = UserRepository::list(&store).await.unwrap();
        assert_eq!(listed, vec![a, b]);
    }

    #[tokio::test]
    async fn unique_email_is_enforced_by_the_store() {
        let store = MemoryStore::new();
        UserRepository::create(&store, &user("alice", "a@x.com")).await.unwrap();
        let err = UserRepository::create(&store, &user("other", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUser(ref e) if e == "a@x.com"));
        assert_eq!(UserRepository::list(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn post_insert_requires_existing_author() {
        let store = MemoryStore::new();
        let err = PostRepository::create(&store, &post("t", "c", "ghost@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::AuthorNotFound(_)));
        assert!(PostRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_user_nulls_the_author_of_their_posts() {
        let store = MemoryStore::new();
        let alice = UserRepository::create(&store, &user("alice", "a@x.com")).await.unwrap();
        UserRepository::create(&store, &user("bob", "b@x.com")).await.unwrap();
        let mine = PostRepository::create(&store, &post("mine", "c", "a@x.com")).await.unwrap();
        let theirs = PostRepository::create(&store, &post("theirs", "c", "b@x.com")).await.unwrap();

        let deleted = UserRepository::delete(&store, alice.id).await.unwrap();
        assert_eq!(deleted, Some(alice));

        let mine = PostRepository::find_by_id(&store, mine.id).await.unwrap().unwrap();
        assert_eq!(mine.user_email, None);
        let theirs = PostRepository::find_by_id(&store, theirs.id).await.unwrap().unwrap();
        assert_eq!(theirs.user_email.as_deref(), Some("b@x.com"));
    }

    #[tokio::test]
    async fn delete_of_missing_rows_is_none() {
        let store = MemoryStore::new();
        assert_eq!(UserRepository::delete(&store, 42).await.unwrap(), None);
        assert_eq!(PostRepository::delete(&store, 42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_of_missing_post_is_an_error() {
        let store = MemoryStore::new();
        let change = PostUpdate {
            title: "t".into(),
            content: "c".into(),
        };
        let err = PostRepository::update(&store, 7, &change).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_returns_each_post_once() {
        let store = MemoryStore::new();
        UserRepository::create(&store, &user("alice", "a@x.com")).await.unwrap();
        let both = PostRepository::create(&store, &post("Foo bar", "more foo", "a@x.com"))
            .await
            .unwrap();
        let body = PostRepository::create(&store, &post("Other", "has FOO inside", "a@x.com"))
            .await
            .unwrap();
        PostRepository::create(&store, &post("Nothing", "here", "a@x.com"))
            .await
            .unwrap();

        let hits = PostRepository::find_by_title_or_content(&store, "foo").await.unwrap();
        assert_eq!(hits, vec![both, body]);
    }

    #[tokio::test]
    async fn search_folds_ascii_case_only() {
        let store = MemoryStore::new();
        UserRepository::create(&store, &user("alice", "a@x.com")).await.unwrap();
        let ascii = PostRepository::create(&store, &post("CAFE menu", "", "a@x.com"))
            .await
            .unwrap();
        let accented = PostRepository::create(&store, &post("ÉTÉ", "été", "a@x.com"))
            .await
            .unwrap();

        let hits = PostRepository::find_by_title_or_content(&store, "cafe").await.unwrap();
        assert_eq!(hits, vec![ascii]);

        let hits = PostRepository::find_by_title_or_content(&store, "ÉTÉ").await.unwrap();
        assert_eq!(hits, vec![accented.clone()]);
        let hits = PostRepository::find_by_title_or_content(&store, "été").await.unwrap();
        assert_eq!(hits, vec![accented]);
        let hits = PostRepository::find_by_title_or_content(&store, "Été").await.unwrap();
        assert!(hits.is_empty());
    }
}
