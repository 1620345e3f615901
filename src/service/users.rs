//! User use cases.

use crate::error::AppError;
use crate::model::{User, UserCreate};
use crate::repository::UserRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        UserService { users }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    /// Rejects an email that is already taken. The pre-check and the insert are separate round
    /// trips; the store's unique index reports the raced case as the same error.
    pub async fn create(&self, data: UserCreate) -> Result<User, AppError> {
        if self.users.find_by_email(&data.email).await?.is_some() {
            tracing::warn!(email = %data.email, "user already exists");
            return Err(AppError::DuplicateUser(data.email));
        }
        let user = self.users.create(&data).await?;
        tracing::info!(id = user.id, email = %user.email, "user created");
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        self.users.find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.users.find_by_email(email).await
    }

    pub async fn delete(&self, id: i32) -> Result<Option<User>, AppError> {
        let deleted = self.users.delete(id).await?;
        if let Some(user) = &deleted {
            tracing::info!(id = user.id, email = %user.email, "user deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryStore::new()))
    }

    fn alice() -> UserCreate {
        UserCreate {
            username: "alice".into(),
            email: "a@x.com".into(),
        }
    }

    #[tokio::test]
    async fn created_user_is_found_by_email() {
        let users = service();
        let created = users.create(alice()).await.unwrap();
        let found = users.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.username, "alice");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_writing() {
        let users = service();
        users.create(alice()).await.unwrap();
        let second = UserCreate {
            username: "impostor".into(),
            email: "a@x.com".into(),
        };
        let err = users.create(second).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUser(_)));
        assert_eq!(err.to_string(), "User already exists");
        let all = users.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].username, "alice");
    }

    #[tokio::test]
    async fn lookups_of_missing_users_are_none() {
        let users = service();
        assert_eq!(users.find_by_id(1).await.unwrap(), None);
        assert_eq!(users.find_by_email("nobody@x.com").await.unwrap(), None);
        assert_eq!(users.delete(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn deleted_user_is_gone() {
        let users = service();
        let created = users.create(alice()).await.unwrap();
        assert_eq!(users.delete(created.id).await.unwrap(), Some(created));
        assert_eq!(users.find_by_email("a@x.com").await.unwrap(), None);
    }
}
