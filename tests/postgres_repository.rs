//! PostgreSQL repository checks. Runs only when `TEST_DATABASE_URL` points at a scratch database.

use blog_api::{
    apply_migrations, AppError, PgPostRepository, PgUserRepository, PostCreate, PostRepository,
    PostUpdate, UserCreate, UserRepository,
};
use sqlx::postgres::PgPoolOptions;

#[tokio::test]
async fn repositories_enforce_constraints_in_the_store() {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap();
    apply_migrations(&pool).await.unwrap();
    let users = PgUserRepository::new(pool.clone());
    let posts = PgPostRepository::new(pool.clone());

    let stamp = std::process::id();
    let email = format!("pg-{}@x.com", stamp);
    let created = users
        .create(&UserCreate {
            username: "pg".into(),
            email: email.clone(),
        })
        .await
        .unwrap();
    assert!(created.created_at.is_some());

    // The unique index rejects a duplicate even without the service pre-check.
    let dup = users
        .create(&UserCreate {
            username: "pg2".into(),
            email: email.clone(),
        })
        .await
        .unwrap_err();
    assert!(matches!(dup, AppError::DuplicateUser(_)));

    // The foreign key rejects an unknown author.
    let orphan = posts
        .create(&PostCreate {
            title: "t".into(),
            content: "c".into(),
            user_email: format!("ghost-{}@x.com", stamp),
        })
        .await
        .unwrap_err();
    assert!(matches!(orphan, AppError::AuthorNotFound(_)));

    let marker = format!("Marker{}_%", stamp);
    let post = posts
        .create(&PostCreate {
            title: marker.clone(),
            content: "body".into(),
            user_email: email.clone(),
        })
        .await
        .unwrap();
    let hits = posts
        .find_by_title_or_content(&marker.to_lowercase())
        .await
        .unwrap();
    assert_eq!(hits, vec![post.clone()]);
    let literal = posts
        .find_by_title_or_content(&format!("Marker{}_x", stamp))
        .await
        .unwrap();
    assert!(literal.is_empty());

    let missing = posts
        .update(
            i32::MAX,
            &PostUpdate {
                title: "t".into(),
                content: "c".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::NotFound(_)));

    assert_eq!(users.delete(created.id).await.unwrap().map(|u| u.id), Some(created.id));
    let kept = posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(kept.user_email, None);
    assert_eq!(posts.delete(post.id).await.unwrap(), Some(kept));
    assert_eq!(posts.delete(post.id).await.unwrap(), None);
}
