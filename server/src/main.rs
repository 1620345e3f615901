//! Server binary: reads config from the environment, connects the store, serves the API.
//!
//! Run from repo root: `cargo run -p blog-server`
//! Without `DATABASE_URL` the API runs on the in-memory store.

use blog_api::{app, apply_migrations, connect, AppState, Config};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("blog_api=info,blog_server=info,tower_http=info")
            }),
        )
        .init();

    let state = match &config.database_url {
        Some(database_url) => {
            let pool = connect(&config, database_url).await?;
            apply_migrations(&pool).await?;
            AppState::postgres(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            AppState::in_memory()
        }
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state, &config)).await?;
    Ok(())
}
