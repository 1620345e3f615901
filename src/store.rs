//! Store bootstrap: create the database if needed and open the connection pool.

use crate::config::Config;
use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Open the pool for `database_url`, creating the database first when `config.ensure_database`.
pub async fn connect(config: &Config, database_url: &str) -> Result<PgPool, AppError> {
    if config.ensure_database {
        ensure_database_exists(database_url).await?;
    }
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| invalid_database_url(database_url, e.to_string()))?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(opts)
        .await?;
    tracing::info!(max_connections = config.max_connections, "connected to postgres");
    Ok(pool)
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| invalid_database_url(database_url, e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into (URL of the `postgres` admin database, target database name).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| invalid_database_url(url, "no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (path_and_query.trim(), None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

fn invalid_database_url(url: &str, reason: String) -> AppError {
    AppError::Config(ConfigError::Invalid {
        key: "DATABASE_URL",
        value: redact_credentials(url),
        reason,
    })
}

/// Replace the `user:password@` part of a URL so it can appear in logs.
fn redact_credentials(url: &str) -> String {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let authority_end = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i)
        .unwrap_or(url.len());
    match url.get(scheme_end..authority_end).and_then(|a| a.rfind('@')) {
        Some(at) => format!("{}***{}", &url[..scheme_end], &url[scheme_end + at..]),
        None => url.to_string(),
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/blog").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "blog");
    }

    #[test]
    fn keeps_query_parameters_on_admin_url() {
        let (admin, name) =
            parse_db_name_from_url("postgres://localhost/blog?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "blog");
    }

    #[test]
    fn url_without_path_is_a_config_error() {
        let err = parse_db_name_from_url("postgres://localhost").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::Invalid { key: "DATABASE_URL", .. })
        ));
        assert_eq!(err.code(), "config_error");
    }

    #[tokio::test]
    async fn unparsable_url_is_a_config_error_before_connecting() {
        let url = "postgres://localhost:notaport/blog";
        let err = ensure_database_exists(url).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::Invalid { key: "DATABASE_URL", .. })
        ));

        let config = Config::from_lookup(|k| (k == "ENSURE_DATABASE").then(|| "false".into()))
            .unwrap();
        let err = connect(&config, url).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn credentials_are_masked_in_config_errors() {
        assert_eq!(
            redact_credentials("postgres://u:secret@db:5432/blog"),
            "postgres://***@db:5432/blog"
        );
        assert_eq!(redact_credentials("postgres://localhost/blog"), "postgres://localhost/blog");
        let err = parse_db_name_from_url("postgres://u:secret@db").unwrap_err();
        assert!(!err.to_string().contains("secret"));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("blog"), "\"blog\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
