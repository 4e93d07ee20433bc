use sqlx::{postgres::PgPoolOptions, Error, Executor, PgPool};
use thiserror::Error;

pub mod centers;
pub mod medicines;
pub mod models;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to parse database URL: {0}")]
    UrlParse(String),
    #[error("Database error: {0}")]
    Sqlx(#[from] Error),
    #[error("Failed to create database: {0}")]
    CreateDb(String),
}

const SCHEMA: &[&str] = &[
    "CREATE EXTENSION IF NOT EXISTS pgcrypto",
    "CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS sessions (
        token UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        expires_at TIMESTAMPTZ NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS medicines (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        expiry_date DATE NOT NULL,
        barcode TEXT,
        quantity INT NOT NULL DEFAULT 1,
        category TEXT,
        notes TEXT,
        marked_for_donation BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE INDEX IF NOT EXISTS medicines_user_id_idx ON medicines (user_id)",
    "CREATE TABLE IF NOT EXISTS donation_centers (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        phone TEXT NOT NULL,
        email TEXT NOT NULL
    )",
];

pub async fn init_db(database_url: &str) -> Result<PgPool, DatabaseError> {
    let (base_url, db_name) = parse_database_url(database_url)?;

    let temp_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&base_url)
        .await
        .map_err(DatabaseError::Sqlx)?;

    ensure_database_exists(&temp_pool, &db_name).await?;

    let pool = PgPool::connect(database_url)
        .await
        .map_err(DatabaseError::Sqlx)?;

    apply_schema(&pool).await?;

    Ok(pool)
}

/// Runs the idempotent schema statements; safe to call on every startup.
pub async fn apply_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    for statement in SCHEMA {
        pool.execute(*statement).await.map_err(DatabaseError::Sqlx)?;
    }
    Ok(())
}

fn parse_database_url(database_url: &str) -> Result<(String, String), DatabaseError> {
    let base_url = database_url
        .rsplit_once('/')
        .ok_or_else(|| DatabaseError::UrlParse("Invalid database URL format".to_string()))?
        .0
        .to_string();

    let db_name = database_url
        .split('/')
        .next_back()
        .and_then(|s| s.split('?').next())
        .ok_or_else(|| DatabaseError::UrlParse("Failed to extract database name".to_string()))?
        .to_string();

    Ok((base_url, db_name))
}

async fn ensure_database_exists(pool: &PgPool, db_name: &str) -> Result<(), DatabaseError> {
    let db_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(db_name)
            .fetch_one(pool)
            .await
            .map_err(DatabaseError::Sqlx)?;

    if !db_exists {
        pool.execute(format!("CREATE DATABASE {}", db_name).as_str())
            .await
            .map_err(|e| DatabaseError::CreateDb(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_url_into_base_and_name() {
        let (base, name) =
            parse_database_url("postgres://user:pw@localhost:5432/meditrack").unwrap();
        assert_eq!(base, "postgres://user:pw@localhost:5432");
        assert_eq!(name, "meditrack");
    }

    #[test]
    fn strips_query_parameters_from_database_name() {
        let (_, name) =
            parse_database_url("postgres://localhost/meditrack?sslmode=disable").unwrap();
        assert_eq!(name, "meditrack");
    }

    #[test]
    fn rejects_urls_without_a_path() {
        assert!(parse_database_url("not-a-url").is_err());
    }
}
