//! Identity provider backed by the `users` and `sessions` tables.
//!
//! Password storage and verification are delegated to PostgreSQL's
//! `pgcrypto` (`crypt`/`gen_salt`); this module never sees a hash. Sessions
//! are opaque UUID bearer tokens with a fixed TTL.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use chrono::Duration;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::User;
use crate::error::AppError;
use crate::state::AppState;

const USER_COLUMNS: &str = "id, email, created_at";

pub async fn sign_up(pool: &PgPool, email: &str, password: &str) -> Result<User, AppError> {
    validate_credentials(email, password)?;

    let query = format!(
        "INSERT INTO users (email, password_hash)
         VALUES ($1, crypt($2, gen_salt('bf')))
         RETURNING {USER_COLUMNS}"
    );
    sqlx::query_as::<_, User>(&query)
        .bind(email)
        .bind(password)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::EmailTaken,
            _ => AppError::Database(e),
        })
}

/// Verifies the password in SQL and issues a fresh session token.
pub async fn sign_in(
    pool: &PgPool,
    email: &str,
    password: &str,
    session_ttl_hours: i64,
) -> Result<(Uuid, User), AppError> {
    let query = format!(
        "SELECT {USER_COLUMNS} FROM users
         WHERE email = $1 AND password_hash = crypt($2, password_hash)"
    );
    let user = sqlx::query_as::<_, User>(&query)
        .bind(email)
        .bind(password)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let token = Uuid::new_v4();
    let expires_at = chrono::Utc::now() + Duration::hours(session_ttl_hours);
    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(token)
        .bind(user.id)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok((token, user))
}

/// Deleting an unknown or already-expired token is a no-op.
pub async fn sign_out(pool: &PgPool, token: Uuid) -> Result<(), AppError> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn current_user(pool: &PgPool, token: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT u.id, u.email, u.created_at
         FROM sessions s
         JOIN users u ON u.id = s.user_id
         WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email address is required".into()));
    }
    if password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}

pub fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim()
        .parse()
        .ok()
}

/// Extractor for routes that require an authenticated caller. A missing,
/// malformed, unknown, or expired token rejects with 401 before the
/// handler runs.
pub struct AuthUser(pub User);

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AppError::NotAuthenticated)?;
        let user = current_user(&state.pool, token)
            .await?
            .ok_or(AppError::NotAuthenticated)?;
        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_a_bearer_token() {
        let token = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        assert_eq!(bearer_token(&headers), Some(token));
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer not-a-uuid"),
        );
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn credential_validation_guards_the_write_boundary() {
        assert!(validate_credentials("user@example.com", "longenough").is_ok());
        assert!(validate_credentials("", "longenough").is_err());
        assert!(validate_credentials("no-at-sign", "longenough").is_err());
        assert!(validate_credentials("user@example.com", "short").is_err());
    }
}
