use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{self, AuthUser};
use crate::db::models::User;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: Uuid,
    pub user: User,
}

pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = auth::sign_up(&state.pool, &credentials.email, &credentials.password).await?;
    log::info!("New account registered: {}", user.email);
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SessionResponse>, AppError> {
    let (token, user) = auth::sign_in(
        &state.pool,
        &credentials.email,
        &credentials.password,
        state.config.session_ttl_hours,
    )
    .await?;
    Ok(Json(SessionResponse { token, user }))
}

/// Signing out an unknown or already-expired token succeeds silently.
pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    if let Some(token) = auth::bearer_token(&headers) {
        auth::sign_out(&state.pool, token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}
