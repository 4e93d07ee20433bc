use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;

use crate::auth::AuthUser;
use crate::db::medicines;
use crate::error::AppError;
use crate::inventory::{summarize, InventorySummary};
use crate::state::AppState;

/// The four dashboard counts, computed over the caller's full inventory.
pub async fn stats(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<InventorySummary>, AppError> {
    let today = Utc::now().date_naive();
    let records = medicines::list_by_owner(&state.pool, user.id).await?;
    Ok(Json(summarize(&records, today)))
}
