use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use super::medicines::MedicineView;
use crate::auth::AuthUser;
use crate::db::models::DonationCenter;
use crate::db::{centers, medicines};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DonationOverview {
    pub medicines: Vec<MedicineView>,
    pub centers: Vec<DonationCenter>,
}

/// The donate view: the caller's donation-marked medicines (soonest expiry
/// first) alongside the full donation-center list, fetched concurrently.
pub async fn overview(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<DonationOverview>, AppError> {
    let today = Utc::now().date_naive();
    let (marked, all_centers) = futures::try_join!(
        medicines::list_marked_for_donation(&state.pool, user.id),
        centers::list_all(&state.pool),
    )?;

    Ok(Json(DonationOverview {
        medicines: marked
            .into_iter()
            .map(|m| MedicineView::new(m, today))
            .collect(),
        centers: all_centers,
    }))
}

pub async fn list_centers(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
) -> Result<Json<Vec<DonationCenter>>, AppError> {
    Ok(Json(centers::list_all(&state.pool).await?))
}
