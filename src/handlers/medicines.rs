use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::medicines::{self, MedicineChanges, NewMedicine};
use crate::db::models::{is_valid_category, Medicine};
use crate::error::AppError;
use crate::expiry::{classify, days_until_expiry, ExpiryStatus};
use crate::inventory::{build_view, InventoryFilter, SortOrder};
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct ListParams {
    #[serde(default)]
    pub filter: InventoryFilter,
    #[serde(default)]
    pub sort: SortOrder,
}

/// A medicine row plus its derived lifecycle state. Both derived fields are
/// computed from the single `today` captured for the whole response.
#[derive(Serialize)]
pub struct MedicineView {
    #[serde(flatten)]
    pub medicine: Medicine,
    pub status: ExpiryStatus,
    pub days_until_expiry: i64,
}

impl MedicineView {
    pub fn new(medicine: Medicine, today: NaiveDate) -> Self {
        let status = classify(medicine.expiry_date, today);
        let days_until_expiry = days_until_expiry(medicine.expiry_date, today);
        MedicineView { medicine, status, days_until_expiry }
    }
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<MedicineView>>, AppError> {
    let today = Utc::now().date_naive();
    let records = medicines::list_by_owner(&state.pool, user.id).await?;
    let view = build_view(records, params.filter, params.sort, today)
        .into_iter()
        .map(|m| MedicineView::new(m, today))
        .collect();
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct CreateMedicine {
    pub name: String,
    pub expiry_date: NaiveDate,
    pub barcode: Option<String>,
    pub quantity: Option<i32>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(body): Json<CreateMedicine>,
) -> Result<(StatusCode, Json<Medicine>), AppError> {
    let name = validate_name(&body.name)?;
    let quantity = body.quantity.unwrap_or(1);
    validate_quantity(quantity)?;
    if let Some(category) = body.category.as_deref() {
        validate_category(category)?;
    }

    let created = medicines::insert(
        &state.pool,
        user.id,
        NewMedicine {
            name,
            expiry_date: body.expiry_date,
            barcode: body.barcode,
            quantity,
            category: body.category,
            notes: body.notes,
        },
    )
    .await?;
    log::info!("Medicine {} added for user {}", created.id, user.id);
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Deserialize, Default)]
pub struct UpdateMedicine {
    pub name: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub barcode: Option<String>,
    pub quantity: Option<i32>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMedicine>,
) -> Result<Json<Medicine>, AppError> {
    let name = body.name.as_deref().map(validate_name).transpose()?;
    if let Some(quantity) = body.quantity {
        validate_quantity(quantity)?;
    }
    if let Some(category) = body.category.as_deref() {
        validate_category(category)?;
    }

    let changes = MedicineChanges {
        name,
        expiry_date: body.expiry_date,
        barcode: body.barcode,
        quantity: body.quantity,
        category: body.category,
        notes: body.notes,
    };
    let updated = medicines::update(&state.pool, user.id, id, changes)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if medicines::delete(&state.pool, user.id, id).await? {
        log::info!("Medicine {} deleted for user {}", id, user.id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

#[derive(Deserialize)]
pub struct DonationFlag {
    pub marked: bool,
}

/// Idempotent by contract: re-marking an already-marked medicine returns
/// the row unchanged.
pub async fn set_donation(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<DonationFlag>,
) -> Result<Json<Medicine>, AppError> {
    let updated = medicines::set_donation(&state.pool, user.id, id, body.marked)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(updated))
}

fn validate_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Medicine name is required".into()));
    }
    Ok(trimmed.to_string())
}

fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::Validation("Quantity must be at least 1".into()));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), AppError> {
    if !is_valid_category(category) {
        return Err(AppError::Validation(format!("Unknown category: {category}")));
    }
    Ok(())
}
