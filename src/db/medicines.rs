//! Medicine record store. Every query is scoped by `user_id`, so a row
//! owned by another user behaves exactly like a missing row.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::Medicine;

pub struct NewMedicine {
    pub name: String,
    pub expiry_date: NaiveDate,
    pub barcode: Option<String>,
    pub quantity: i32,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Default)]
pub struct MedicineChanges {
    pub name: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub barcode: Option<String>,
    pub quantity: Option<i32>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Fetches the owner's full inventory in a deterministic order, so the
/// stable view sort has a well-defined input order.
pub async fn list_by_owner(pool: &PgPool, user_id: Uuid) -> Result<Vec<Medicine>, sqlx::Error> {
    sqlx::query_as::<_, Medicine>(
        "SELECT * FROM medicines WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn insert(
    pool: &PgPool,
    user_id: Uuid,
    new: NewMedicine,
) -> Result<Medicine, sqlx::Error> {
    sqlx::query_as::<_, Medicine>(
        "INSERT INTO medicines (user_id, name, expiry_date, barcode, quantity, category, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(user_id)
    .bind(new.name)
    .bind(new.expiry_date)
    .bind(new.barcode)
    .bind(new.quantity)
    .bind(new.category)
    .bind(new.notes)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    changes: MedicineChanges,
) -> Result<Option<Medicine>, sqlx::Error> {
    sqlx::query_as::<_, Medicine>(
        "UPDATE medicines SET
            name = COALESCE($3, name),
            expiry_date = COALESCE($4, expiry_date),
            barcode = COALESCE($5, barcode),
            quantity = COALESCE($6, quantity),
            category = COALESCE($7, category),
            notes = COALESCE($8, notes)
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(changes.name)
    .bind(changes.expiry_date)
    .bind(changes.barcode)
    .bind(changes.quantity)
    .bind(changes.category)
    .bind(changes.notes)
    .fetch_optional(pool)
    .await
}

/// Idempotent: setting the flag to its current value succeeds and returns
/// the unchanged row.
pub async fn set_donation(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    marked: bool,
) -> Result<Option<Medicine>, sqlx::Error> {
    sqlx::query_as::<_, Medicine>(
        "UPDATE medicines SET marked_for_donation = $3
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(marked)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM medicines WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Donation list for the donate view, soonest expiry first.
pub async fn list_marked_for_donation(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Medicine>, sqlx::Error> {
    sqlx::query_as::<_, Medicine>(
        "SELECT * FROM medicines
         WHERE user_id = $1 AND marked_for_donation
         ORDER BY expiry_date, id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
