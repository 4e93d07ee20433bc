use sqlx::PgPool;

use super::models::DonationCenter;

/// Donation centers are reference data; the full list is returned as-is.
pub async fn list_all(pool: &PgPool) -> Result<Vec<DonationCenter>, sqlx::Error> {
    sqlx::query_as::<_, DonationCenter>("SELECT * FROM donation_centers ORDER BY name")
        .fetch_all(pool)
        .await
}
