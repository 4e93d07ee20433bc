use chrono::{DateTime, NaiveDate, Utc};
use phf::phf_set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Allowed values for `Medicine::category`. Checked at the write boundary;
/// rows already in the store are trusted.
pub static CATEGORY_LABELS: phf::Set<&'static str> = phf_set! {
    "tablets",
    "capsules",
    "liquid",
    "injection",
    "topical",
    "drops",
    "inhaler",
    "other",
};

pub fn is_valid_category(label: &str) -> bool {
    CATEGORY_LABELS.contains(label)
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Medicine {
    pub id: Uuid,
    /// Owner of the row; set once at insert and never updated.
    pub user_id: Uuid,
    pub name: String,
    pub expiry_date: NaiveDate,
    pub barcode: Option<String>,
    pub quantity: i32,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub marked_for_donation: bool,
    pub created_at: DateTime<Utc>,
}

/// Read-only reference data; listed in full, never mutated by the service.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct DonationCenter {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_set_accepts_the_fixed_labels_only() {
        for label in [
            "tablets", "capsules", "liquid", "injection", "topical", "drops", "inhaler", "other",
        ] {
            assert!(is_valid_category(label), "{label} should be allowed");
        }
        assert!(!is_valid_category("Tablets"));
        assert!(!is_valid_category("syrup"));
        assert!(!is_valid_category(""));
    }
}
