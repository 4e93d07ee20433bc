//! Pure view computation over already-fetched medicine rows.
//!
//! Handlers capture `today` once per request and pass it down, so every
//! record in one response is classified against the same calendar date even
//! if the request straddles midnight.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::models::Medicine;
use crate::expiry::{classify, ExpiryStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryFilter {
    #[default]
    All,
    #[serde(rename = "expiring")]
    ExpiringSoon,
    Expired,
}

impl InventoryFilter {
    fn matches(self, status: ExpiryStatus) -> bool {
        match self {
            InventoryFilter::All => true,
            InventoryFilter::ExpiringSoon => status == ExpiryStatus::ExpiringSoon,
            InventoryFilter::Expired => status == ExpiryStatus::Expired,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// Filters by lifecycle state and stable-sorts by expiry date. Records with
/// equal expiry dates keep their input order in either direction.
pub fn build_view(
    records: Vec<Medicine>,
    filter: InventoryFilter,
    sort: SortOrder,
    today: NaiveDate,
) -> Vec<Medicine> {
    let mut view: Vec<Medicine> = records
        .into_iter()
        .filter(|m| filter.matches(classify(m.expiry_date, today)))
        .collect();
    match sort {
        SortOrder::Ascending => view.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date)),
        SortOrder::Descending => view.sort_by(|a, b| b.expiry_date.cmp(&a.expiry_date)),
    }
    view
}

/// Dashboard counts over the unfiltered set. A record contributes to at
/// most one of `expiring`/`expired`, and to `donated` independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub total: usize,
    pub expiring: usize,
    pub expired: usize,
    pub donated: usize,
}

pub fn summarize(records: &[Medicine], today: NaiveDate) -> InventorySummary {
    let mut summary = InventorySummary {
        total: records.len(),
        expiring: 0,
        expired: 0,
        donated: 0,
    };
    for record in records {
        match classify(record.expiry_date, today) {
            ExpiryStatus::Expired => summary.expired += 1,
            ExpiryStatus::ExpiringSoon => summary.expiring += 1,
            ExpiryStatus::Safe => {}
        }
        if record.marked_for_donation {
            summary.donated += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn medicine(name: &str, expiry: NaiveDate, donated: bool) -> Medicine {
        Medicine {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            expiry_date: expiry,
            barcode: None,
            quantity: 1,
            category: None,
            notes: None,
            marked_for_donation: donated,
            created_at: Utc::now(),
        }
    }

    fn names(view: &[Medicine]) -> Vec<&str> {
        view.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn filters_partition_the_all_view() {
        let today = date(2024, 1, 1);
        let records = vec![
            medicine("expired", date(2023, 12, 20), false),
            medicine("soon", date(2024, 1, 5), false),
            medicine("safe", date(2024, 6, 1), false),
            medicine("today", today, false),
        ];

        let all = build_view(records.clone(), InventoryFilter::All, SortOrder::Ascending, today);
        let expiring = build_view(
            records.clone(),
            InventoryFilter::ExpiringSoon,
            SortOrder::Ascending,
            today,
        );
        let expired = build_view(records, InventoryFilter::Expired, SortOrder::Ascending, today);

        assert_eq!(all.len(), 4);
        assert_eq!(names(&expiring), vec!["today", "soon"]);
        assert_eq!(names(&expired), vec!["expired"]);
        for m in expiring.iter().chain(expired.iter()) {
            assert!(all.iter().any(|a| a.id == m.id));
        }
        assert!(expiring.iter().all(|m| expired.iter().all(|e| e.id != m.id)));
    }

    #[test]
    fn sort_is_stable_for_equal_dates_in_both_directions() {
        let today = date(2024, 1, 1);
        let shared = date(2024, 3, 10);
        let records = vec![
            medicine("first", shared, false),
            medicine("second", shared, false),
            medicine("third", shared, false),
        ];

        let asc = build_view(records.clone(), InventoryFilter::All, SortOrder::Ascending, today);
        let desc = build_view(records, InventoryFilter::All, SortOrder::Descending, today);
        assert_eq!(names(&asc), vec!["first", "second", "third"]);
        assert_eq!(names(&desc), vec!["first", "second", "third"]);
    }

    #[test]
    fn sorting_a_sorted_view_is_idempotent_and_direction_reverses_distinct_dates() {
        let today = date(2024, 1, 1);
        let records = vec![
            medicine("c", date(2024, 5, 1), false),
            medicine("a", date(2024, 2, 1), false),
            medicine("b", date(2024, 3, 1), false),
        ];

        let asc = build_view(records.clone(), InventoryFilter::All, SortOrder::Ascending, today);
        let again = build_view(asc.clone(), InventoryFilter::All, SortOrder::Ascending, today);
        assert_eq!(names(&asc), names(&again));

        let desc = build_view(records, InventoryFilter::All, SortOrder::Descending, today);
        let mut reversed = names(&desc);
        reversed.reverse();
        assert_eq!(names(&asc), reversed);
    }

    #[test]
    fn summary_counts_are_consistent() {
        let today = date(2024, 1, 1);
        let records = vec![
            medicine("expired-donated", date(2023, 11, 1), true),
            medicine("soon", date(2024, 1, 3), false),
            medicine("safe-donated", date(2025, 1, 1), true),
            medicine("safe", date(2025, 6, 1), false),
        ];

        let summary = summarize(&records, today);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.expiring, 1);
        assert_eq!(summary.expired, 1);
        assert_eq!(summary.donated, 2);
        assert!(summary.expiring + summary.expired <= summary.total);
    }

    #[test]
    fn scenario_from_the_donation_dashboard() {
        // now = 2024-01-01: B expires the same day, A nine days out, C in
        // thirty-one days.
        let today = date(2024, 1, 1);
        let records = vec![
            medicine("A", date(2024, 1, 10), false),
            medicine("B", date(2024, 1, 1), false),
            medicine("C", date(2024, 2, 1), false),
        ];

        assert_eq!(classify(records[0].expiry_date, today), ExpiryStatus::Safe);
        assert_eq!(classify(records[1].expiry_date, today), ExpiryStatus::ExpiringSoon);
        assert_eq!(classify(records[2].expiry_date, today), ExpiryStatus::Safe);

        let expired = build_view(records.clone(), InventoryFilter::Expired, SortOrder::Ascending, today);
        assert!(expired.is_empty());

        let expiring = build_view(records, InventoryFilter::ExpiringSoon, SortOrder::Ascending, today);
        assert_eq!(names(&expiring), vec!["B"]);
    }

    #[test]
    fn empty_inventory_summarizes_to_zeroes() {
        let summary = summarize(&[], date(2024, 1, 1));
        assert_eq!(
            summary,
            InventorySummary { total: 0, expiring: 0, expired: 0, donated: 0 }
        );
    }
}
