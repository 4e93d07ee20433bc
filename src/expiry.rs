use chrono::NaiveDate;
use serde::Serialize;

/// Number of whole days ahead of `today` that still counts as expiring soon.
/// The window is inclusive: a medicine expiring exactly seven days from now
/// is still `ExpiringSoon`.
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 7;

/// Derived lifecycle state of a medicine. Never stored; always recomputed
/// from `expiry_date` against a reference date captured once per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Safe,
}

/// Classifies an expiry date against a reference calendar date.
///
/// Boundary policy: a medicine expiring strictly before `today` is
/// `Expired`; one expiring today or within the next
/// [`EXPIRING_SOON_WINDOW_DAYS`] days (inclusive) is `ExpiringSoon`;
/// anything further out is `Safe`. Comparison is on calendar dates, so
/// time of day never affects the result.
pub fn classify(expiry_date: NaiveDate, today: NaiveDate) -> ExpiryStatus {
    if expiry_date < today {
        ExpiryStatus::Expired
    } else if (expiry_date - today).num_days() <= EXPIRING_SOON_WINDOW_DAYS {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Safe
    }
}

/// Signed whole-day distance from `today` to `expiry_date`; negative once
/// the medicine has expired.
pub fn days_until_expiry(expiry_date: NaiveDate, today: NaiveDate) -> i64 {
    (expiry_date - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_is_expiring_soon_not_expired() {
        let today = date(2024, 1, 1);
        assert_eq!(classify(today, today), ExpiryStatus::ExpiringSoon);
    }

    #[test]
    fn yesterday_is_expired() {
        let today = date(2024, 1, 1);
        assert_eq!(classify(date(2023, 12, 31), today), ExpiryStatus::Expired);
    }

    #[test]
    fn seventh_day_is_still_expiring_soon() {
        let today = date(2024, 1, 1);
        assert_eq!(classify(date(2024, 1, 8), today), ExpiryStatus::ExpiringSoon);
    }

    #[test]
    fn eighth_day_is_safe() {
        let today = date(2024, 1, 1);
        assert_eq!(classify(date(2024, 1, 9), today), ExpiryStatus::Safe);
    }

    #[test]
    fn classification_is_exhaustive_and_exclusive_over_a_year() {
        let today = date(2024, 2, 29);
        let mut day = today.checked_sub_days(Days::new(200)).unwrap();
        let end = today.checked_add_days(Days::new(200)).unwrap();
        while day <= end {
            let status = classify(day, today);
            let expected = if day < today {
                ExpiryStatus::Expired
            } else if (day - today).num_days() <= 7 {
                ExpiryStatus::ExpiringSoon
            } else {
                ExpiryStatus::Safe
            };
            assert_eq!(status, expected, "misclassified {day}");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn classification_crosses_month_and_year_boundaries() {
        let today = date(2023, 12, 28);
        assert_eq!(classify(date(2024, 1, 4), today), ExpiryStatus::ExpiringSoon);
        assert_eq!(classify(date(2024, 1, 5), today), ExpiryStatus::Safe);
    }

    #[test]
    fn days_until_expiry_is_signed() {
        let today = date(2024, 1, 10);
        assert_eq!(days_until_expiry(date(2024, 1, 13), today), 3);
        assert_eq!(days_until_expiry(date(2024, 1, 10), today), 0);
        assert_eq!(days_until_expiry(date(2024, 1, 7), today), -3);
    }
}
