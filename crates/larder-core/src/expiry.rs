//! Expiry classification engine.
//!
//! Pure functions that turn `(added_date, shelf_life_days, today)` into a
//! remaining-day count, a status bucket, and a display label. Both the HTTP
//! handlers and the daily notifier go through this module, so the thresholds
//! in [`crate::constants`] are applied in exactly one place.
//!
//! All arithmetic operates on `NaiveDate`: callers convert timestamps with
//! `date_naive()` before reaching this module, which removes every sub-day
//! and DST edge case from the day-difference math.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{ALERT_THRESHOLD_DAYS, NEARING_EXPIRY_THRESHOLD_DAYS};
use crate::models::PantryItem;

/// Status bucket for a pantry item. Buckets are disjoint and exhaustive over
/// all possible remaining-day values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryStatus {
    Fresh,
    NearingExpiry,
    ExpiresSoon,
    Expired,
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryStatus::Fresh => write!(f, "fresh"),
            ExpiryStatus::NearingExpiry => write!(f, "nearing-expiry"),
            ExpiryStatus::ExpiresSoon => write!(f, "expires-soon"),
            ExpiryStatus::Expired => write!(f, "expired"),
        }
    }
}

impl ExpiryStatus {
    pub fn parse(s: &str) -> Option<ExpiryStatus> {
        match s {
            "fresh" => Some(ExpiryStatus::Fresh),
            "nearing-expiry" => Some(ExpiryStatus::NearingExpiry),
            "expires-soon" => Some(ExpiryStatus::ExpiresSoon),
            "expired" => Some(ExpiryStatus::Expired),
            _ => None,
        }
    }
}

/// Derived expiry state for one item. Computed fresh on every read, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExpiryClassification {
    /// Whole calendar days from `today` to the expiry date; negative once
    /// expired.
    pub remaining_days: i64,
    pub status: ExpiryStatus,
    pub label: String,
}

/// A pantry item together with its classification, as returned by list and
/// alert endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassifiedItem {
    #[serde(flatten)]
    pub item: PantryItem,
    pub expiry: ExpiryClassification,
}

/// Calendar expiry date: `added_date + shelf_life_days`. Rolls over month and
/// year boundaries. Shelf life is bounded by validation (1..=3650), so the
/// saturating fallback is unreachable for stored items.
pub fn expiry_date(added_date: NaiveDate, shelf_life_days: i32) -> NaiveDate {
    added_date
        .checked_add_days(Days::new(shelf_life_days.max(0) as u64))
        .unwrap_or(NaiveDate::MAX)
}

/// Signed whole-day count from `today` to the item's expiry date.
pub fn remaining_days(added_date: NaiveDate, shelf_life_days: i32, today: NaiveDate) -> i64 {
    (expiry_date(added_date, shelf_life_days) - today).num_days()
}

/// Day phrasing shared by item labels and notification emails:
/// "Expires today" / "Expires in N day(s)".
pub fn day_phrase(remaining_days: i64) -> String {
    if remaining_days == 0 {
        "Expires today".to_string()
    } else {
        format!(
            "Expires in {} day{}",
            remaining_days,
            if remaining_days == 1 { "" } else { "s" }
        )
    }
}

/// Classify one item against `today`.
///
/// Canonical policy, absolute thresholds:
/// - `remaining_days < 0` -> Expired
/// - `0..=3`  -> ExpiresSoon
/// - `4..=7`  -> NearingExpiry
/// - `> 7`    -> Fresh
pub fn classify(
    added_date: NaiveDate,
    shelf_life_days: i32,
    today: NaiveDate,
) -> ExpiryClassification {
    let remaining = remaining_days(added_date, shelf_life_days, today);

    let (status, label) = if remaining < 0 {
        let elapsed = -remaining;
        (
            ExpiryStatus::Expired,
            format!(
                "Expired {} day{} ago",
                elapsed,
                if elapsed == 1 { "" } else { "s" }
            ),
        )
    } else if remaining <= ALERT_THRESHOLD_DAYS {
        (ExpiryStatus::ExpiresSoon, day_phrase(remaining))
    } else if remaining <= NEARING_EXPIRY_THRESHOLD_DAYS {
        (
            ExpiryStatus::NearingExpiry,
            format!("{} days left", remaining),
        )
    } else {
        (ExpiryStatus::Fresh, "Fresh".to_string())
    };

    ExpiryClassification {
        remaining_days: remaining,
        status,
        label,
    }
}

/// Classify a list of items and sort soonest-to-expire first.
///
/// The sort is stable and keyed only on `remaining_days`: expired items
/// (negative) come first, and ties keep their input order.
pub fn classify_all(items: Vec<PantryItem>, today: NaiveDate) -> Vec<ClassifiedItem> {
    let mut classified: Vec<ClassifiedItem> = items
        .into_iter()
        .map(|item| {
            let expiry = classify(item.added_date, item.shelf_life_days, today);
            ClassifiedItem { item, expiry }
        })
        .collect();
    classified.sort_by_key(|c| c.expiry.remaining_days);
    classified
}

/// The alert bucket: every item whose status is not Fresh, in urgency order.
pub fn alert_bucket(items: Vec<PantryItem>, today: NaiveDate) -> Vec<ClassifiedItem> {
    classify_all(items, today)
        .into_iter()
        .filter(|c| c.expiry.status != ExpiryStatus::Fresh)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn item(name: &str, added: NaiveDate, shelf_life: i32) -> PantryItem {
        PantryItem {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            name: name.to_string(),
            shelf_life_days: shelf_life,
            added_date: added,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn classify_is_deterministic() {
        let added = date(2024, 1, 1);
        let today = date(2024, 1, 5);
        let a = classify(added, 10, today);
        let b = classify(added, 10, today);
        assert_eq!(a, b);
    }

    #[test]
    fn remaining_days_decreases_by_one_per_day() {
        let added = date(2024, 1, 1);
        let mut today = date(2024, 1, 1);
        let mut prev = classify(added, 30, today).remaining_days;
        for _ in 0..40 {
            today = today.succ_opt().expect("valid successor date");
            let next = classify(added, 30, today).remaining_days;
            assert_eq!(next, prev - 1);
            prev = next;
        }
    }

    #[test]
    fn status_boundaries() {
        let added = date(2024, 1, 1);
        // shelf life 10 -> expiry 2024-01-11; pick todays to hit each boundary
        let cases = [
            (date(2024, 1, 12), -1, ExpiryStatus::Expired),
            (date(2024, 1, 11), 0, ExpiryStatus::ExpiresSoon),
            (date(2024, 1, 8), 3, ExpiryStatus::ExpiresSoon),
            (date(2024, 1, 7), 4, ExpiryStatus::NearingExpiry),
            (date(2024, 1, 4), 7, ExpiryStatus::NearingExpiry),
            (date(2024, 1, 3), 8, ExpiryStatus::Fresh),
        ];
        for (today, expected_remaining, expected_status) in cases {
            let c = classify(added, 10, today);
            assert_eq!(c.remaining_days, expected_remaining, "today={}", today);
            assert_eq!(c.status, expected_status, "today={}", today);
        }
    }

    #[test]
    fn expires_today_scenario() {
        // Added 2024-01-01 with shelf life 7, checked on 2024-01-08.
        let c = classify(date(2024, 1, 1), 7, date(2024, 1, 8));
        assert_eq!(c.remaining_days, 0);
        assert_eq!(c.status, ExpiryStatus::ExpiresSoon);
        assert_eq!(c.label, "Expires today");
    }

    #[test]
    fn nearing_expiry_scenario() {
        // Added 2024-01-01 with shelf life 10, checked on 2024-01-05.
        let c = classify(date(2024, 1, 1), 10, date(2024, 1, 5));
        assert_eq!(c.remaining_days, 6);
        assert_eq!(c.status, ExpiryStatus::NearingExpiry);
        assert_eq!(c.label, "6 days left");
    }

    #[test]
    fn expired_label_counts_elapsed_days() {
        let c = classify(date(2024, 1, 1), 2, date(2024, 1, 6));
        assert_eq!(c.remaining_days, -3);
        assert_eq!(c.status, ExpiryStatus::Expired);
        assert_eq!(c.label, "Expired 3 days ago");

        let c = classify(date(2024, 1, 1), 2, date(2024, 1, 4));
        assert_eq!(c.label, "Expired 1 day ago");
    }

    #[test]
    fn singular_plural_day_phrase() {
        assert_eq!(day_phrase(0), "Expires today");
        assert_eq!(day_phrase(1), "Expires in 1 day");
        assert_eq!(day_phrase(2), "Expires in 2 days");
    }

    #[test]
    fn expiry_date_rolls_over_month_and_year() {
        assert_eq!(expiry_date(date(2024, 1, 28), 5), date(2024, 2, 2));
        assert_eq!(expiry_date(date(2024, 12, 30), 3), date(2025, 1, 2));
        // 2024 is a leap year
        assert_eq!(expiry_date(date(2024, 2, 28), 1), date(2024, 2, 29));
        assert_eq!(expiry_date(date(2023, 2, 28), 1), date(2023, 3, 1));
    }

    #[test]
    fn classify_all_sorts_expired_first_then_ascending() {
        let today = date(2024, 6, 10);
        let items = vec![
            item("bread", date(2024, 6, 5), 10),  // remaining 5
            item("milk", date(2024, 6, 1), 2),    // remaining -7
            item("yogurt", date(2024, 6, 8), 4),  // remaining 2
            item("cereal", date(2024, 5, 1), 90), // remaining 50
        ];
        let sorted = classify_all(items, today);
        let remaining: Vec<i64> = sorted.iter().map(|c| c.expiry.remaining_days).collect();
        assert_eq!(remaining, vec![-7, 2, 5, 50]);
        assert_eq!(sorted[0].item.name, "milk");
    }

    #[test]
    fn classify_all_ties_keep_insertion_order() {
        let today = date(2024, 6, 10);
        let items = vec![
            item("first", date(2024, 6, 8), 4),
            item("second", date(2024, 6, 6), 6),
            item("third", date(2024, 6, 4), 8),
        ];
        // All three have remaining_days == 2
        let sorted = classify_all(items, today);
        let names: Vec<&str> = sorted.iter().map(|c| c.item.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn alert_bucket_excludes_fresh_items() {
        let today = date(2024, 6, 10);
        let items = vec![
            item("fresh", date(2024, 6, 10), 30),  // remaining 30
            item("soon", date(2024, 6, 9), 3),     // remaining 2
            item("nearing", date(2024, 6, 10), 6), // remaining 6
            item("gone", date(2024, 6, 1), 3),     // remaining -6
        ];
        let alerts = alert_bucket(items, today);
        let names: Vec<&str> = alerts.iter().map(|c| c.item.name.as_str()).collect();
        assert_eq!(names, vec!["gone", "soon", "nearing"]);
    }

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(ExpiryStatus::ExpiresSoon).expect("serialize"),
            serde_json::json!("expires-soon")
        );
        assert_eq!(ExpiryStatus::parse("nearing-expiry"), Some(ExpiryStatus::NearingExpiry));
        assert_eq!(ExpiryStatus::parse("stale"), None);
    }
}
