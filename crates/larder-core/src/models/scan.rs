//! Photo-scan output and the shelf-life derivation for accepted drafts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::MAX_SHELF_LIFE_DAYS;

/// Raw extraction result from the vision model. Field contents are untrusted
/// until validated: in particular `expiry_date` is a free-form YYYY-MM-DD
/// string that must parse before it can influence a shelf life.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ExtractedItemDetails {
    /// Whether a recognizable food item with details was found in the image.
    pub item_found: bool,
    #[serde(default)]
    pub barcode: Option<String>,
    /// Expiry date printed on the packaging, in YYYY-MM-DD format.
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
}

/// Validated draft returned to the client after a scan. The client submits it
/// through the regular add-item endpoint, so it passes the same validation as
/// manual entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScannedItemDraft {
    pub item_found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Derived from the extracted expiry date; absent when the date was
    /// missing, unparseable, in the past, or implausibly far out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf_life_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

/// Derive a shelf life from an extracted expiry date.
///
/// Returns `None` for dates in the past or more than [`MAX_SHELF_LIFE_DAYS`]
/// out. An expiry of today maps to 1 so the value stays inside the validated
/// range; otherwise it is the whole-day difference.
pub fn shelf_life_from_expiry(expiry: NaiveDate, today: NaiveDate) -> Option<i32> {
    let days = (expiry - today).num_days();
    if days < 0 || days > MAX_SHELF_LIFE_DAYS as i64 {
        return None;
    }
    Some((days as i32).max(1))
}

impl ExtractedItemDetails {
    /// Convert raw extraction output into a validated draft. A malformed
    /// date degrades to "no suggestion" for that field rather than an error.
    pub fn into_draft(self, today: NaiveDate) -> ScannedItemDraft {
        let shelf_life_days = self
            .expiry_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .and_then(|expiry| shelf_life_from_expiry(expiry, today));

        ScannedItemDraft {
            item_found: self.item_found,
            name: self.product_name,
            shelf_life_days,
            barcode: self.barcode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn shelf_life_from_future_date() {
        let today = date(2024, 6, 10);
        assert_eq!(shelf_life_from_expiry(date(2024, 6, 17), today), Some(7));
    }

    #[test]
    fn shelf_life_today_maps_to_one() {
        let today = date(2024, 6, 10);
        assert_eq!(shelf_life_from_expiry(today, today), Some(1));
    }

    #[test]
    fn shelf_life_rejects_past_and_implausible_dates() {
        let today = date(2024, 6, 10);
        assert_eq!(shelf_life_from_expiry(date(2024, 6, 9), today), None);
        assert_eq!(shelf_life_from_expiry(date(2040, 1, 1), today), None);
    }

    #[test]
    fn draft_drops_malformed_expiry_date() {
        let today = date(2024, 6, 10);
        let details = ExtractedItemDetails {
            item_found: true,
            barcode: Some("4006381333931".to_string()),
            expiry_date: Some("17/06/2024".to_string()),
            product_name: Some("Oat milk".to_string()),
        };
        let draft = details.into_draft(today);
        assert!(draft.item_found);
        assert_eq!(draft.name.as_deref(), Some("Oat milk"));
        assert_eq!(draft.shelf_life_days, None);
        assert_eq!(draft.barcode.as_deref(), Some("4006381333931"));
    }

    #[test]
    fn draft_derives_shelf_life_from_valid_date() {
        let today = date(2024, 6, 10);
        let details = ExtractedItemDetails {
            item_found: true,
            barcode: None,
            expiry_date: Some("2024-06-20".to_string()),
            product_name: Some("Yogurt".to_string()),
        };
        let draft = details.into_draft(today);
        assert_eq!(draft.shelf_life_days, Some(10));
    }
}
