//! Shared domain constants.
//!
//! The two thresholds below drive both the interactive classification and the
//! daily notifier. They must stay equal across call sites; keeping them here
//! is what guarantees the API and the batch job never disagree about which
//! items count as "expiring soon".

/// Items with `0..=ALERT_THRESHOLD_DAYS` remaining days qualify for the daily
/// notification email.
pub const ALERT_THRESHOLD_DAYS: i64 = 3;

/// Items with `(ALERT_THRESHOLD_DAYS + 1)..=NEARING_EXPIRY_THRESHOLD_DAYS`
/// remaining days are flagged for attention but not yet emailed.
pub const NEARING_EXPIRY_THRESHOLD_DAYS: i64 = 7;

/// Maximum length of a pantry item name.
pub const MAX_ITEM_NAME_LENGTH: u64 = 100;

/// Shelf life bounds in days (upper bound is ten years).
pub const MIN_SHELF_LIFE_DAYS: i32 = 1;
pub const MAX_SHELF_LIFE_DAYS: i32 = 3650;
