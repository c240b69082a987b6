//! Item input validation.
//!
//! Rejects bad input before it enters the data model; the expiry engine only
//! ever sees names and shelf lives that passed these checks.

use validator::Validate;

use crate::constants::{MAX_ITEM_NAME_LENGTH, MAX_SHELF_LIFE_DAYS, MIN_SHELF_LIFE_DAYS};
use crate::error::AppError;
use crate::models::NewPantryItem;

/// Validate an item name: non-empty after trimming, at most 100 characters.
pub fn validate_item_name(name: &str) -> Result<(), AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(
            "Item name cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() as u64 > MAX_ITEM_NAME_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "Item name must be at most {} characters",
            MAX_ITEM_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Validate a shelf life in days against the domain bounds.
pub fn validate_shelf_life(days: i32) -> Result<(), AppError> {
    if !(MIN_SHELF_LIFE_DAYS..=MAX_SHELF_LIFE_DAYS).contains(&days) {
        return Err(AppError::InvalidInput(format!(
            "Shelf life must be between {} and {} days",
            MIN_SHELF_LIFE_DAYS, MAX_SHELF_LIFE_DAYS
        )));
    }
    Ok(())
}

/// Full validation for a new item: derive-based field checks plus the name
/// trim rule the derive cannot express.
pub fn validate_new_item(item: &NewPantryItem) -> Result<(), AppError> {
    item.validate()?;
    validate_item_name(&item.name)?;
    validate_shelf_life(item.shelf_life_days)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rules() {
        assert!(validate_item_name("milk").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"x".repeat(100)).is_ok());
        assert!(validate_item_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn shelf_life_rules() {
        assert!(validate_shelf_life(1).is_ok());
        assert!(validate_shelf_life(3650).is_ok());
        assert!(validate_shelf_life(0).is_err());
        assert!(validate_shelf_life(3651).is_err());
        assert!(validate_shelf_life(-5).is_err());
    }

    #[test]
    fn whitespace_only_name_fails_even_when_derive_passes() {
        let item = NewPantryItem {
            name: "   ".to_string(),
            shelf_life_days: 7,
        };
        // Three spaces satisfy the length derive but not the trim rule.
        let err = validate_new_item(&item).expect_err("whitespace name must fail");
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
