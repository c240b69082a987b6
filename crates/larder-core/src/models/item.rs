use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::expiry::{self, ExpiryClassification};

/// A pantry item. Owned by exactly one account; immutable once created
/// except for deletion.
///
/// `added_date` is a calendar date: expiry arithmetic never sees a
/// time-of-day component.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
pub struct PantryItem {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub shelf_life_days: i32,
    pub added_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl PantryItem {
    /// Calendar date on which this item expires.
    pub fn expiry_date(&self) -> NaiveDate {
        expiry::expiry_date(self.added_date, self.shelf_life_days)
    }

    /// Classify this item against the given reference date.
    pub fn classify(&self, today: NaiveDate) -> ExpiryClassification {
        expiry::classify(self.added_date, self.shelf_life_days, today)
    }
}

/// Request payload for creating an item, from manual entry or an accepted
/// scan draft. Validation bounds match the stored column constraints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewPantryItem {
    #[validate(length(min = 1, max = 100, message = "Item name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 3650, message = "Shelf life must be 1-3650 days"))]
    pub shelf_life_days: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_validation_bounds() {
        let ok = NewPantryItem {
            name: "milk".to_string(),
            shelf_life_days: 7,
        };
        assert!(ok.validate().is_ok());

        let empty_name = NewPantryItem {
            name: String::new(),
            shelf_life_days: 7,
        };
        assert!(empty_name.validate().is_err());

        let long_name = NewPantryItem {
            name: "x".repeat(101),
            shelf_life_days: 7,
        };
        assert!(long_name.validate().is_err());

        let zero_shelf_life = NewPantryItem {
            name: "milk".to_string(),
            shelf_life_days: 0,
        };
        assert!(zero_shelf_life.validate().is_err());

        let too_long_shelf_life = NewPantryItem {
            name: "honey".to_string(),
            shelf_life_days: 3651,
        };
        assert!(too_long_shelf_life.validate().is_err());

        let max_shelf_life = NewPantryItem {
            name: "honey".to_string(),
            shelf_life_days: 3650,
        };
        assert!(max_shelf_life.validate().is_ok());
    }
}
