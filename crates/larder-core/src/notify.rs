//! Notification selection for the daily expiry check.
//!
//! Pure decision logic: given every user's pantry and a reference date,
//! decide who gets an email and assemble its content. Delivery (contact
//! lookup, SMTP) lives in larder-services; this module never performs IO.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::expiry::{self, day_phrase};
use crate::models::PantryItem;

/// One user's pantry, as handed to the batch run by the item store.
#[derive(Debug, Clone)]
pub struct Pantry {
    pub account_id: Uuid,
    pub items: Vec<PantryItem>,
}

/// An item that qualifies for notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiringItem {
    pub name: String,
    pub remaining_days: i64,
}

/// A user selected to receive an expiry alert in the current run.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationCandidate {
    pub account_id: Uuid,
    pub expiring_items: Vec<ExpiringItem>,
}

/// Select which users should be notified and with which items.
///
/// Keeps items with `0 <= remaining_days <= alert_threshold_days`: expired
/// items are deliberately excluded, this is a use-it-before-it-goes-bad
/// reminder rather than a retrospective one. Users with no items, or no
/// qualifying items, produce no candidate. Output follows input user order.
pub fn select_notifications(
    pantries: &[Pantry],
    today: NaiveDate,
    alert_threshold_days: i64,
) -> Vec<NotificationCandidate> {
    pantries
        .iter()
        .filter_map(|pantry| {
            if pantry.items.is_empty() {
                return None;
            }

            let expiring_items: Vec<ExpiringItem> = pantry
                .items
                .iter()
                .map(|item| ExpiringItem {
                    name: item.name.clone(),
                    remaining_days: expiry::remaining_days(
                        item.added_date,
                        item.shelf_life_days,
                        today,
                    ),
                })
                .filter(|item| item.remaining_days >= 0 && item.remaining_days <= alert_threshold_days)
                .collect();

            if expiring_items.is_empty() {
                return None;
            }

            Some(NotificationCandidate {
                account_id: pantry.account_id,
                expiring_items,
            })
        })
        .collect()
}

/// Subject line for the expiry alert email.
pub fn mail_subject() -> &'static str {
    "You have items expiring soon in your pantry!"
}

/// Plain-text body listing each expiring item with its day phrasing.
pub fn mail_body(candidate: &NotificationCandidate) -> String {
    let mut body = String::from(
        "Hello! You have some items in your pantry that are expiring soon:\n\n",
    );
    for item in &candidate.expiring_items {
        body.push_str(&format!(
            "  - {}: {}\n",
            item.name,
            day_phrase(item.remaining_days)
        ));
    }
    body.push_str("\nLog in to Larder to manage your items and prevent food waste!\n");
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

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
    fn selects_only_users_with_qualifying_items() {
        let today = date(2024, 6, 10);
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();
        let pantries = vec![
            Pantry {
                account_id: user_a,
                items: vec![
                    item("milk", date(2024, 6, 8), 4),     // remaining 2: kept
                    item("cereal", date(2024, 6, 5), 15),  // remaining 10: dropped
                ],
            },
            Pantry {
                account_id: user_b,
                items: vec![],
            },
        ];

        let candidates = select_notifications(&pantries, today, 3);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].account_id, user_a);
        assert_eq!(candidates[0].expiring_items.len(), 1);
        assert_eq!(candidates[0].expiring_items[0].name, "milk");
        assert_eq!(candidates[0].expiring_items[0].remaining_days, 2);
    }

    #[test]
    fn expired_items_are_excluded() {
        let today = date(2024, 6, 10);
        let pantries = vec![Pantry {
            account_id: Uuid::new_v4(),
            items: vec![item("old milk", date(2024, 6, 4), 4)], // remaining -2
        }];

        let candidates = select_notifications(&pantries, today, 3);
        assert!(candidates.is_empty());
    }

    #[test]
    fn threshold_boundaries_are_inclusive() {
        let today = date(2024, 6, 10);
        let pantries = vec![Pantry {
            account_id: Uuid::new_v4(),
            items: vec![
                item("today", date(2024, 6, 7), 3),    // remaining 0
                item("edge", date(2024, 6, 8), 5),     // remaining 3
                item("beyond", date(2024, 6, 8), 6),   // remaining 4
            ],
        }];

        let candidates = select_notifications(&pantries, today, 3);
        assert_eq!(candidates.len(), 1);
        let names: Vec<&str> = candidates[0]
            .expiring_items
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["today", "edge"]);
    }

    #[test]
    fn selection_is_idempotent() {
        let today = date(2024, 6, 10);
        let pantries = vec![Pantry {
            account_id: Uuid::new_v4(),
            items: vec![item("milk", date(2024, 6, 8), 4)],
        }];

        let first = select_notifications(&pantries, today, 3);
        let second = select_notifications(&pantries, today, 3);
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].expiring_items, second[0].expiring_items);
    }

    #[test]
    fn output_preserves_input_user_order() {
        let today = date(2024, 6, 10);
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let pantries: Vec<Pantry> = ids
            .iter()
            .map(|&account_id| Pantry {
                account_id,
                items: vec![item("milk", date(2024, 6, 8), 4)],
            })
            .collect();

        let candidates = select_notifications(&pantries, today, 3);
        let got: Vec<Uuid> = candidates.iter().map(|c| c.account_id).collect();
        assert_eq!(got, ids);
    }

    #[test]
    fn mail_body_lists_items_with_day_phrasing() {
        let candidate = NotificationCandidate {
            account_id: Uuid::new_v4(),
            expiring_items: vec![
                ExpiringItem {
                    name: "milk".to_string(),
                    remaining_days: 0,
                },
                ExpiringItem {
                    name: "eggs".to_string(),
                    remaining_days: 2,
                },
            ],
        };
        let body = mail_body(&candidate);
        assert!(body.contains("milk: Expires today"));
        assert!(body.contains("eggs: Expires in 2 days"));
        assert!(mail_subject().contains("expiring soon"));
    }
}
