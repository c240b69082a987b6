use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// An account materialized from verified auth claims. The identity provider
/// itself stays external; this row exists so items have an owner and the
/// notifier has a contact address to resolve.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow)]
pub struct Account {
    pub id: Uuid,
    /// Contact address for expiry alerts. Absent means the notifier skips
    /// this account without error.
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
