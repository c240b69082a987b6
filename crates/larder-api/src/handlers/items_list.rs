use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use larder_core::expiry::{self, ClassifiedItem, ExpiryStatus};
use larder_core::AppError;

use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    /// Optional status filter: fresh, nearing-expiry, expires-soon, expired.
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListItemsResponse {
    pub items: Vec<ClassifiedItem>,
    pub count: usize,
}

/// List the account's pantry items with their expiry classification, sorted
/// soonest-to-expire first.
#[utoipa::path(
    get,
    path = "/api/v0/items",
    tag = "items",
    params(
        ("status" = Option<String>, Query, description = "Filter by expiry status")
    ),
    responses(
        (status = 200, description = "Pantry items with classification", body = ListItemsResponse),
        (status = 400, description = "Invalid status filter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(account_id = %user_ctx.account_id, operation = "list_items")
)]
pub async fn list_items(
    user_ctx: UserContext,
    Query(query): Query<ListItemsQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListItemsResponse>, HttpAppError> {
    let status_filter = match query.status.as_deref() {
        None => None,
        Some(s) => Some(ExpiryStatus::parse(s).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Invalid status filter: {}. Must be 'fresh', 'nearing-expiry', 'expires-soon', or 'expired'",
                s
            ))
        })?),
    };

    let items = state
        .pantry_repository
        .list_items(user_ctx.account_id)
        .await?;

    let today = chrono::Utc::now().date_naive();
    let mut classified = expiry::classify_all(items, today);
    if let Some(status) = status_filter {
        classified.retain(|c| c.expiry.status == status);
    }

    let count = classified.len();
    Ok(Json(ListItemsResponse {
        items: classified,
        count,
    }))
}
