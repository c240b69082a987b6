use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use larder_core::expiry::{self, ClassifiedItem};

use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct AlertsResponse {
    /// Items needing attention (expired, expires-soon, nearing-expiry),
    /// most urgent first.
    pub alerts: Vec<ClassifiedItem>,
    pub count: usize,
}

/// The alert bucket: every non-fresh item, in urgency order. An empty pantry
/// yields an empty list, not an error.
#[utoipa::path(
    get,
    path = "/api/v0/alerts",
    tag = "items",
    responses(
        (status = 200, description = "Items needing attention", body = AlertsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(account_id = %user_ctx.account_id, operation = "list_alerts")
)]
pub async fn list_alerts(
    user_ctx: UserContext,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AlertsResponse>, HttpAppError> {
    let items = state
        .pantry_repository
        .list_items(user_ctx.account_id)
        .await?;

    let today = chrono::Utc::now().date_naive();
    let alerts = expiry::alert_bucket(items, today);

    let count = alerts.len();
    Ok(Json(AlertsResponse { alerts, count }))
}
