use std::sync::Arc;

use axum::{extract::State, Json};

use larder_services::NotifierRunSummary;

use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Run one expiry check immediately.
///
/// Hook for an external scheduler (cron hitting this endpoint) and for
/// operators. The run is idempotent against stored state; invoking it twice
/// in a day re-notifies, which is the accepted trade-off.
#[utoipa::path(
    post,
    path = "/api/v0/admin/expiry-check",
    tag = "admin",
    responses(
        (status = 200, description = "Run summary", body = NotifierRunSummary),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Run failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(account_id = %user_ctx.account_id, operation = "expiry_check")
)]
pub async fn run_expiry_check(
    user_ctx: UserContext,
    State(state): State<Arc<AppState>>,
) -> Result<Json<NotifierRunSummary>, HttpAppError> {
    let summary = state.notifier.run_once().await?;

    tracing::info!(
        selected = summary.selected,
        notified = summary.notified,
        skipped = summary.skipped,
        failed = summary.failed,
        "Manual expiry check completed"
    );

    Ok(Json(summary))
}
