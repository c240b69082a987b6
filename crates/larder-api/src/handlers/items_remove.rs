use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use larder_core::AppError;

use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Remove an item from the pantry.
#[utoipa::path(
    delete,
    path = "/api/v0/items/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item removed"),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(account_id = %user_ctx.account_id, item_id = %id, operation = "remove_item")
)]
pub async fn remove_item(
    user_ctx: UserContext,
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, HttpAppError> {
    let removed = state
        .pantry_repository
        .remove_item(user_ctx.account_id, id)
        .await?;

    if !removed {
        return Err(AppError::NotFound("Item not found".to_string()).into());
    }

    tracing::info!("Pantry item removed");
    Ok(StatusCode::NO_CONTENT)
}
