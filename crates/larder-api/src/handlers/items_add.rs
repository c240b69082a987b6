use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use larder_core::expiry::ClassifiedItem;
use larder_core::models::NewPantryItem;
use larder_core::validation::validate_new_item;

use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Add an item to the pantry. The added date is assigned server-side; the
/// same payload shape serves manual entry and accepted scan drafts.
#[utoipa::path(
    post,
    path = "/api/v0/items",
    tag = "items",
    request_body = NewPantryItem,
    responses(
        (status = 201, description = "Item created", body = ClassifiedItem),
        (status = 400, description = "Invalid item", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, new_item),
    fields(account_id = %user_ctx.account_id, operation = "add_item")
)]
pub async fn add_item(
    user_ctx: UserContext,
    State(state): State<Arc<AppState>>,
    ValidatedJson(new_item): ValidatedJson<NewPantryItem>,
) -> Result<(StatusCode, Json<ClassifiedItem>), HttpAppError> {
    validate_new_item(&new_item)?;

    // First write materializes the account row (and refreshes the contact
    // address the notifier resolves later).
    state
        .account_repository
        .upsert(user_ctx.account_id, user_ctx.email.as_deref())
        .await?;

    let item = state
        .pantry_repository
        .add_item(user_ctx.account_id, &new_item)
        .await?;

    tracing::info!(item_id = %item.id, "Pantry item added");

    let today = chrono::Utc::now().date_naive();
    let expiry = item.classify(today);
    Ok((StatusCode::CREATED, Json(ClassifiedItem { item, expiry })))
}
