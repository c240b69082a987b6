use std::sync::Arc;

use axum::{extract::State, Json};

use larder_core::models::RecipeSuggestions;
use larder_core::AppError;

use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Suggest recipes from the account's current pantry contents.
///
/// An empty pantry is a client error with a human-readable message; an AI
/// failure is a typed 502, distinct from "no results".
#[utoipa::path(
    post,
    path = "/api/v0/recipes/suggest",
    tag = "recipes",
    responses(
        (status = 200, description = "Suggested recipes", body = RecipeSuggestions),
        (status = 400, description = "Empty pantry", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Suggestion service unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(account_id = %user_ctx.account_id, operation = "suggest_recipes")
)]
pub async fn suggest_recipes(
    user_ctx: UserContext,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RecipeSuggestions>, HttpAppError> {
    let Some(suggester) = &state.recipe_suggester else {
        return Err(AppError::AiService("Recipe suggestions not configured".to_string()).into());
    };

    let items = state
        .pantry_repository
        .list_items(user_ctx.account_id)
        .await?;

    if items.is_empty() {
        return Err(AppError::BadRequest(
            "Your pantry is empty. Please add some items to get recipe suggestions.".to_string(),
        )
        .into());
    }

    let names: Vec<String> = items.into_iter().map(|item| item.name).collect();

    let suggestions = suggester
        .suggest(&names)
        .await
        .map_err(|e| AppError::AiService(e.to_string()))?;

    Ok(Json(suggestions))
}
