use std::sync::Arc;

use axum::{extract::State, Json};
use base64::Engine;
use serde::Deserialize;
use utoipa::ToSchema;

use larder_core::models::ScannedItemDraft;
use larder_core::AppError;

use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScanRequest {
    /// Product photo, either a `data:<mime>;base64,...` URI or bare base64.
    pub image: String,
}

/// Decode the uploaded photo, accepting both data URIs and bare base64.
fn decode_image(image: &str) -> Result<Vec<u8>, AppError> {
    let b64 = match image.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => image,
    };
    base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|e| AppError::InvalidInput(format!("Image is not valid base64: {}", e)))
}

/// Extract item details (name, barcode, expiry date) from a product photo and
/// return a validated draft.
///
/// The draft's shelf life is derived from the extracted date; a date that is
/// malformed, in the past, or implausibly far out degrades to no suggestion
/// for that field. The draft is submitted through the regular add-item
/// endpoint, so nothing unvalidated ever reaches the expiry engine.
#[utoipa::path(
    post,
    path = "/api/v0/items/scan",
    tag = "items",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Extracted item draft", body = ScannedItemDraft),
        (status = 400, description = "Invalid image payload", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Extraction service unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(account_id = %user_ctx.account_id, operation = "scan_item")
)]
pub async fn scan_item(
    user_ctx: UserContext,
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ScanRequest>,
) -> Result<Json<ScannedItemDraft>, HttpAppError> {
    let Some(extractor) = &state.item_extractor else {
        return Err(AppError::AiService("Photo extraction not configured".to_string()).into());
    };

    let image_data = decode_image(&request.image)?;
    if image_data.is_empty() {
        return Err(AppError::InvalidInput("Image payload is empty".to_string()).into());
    }

    let details = extractor
        .extract(&image_data)
        .await
        .map_err(|e| AppError::AiService(e.to_string()))?;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(details.into_draft(today)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_accepts_data_uri_and_bare_base64() {
        let bytes = vec![0x89, 0x50, 0x4E, 0x47];
        let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);

        let from_uri = decode_image(&format!("data:image/png;base64,{}", b64)).expect("data uri");
        assert_eq!(from_uri, bytes);

        let from_bare = decode_image(&b64).expect("bare base64");
        assert_eq!(from_bare, bytes);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_image("not base64 at all!!!").is_err());
    }
}
