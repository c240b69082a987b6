//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use larder_core::{expiry, models};
use larder_services::NotifierRunSummary;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Larder API",
        version = "0.1.0",
        description = "Pantry tracking API: log food items with a shelf life, query expiry \
                       status and alerts, get AI recipe suggestions and photo-based item \
                       extraction. All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::items_list::list_items,
        handlers::items_add::add_item,
        handlers::items_remove::remove_item,
        handlers::alerts::list_alerts,
        handlers::recipes::suggest_recipes,
        handlers::scan::scan_item,
        handlers::expiry_check::run_expiry_check,
    ),
    components(schemas(
        models::PantryItem,
        models::NewPantryItem,
        models::Recipe,
        models::RecipeSuggestions,
        models::ScannedItemDraft,
        expiry::ExpiryStatus,
        expiry::ExpiryClassification,
        expiry::ClassifiedItem,
        handlers::items_list::ListItemsResponse,
        handlers::alerts::AlertsResponse,
        handlers::scan::ScanRequest,
        NotifierRunSummary,
        error::ErrorResponse,
    )),
    tags(
        (name = "items", description = "Pantry item management"),
        (name = "recipes", description = "AI recipe suggestions"),
        (name = "admin", description = "Operational endpoints")
    )
)]
pub struct ApiDoc;
