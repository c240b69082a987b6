//! Service and repository initialization.

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

use larder_ai::{AnthropicClient, ItemExtractor, RecipeSuggester};
use larder_core::Config;
use larder_db::{AccountRepository, PantryRepository};
use larder_services::{EmailService, ExpiryNotifier};

use crate::state::AppState;

/// Build repositories, AI collaborators, the email service, and the notifier.
pub fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let pantry_repository = PantryRepository::new(pool.clone());
    let account_repository = AccountRepository::new(pool.clone());

    // AI collaborators are optional: without an API key the endpoints report
    // the service as unavailable instead of failing at startup.
    let (recipe_suggester, item_extractor) = match config.anthropic_api_key() {
        Some(api_key) => {
            let client =
                AnthropicClient::new(api_key.to_string(), config.anthropic_model().to_string())?;
            tracing::info!(model = %config.anthropic_model(), "AI collaborators initialized");
            (
                Some(RecipeSuggester::new(client.clone())),
                Some(ItemExtractor::new(client)),
            )
        }
        None => {
            tracing::info!("ANTHROPIC_API_KEY not set; AI endpoints disabled");
            (None, None)
        }
    };

    let email_service = EmailService::from_config(config);
    if email_service.is_none() {
        tracing::info!("Email dispatch not configured; expiry alerts will be skipped");
    }

    let notifier = Arc::new(ExpiryNotifier::new(
        pantry_repository.clone(),
        account_repository.clone(),
        email_service,
        config.expiry_check_interval_secs(),
    ));

    Ok(Arc::new(AppState {
        pool,
        pantry_repository,
        account_repository,
        recipe_suggester,
        item_extractor,
        notifier,
        config: config.clone(),
    }))
}
