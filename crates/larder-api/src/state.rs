//! Application state.
//!
//! Small enough to stay one struct: repositories, optional AI collaborators,
//! the notifier, and configuration. Handlers receive it as
//! `State<Arc<AppState>>`.

use std::sync::Arc;

use larder_ai::{ItemExtractor, RecipeSuggester};
use larder_core::Config;
use larder_db::{AccountRepository, PantryRepository};
use larder_services::ExpiryNotifier;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub pantry_repository: PantryRepository,
    pub account_repository: AccountRepository,
    /// Absent when ANTHROPIC_API_KEY is not configured; AI endpoints then
    /// return a typed failure instead of a suggestion.
    pub recipe_suggester: Option<RecipeSuggester>,
    pub item_extractor: Option<ItemExtractor>,
    pub notifier: Arc<ExpiryNotifier>,
    pub config: Config,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
