//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::Result;
use larder_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first
    crate::telemetry::init_telemetry();

    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Initialize all services and repositories
    let state = services::initialize_services(&config, pool)?;

    // Start the background expiry notifier; the handle lives for the process
    // lifetime and is cancelled on shutdown.
    if config.expiry_check_enabled() {
        let _handle = state.notifier.clone().start();
        tracing::info!(
            interval_secs = config.expiry_check_interval_secs(),
            "Expiry notifier started"
        );
    } else {
        tracing::info!("Expiry notifier disabled (EXPIRY_CHECK_ENABLED=false)");
    }

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
