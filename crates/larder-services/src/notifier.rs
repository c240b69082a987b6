//! Daily expiry notifier.
//!
//! Fetches every pantry, asks the core selector who qualifies, then fans out
//! per user: resolve contact address, assemble the email, hand it to the
//! email service. Users are processed concurrently and failures are isolated
//! per user; one bad account never aborts the rest of the run.
//!
//! The run is idempotent with respect to stored state: it recomputes from the
//! current pantry contents, so re-running within the same day simply
//! re-notifies.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::interval;

use larder_core::constants::ALERT_THRESHOLD_DAYS;
use larder_core::notify::{self, NotificationCandidate};
use larder_core::AppError;
use larder_db::{AccountRepository, PantryRepository};

use crate::email::EmailService;

/// Outcome counts for one notifier run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, utoipa::ToSchema)]
pub struct NotifierRunSummary {
    /// Users selected by the core selector.
    pub selected: usize,
    /// Emails handed to the dispatcher.
    pub notified: usize,
    /// Users skipped (no contact address, or email dispatch disabled).
    pub skipped: usize,
    /// Users whose processing failed (lookup or dispatch error).
    pub failed: usize,
}

#[derive(Clone)]
pub struct ExpiryNotifier {
    pantry_repository: PantryRepository,
    account_repository: AccountRepository,
    /// When absent, runs still compute candidates but skip dispatch.
    email_service: Option<EmailService>,
    interval_secs: u64,
}

impl ExpiryNotifier {
    pub fn new(
        pantry_repository: PantryRepository,
        account_repository: AccountRepository,
        email_service: Option<EmailService>,
        interval_secs: u64,
    ) -> Self {
        Self {
            pantry_repository,
            account_repository,
            email_service,
            interval_secs,
        }
    }

    /// Start the background task that runs the expiry check on a fixed
    /// interval (daily by default).
    /// Returns a JoinHandle for graceful shutdown.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut check_interval = interval(Duration::from_secs(self.interval_secs));
            // The first tick fires immediately; skip it so a restart loop
            // does not re-notify on every boot.
            check_interval.tick().await;

            loop {
                check_interval.tick().await;

                tracing::info!("Starting scheduled expiry check");

                match self.run_once().await {
                    Ok(summary) => {
                        tracing::info!(
                            selected = summary.selected,
                            notified = summary.notified,
                            skipped = summary.skipped,
                            failed = summary.failed,
                            "Expiry check completed"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Expiry check failed");
                    }
                }
            }
        })
    }

    /// Run one expiry check against the current pantry state.
    #[tracing::instrument(skip(self), fields(notifier.operation = "expiry_check"))]
    pub async fn run_once(&self) -> Result<NotifierRunSummary, AppError> {
        let today = chrono::Utc::now().date_naive();
        let pantries = self.pantry_repository.list_pantries().await?;

        let candidates = notify::select_notifications(&pantries, today, ALERT_THRESHOLD_DAYS);
        if candidates.is_empty() {
            tracing::info!("No accounts with items expiring soon");
            return Ok(NotifierRunSummary::default());
        }

        if self.email_service.is_none() {
            tracing::warn!(
                candidates = candidates.len(),
                "Email dispatch not configured; skipping all notification candidates"
            );
        }

        let mut summary = NotifierRunSummary {
            selected: candidates.len(),
            ..Default::default()
        };

        let results = join_all(
            candidates
                .iter()
                .map(|candidate| self.notify_candidate(candidate)),
        )
        .await;

        for (candidate, result) in candidates.iter().zip(results) {
            match result {
                Ok(true) => summary.notified += 1,
                Ok(false) => summary.skipped += 1,
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!(
                        error = %e,
                        account_id = %candidate.account_id,
                        "Failed to process expiry notification for account"
                    );
                }
            }
        }

        Ok(summary)
    }

    /// Notify a single candidate. Returns Ok(false) for non-fatal skips
    /// (no contact address, dispatch disabled).
    async fn notify_candidate(&self, candidate: &NotificationCandidate) -> Result<bool, AppError> {
        let Some(email_service) = &self.email_service else {
            return Ok(false);
        };

        let Some(address) = self
            .account_repository
            .contact_email(candidate.account_id)
            .await?
        else {
            tracing::info!(
                account_id = %candidate.account_id,
                "Account has no contact address, skipping expiry alert"
            );
            return Ok(false);
        };

        email_service
            .send(
                &[address],
                notify::mail_subject(),
                &notify::mail_body(candidate),
            )
            .await?;

        tracing::info!(
            account_id = %candidate.account_id,
            items = candidate.expiring_items.len(),
            "Expiry alert queued for account"
        );

        Ok(true)
    }
}
