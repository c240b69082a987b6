//! Larder Services Layer
//!
//! Business services above the repositories: SMTP email dispatch and the
//! daily expiry notifier. Keep coordination here; keep thin HTTP handling in
//! larder-api and pure decision logic in larder-core.

pub mod email;
pub mod notifier;

pub use email::EmailService;
pub use notifier::{ExpiryNotifier, NotifierRunSummary};
