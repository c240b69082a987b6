//! Larder Core Library
//!
//! This crate provides the domain models, expiry classification engine,
//! notification selection, error types, configuration, and validation shared
//! across all Larder components.

pub mod config;
pub mod constants;
pub mod error;
pub mod expiry;
pub mod models;
pub mod notify;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use expiry::{ClassifiedItem, ExpiryClassification, ExpiryStatus};
pub use notify::{ExpiringItem, NotificationCandidate, Pantry};
