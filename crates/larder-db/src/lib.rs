//! Larder Database Library
//!
//! Repository implementations for data access. Each repository owns a single
//! domain entity and provides CRUD operations and the specialized queries the
//! batch notifier needs.

pub mod db;

pub use db::{AccountRepository, PantryRepository};
