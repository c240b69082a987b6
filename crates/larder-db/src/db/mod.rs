//! Database repositories for the data access layer.

pub mod account;
pub mod pantry;

pub use account::AccountRepository;
pub use pantry::PantryRepository;
