//! Larder AI Library
//!
//! Thin collaborators over Anthropic's Messages API: recipe suggestions from
//! pantry contents and item-detail extraction from product photos. Callers
//! treat failures as "no suggestion"; nothing in this crate feeds the expiry
//! engine without validation.

pub mod anthropic;
pub mod extraction;
pub mod recipes;

pub use anthropic::AnthropicClient;
pub use extraction::ItemExtractor;
pub use recipes::RecipeSuggester;
