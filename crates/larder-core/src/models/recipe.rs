use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One AI-suggested recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

/// Response shape of the recipe suggestion flow.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeSuggestions {
    pub recipes: Vec<Recipe>,
}
