//! AI-powered recipe suggestions based on the items in the pantry.

use anyhow::{Context, Result};
use larder_core::models::RecipeSuggestions;

use crate::anthropic::{parse_json_reply, AnthropicClient};

/// Suggests recipes that use only the ingredients currently in the pantry.
#[derive(Debug, Clone)]
pub struct RecipeSuggester {
    client: AnthropicClient,
}

impl RecipeSuggester {
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }

    /// Build the suggestion prompt for a list of pantry item names.
    fn build_prompt(pantry_items: &[String]) -> String {
        format!(
            "You are a world-class chef specializing in creating recipes based on \
             available ingredients.\n\n\
             Given the following items in the user's pantry, suggest recipes that \
             utilize these ingredients. Only suggest recipes that use ingredients \
             in the pantry.\n\n\
             Pantry items: {}\n\n\
             Respond with valid JSON of the form:\n\
             {{\"recipes\": [{{\"name\": \"...\", \"ingredients\": [\"...\"], \
             \"instructions\": \"...\"}}]}}",
            pantry_items.join(", ")
        )
    }

    /// Suggest recipes for the given pantry item names.
    ///
    /// Callers must treat an error as "no suggestion"; nothing here is fed
    /// back into classification.
    pub async fn suggest(&self, pantry_items: &[String]) -> Result<RecipeSuggestions> {
        if pantry_items.is_empty() {
            anyhow::bail!("Cannot suggest recipes for an empty pantry");
        }

        tracing::info!(
            item_count = pantry_items.len(),
            model = %self.client.model(),
            "Requesting recipe suggestions"
        );

        let prompt = Self::build_prompt(pantry_items);
        let reply = self
            .client
            .send_message(vec![AnthropicClient::text_block(prompt)])
            .await
            .context("Recipe suggestion request failed")?;

        let value = parse_json_reply(&reply)?;
        let suggestions: RecipeSuggestions = serde_json::from_value(value)
            .context("Recipe suggestion reply did not match the expected schema")?;

        tracing::info!(
            recipe_count = suggestions.recipes.len(),
            "Recipe suggestions received"
        );

        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_all_items_and_demands_json() {
        let items = vec!["milk".to_string(), "eggs".to_string(), "flour".to_string()];
        let prompt = RecipeSuggester::build_prompt(&items);
        assert!(prompt.contains("milk, eggs, flour"));
        assert!(prompt.contains("JSON"));
        assert!(prompt.contains("recipes"));
    }

    #[test]
    fn reply_schema_round_trips() {
        let reply = r#"{"recipes": [{"name": "Pancakes", "ingredients": ["milk", "eggs", "flour"], "instructions": "Mix and fry."}]}"#;
        let value = parse_json_reply(reply).expect("parse");
        let suggestions: RecipeSuggestions = serde_json::from_value(value).expect("schema");
        assert_eq!(suggestions.recipes.len(), 1);
        assert_eq!(suggestions.recipes[0].name, "Pancakes");
    }
}
