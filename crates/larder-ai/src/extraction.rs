//! Item-detail extraction from product photos: barcode, expiry date, and
//! product name.

use anyhow::{Context, Result};
use larder_core::models::ExtractedItemDetails;

use crate::anthropic::{parse_json_reply, AnthropicClient};

const EXTRACTION_PROMPT: &str = "\
You are an expert at analyzing images of grocery products to extract key \
information.

Analyze the provided image. Your task is to identify a barcode, an expiry \
date, and the product's name.

- If you find a barcode, extract the numerical sequence.
- If you find an expiry date, parse it and return it in YYYY-MM-DD format.
- If you can clearly identify the product's name from the label, return it.
- If the image does not contain a recognizable grocery item, or if no barcode \
or expiry date is visible, set item_found to false and leave the other fields \
empty. Otherwise, set item_found to true.

Respond with valid JSON of the form:
{\"item_found\": true, \"barcode\": \"...\", \"expiry_date\": \"YYYY-MM-DD\", \
\"product_name\": \"...\"}";

/// Extracts item details from a product photo.
#[derive(Debug, Clone)]
pub struct ItemExtractor {
    client: AnthropicClient,
}

impl ItemExtractor {
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }

    /// Extract details from raw image bytes.
    ///
    /// The returned fields are untrusted: the expiry date string must be
    /// validated before it can influence a shelf life.
    pub async fn extract(&self, image_data: &[u8]) -> Result<ExtractedItemDetails> {
        if image_data.is_empty() {
            anyhow::bail!("Cannot extract item details from an empty image");
        }

        tracing::info!(
            image_size = image_data.len(),
            model = %self.client.model(),
            "Requesting item detail extraction"
        );

        let reply = self
            .client
            .send_message(vec![
                AnthropicClient::image_block(image_data),
                AnthropicClient::text_block(EXTRACTION_PROMPT),
            ])
            .await
            .context("Item extraction request failed")?;

        let value = parse_json_reply(&reply)?;
        let details: ExtractedItemDetails = serde_json::from_value(value)
            .context("Item extraction reply did not match the expected schema")?;

        tracing::info!(
            item_found = details.item_found,
            has_barcode = details.barcode.is_some(),
            has_expiry_date = details.expiry_date.is_some(),
            "Item detail extraction completed"
        );

        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_schema_round_trips() {
        let reply = r#"
```json
{"item_found": true, "barcode": "4006381333931", "expiry_date": "2024-09-01", "product_name": "Oat milk"}
```
"#;
        let value = parse_json_reply(reply).expect("parse");
        let details: ExtractedItemDetails = serde_json::from_value(value).expect("schema");
        assert!(details.item_found);
        assert_eq!(details.expiry_date.as_deref(), Some("2024-09-01"));
        assert_eq!(details.product_name.as_deref(), Some("Oat milk"));
    }

    #[test]
    fn reply_with_missing_optionals_parses() {
        let reply = r#"{"item_found": false}"#;
        let value = parse_json_reply(reply).expect("parse");
        let details: ExtractedItemDetails = serde_json::from_value(value).expect("schema");
        assert!(!details.item_found);
        assert!(details.barcode.is_none());
        assert!(details.expiry_date.is_none());
    }

    #[test]
    fn prompt_requests_iso_dates() {
        assert!(EXTRACTION_PROMPT.contains("YYYY-MM-DD"));
        assert!(EXTRACTION_PROMPT.contains("item_found"));
    }
}
