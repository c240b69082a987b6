//! Shared Anthropic Messages API client.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_BASE: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 2048;

// Messages API request/response structures
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<MessageParam>,
}

#[derive(Debug, Serialize)]
struct MessageParam {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageSource {
    #[serde(rename = "type")]
    source_type: String,
    media_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlockResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlockResponse {
    Text { text: String },
}

/// Client for the Anthropic Messages API. Cheap to clone; holds the API key
/// and model so call sites only supply content blocks.
#[derive(Clone)]
pub struct AnthropicClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("model", &self.model)
            .finish()
    }
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            anyhow::bail!("Anthropic API key is required but not provided");
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client for Anthropic API")?;

        Ok(Self {
            http_client,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one user message and return the first text block of the reply.
    pub(crate) async fn send_message(&self, content: Vec<ContentBlock>) -> Result<String> {
        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![MessageParam {
                role: "user".to_string(),
                content,
            }],
        };

        let response = self
            .http_client
            .post(format!("{}/messages", API_BASE))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Anthropic API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Anthropic API request failed: {} - {}",
                status,
                error_text
            ));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .context("Failed to parse Anthropic API response")?;

        let text = parsed
            .content
            .into_iter()
            .map(|b| match b {
                ContentBlockResponse::Text { text } => text,
            })
            .next()
            .unwrap_or_default();

        Ok(text)
    }

    /// Build an image content block from raw bytes (base64, media type sniffed
    /// from magic numbers).
    pub(crate) fn image_block(image_data: &[u8]) -> ContentBlock {
        use base64::Engine;
        ContentBlock::Image {
            source: ImageSource {
                source_type: "base64".to_string(),
                media_type: detect_media_type(image_data).to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(image_data),
            },
        }
    }

    pub(crate) fn text_block(text: impl Into<String>) -> ContentBlock {
        ContentBlock::Text { text: text.into() }
    }
}

/// Parse a model reply into JSON, stripping markdown code fences if present.
pub(crate) fn parse_json_reply(text: &str) -> Result<serde_json::Value> {
    let json_text = if text.contains("```json") {
        text.split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(text)
            .trim()
    } else if text.contains("```") {
        text.split("```")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(text)
            .trim()
    } else {
        text.trim()
    };

    serde_json::from_str(json_text).context("Failed to parse model reply as JSON")
}

/// Detect media type from image data using magic numbers
pub(crate) fn detect_media_type(data: &[u8]) -> &'static str {
    if data.len() < 4 {
        return "image/jpeg"; // Default
    }

    // JPEG: FF D8 FF
    if data[0] == 0xFF && data[1] == 0xD8 && data[2] == 0xFF {
        return "image/jpeg";
    }

    // PNG: 89 50 4E 47
    if data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47 {
        return "image/png";
    }

    // GIF: 47 49 46
    if data[0] == 0x47 && data[1] == 0x49 && data[2] == 0x46 {
        return "image/gif";
    }

    // WebP: RIFF ... WEBP
    if data.len() >= 12
        && data[0] == 0x52
        && data[1] == 0x49
        && data[2] == 0x46
        && data[3] == 0x46
        && data[8] == 0x57
        && data[9] == 0x45
        && data[10] == 0x42
        && data[11] == 0x50
    {
        return "image/webp";
    }

    "image/jpeg" // Default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_media_type_jpeg() {
        let jpeg_magic = vec![0xFF, 0xD8, 0xFF, 0xE0];
        assert_eq!(detect_media_type(&jpeg_magic), "image/jpeg");
    }

    #[test]
    fn test_detect_media_type_png() {
        let png_magic = vec![0x89, 0x50, 0x4E, 0x47];
        assert_eq!(detect_media_type(&png_magic), "image/png");
    }

    #[test]
    fn test_detect_media_type_gif() {
        let gif_magic = vec![0x47, 0x49, 0x46, 0x38];
        assert_eq!(detect_media_type(&gif_magic), "image/gif");
    }

    #[test]
    fn test_parse_json_reply_plain() {
        let json_text = r#"{"recipes": []}"#;
        let result = parse_json_reply(json_text);
        assert!(result.is_ok());
        assert!(result.unwrap().get("recipes").is_some());
    }

    #[test]
    fn test_parse_json_reply_markdown_fenced() {
        let markdown_json = r#"
Here's the result:
```json
{"item_found": true, "product_name": "Oat milk"}
```
"#;
        let result = parse_json_reply(markdown_json);
        assert!(result.is_ok());
        let parsed = result.unwrap();
        assert_eq!(
            parsed.get("product_name").and_then(|v| v.as_str()),
            Some("Oat milk")
        );
    }

    #[test]
    fn test_new_rejects_empty_api_key() {
        assert!(AnthropicClient::new(String::new(), "claude-sonnet-4-20250514".to_string()).is_err());
    }
}
