//! API constants.

/// Versioned API path prefix.
pub const API_PREFIX: &str = "/api/v0";

/// Maximum accepted request body size in bytes. Scan uploads carry a
/// base64-encoded photo, so this is sized for images, not documents.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;
