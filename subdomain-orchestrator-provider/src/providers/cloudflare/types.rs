//! Cloudflare API response types.

use serde::Deserialize;

/// Standard Cloudflare v4 API envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<CloudflareApiError>,
    pub result: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareApiError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CloudflareDnsRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    pub proxied: Option<bool>,
}
