//! Cloudflare DNS client.

mod client;
mod http;
mod types;

use reqwest::Client;

use crate::http_client::create_http_client;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Cloudflare DNS client, scoped to a single zone.
pub struct CloudflareDns {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) zone_id: String,
}

impl CloudflareDns {
    #[must_use]
    pub fn new(api_token: String, zone_id: String) -> Self {
        Self {
            client: create_http_client(),
            api_token,
            zone_id,
        }
    }
}
