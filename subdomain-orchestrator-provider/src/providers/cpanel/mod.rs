//! cPanel hosting control-panel client.

mod client;
mod http;
mod types;

use reqwest::Client;

use crate::http_client::create_http_client;

pub(crate) use types::{CpanelResponse, DatabaseEntry, SubdomainEntry};

/// cPanel UAPI client (subdomains + MySQL databases).
pub struct CpanelHost {
    pub(crate) client: Client,
    pub(crate) host: String,
    pub(crate) username: String,
    pub(crate) api_token: String,
}

impl CpanelHost {
    #[must_use]
    pub fn new(host: String, username: String, api_token: String) -> Self {
        Self {
            client: create_http_client(),
            host,
            username,
            api_token,
        }
    }
}
