//! cPanel UAPI HTTP request methods.

use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;

use super::{CpanelHost, CpanelResponse};

const PROVIDER: &str = "cpanel";

impl CpanelHost {
    /// Execute a UAPI call and return the raw `data` payload.
    ///
    /// UAPI takes everything as GET query parameters; mutation is expressed by
    /// the endpoint, not the HTTP verb. `status != 1` maps to an API error
    /// carrying the first entry of `errors`.
    async fn call(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<serde_json::Value>> {
        let mut url = format!("https://{}:2083/execute/{endpoint}", self.host);
        if !params.is_empty() {
            let query: Vec<String> = params
                .iter()
                .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }

        let builder = self.client.get(&url).header(
            "Authorization",
            format!("cpanel {}:{}", self.username, self.api_token),
        );

        let (_, body) = HttpUtils::execute_request(builder, PROVIDER, "GET", endpoint).await?;
        let envelope: CpanelResponse<serde_json::Value> = HttpUtils::parse_json(&body, PROVIDER)?;

        if envelope.status != 1 {
            let message = envelope
                .errors
                .and_then(|errors| errors.into_iter().next())
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(ProviderError::ApiError {
                provider: PROVIDER.to_string(),
                raw_code: None,
                raw_message: message,
            });
        }

        Ok(envelope.data)
    }

    /// Execute a UAPI call expecting a typed `data` payload.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let data = self.call(endpoint, params).await?.ok_or_else(|| {
            ProviderError::ParseError {
                provider: PROVIDER.to_string(),
                detail: "missing data field in response".to_string(),
            }
        })?;

        serde_json::from_value(data).map_err(|e| ProviderError::ParseError {
            provider: PROVIDER.to_string(),
            detail: e.to_string(),
        })
    }

    /// Execute a UAPI call whose `data` payload is irrelevant (often null).
    pub(crate) async fn execute_unit(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<()> {
        self.call(endpoint, params).await.map(|_| ())
    }
}
