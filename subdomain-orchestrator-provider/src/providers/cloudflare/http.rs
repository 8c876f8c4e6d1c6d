//! Cloudflare HTTP request methods.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;

use super::{CloudflareDns, CloudflareResponse, CF_API_BASE};

const PROVIDER: &str = "cloudflare";

impl CloudflareDns {
    fn unwrap_envelope<T>(response: CloudflareResponse<T>) -> Result<T> {
        if !response.success {
            let (code, message) = response
                .errors
                .first()
                .map(|e| (Some(e.code.to_string()), e.message.clone()))
                .unwrap_or((None, "Unknown error".to_string()));
            return Err(ProviderError::ApiError {
                provider: PROVIDER.to_string(),
                raw_code: code,
                raw_message: message,
            });
        }

        response.result.ok_or_else(|| ProviderError::ParseError {
            provider: PROVIDER.to_string(),
            detail: "missing result field in response".to_string(),
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        let builder = self.client.get(&url).bearer_auth(&self.api_token);

        let (_, body) = HttpUtils::execute_request(builder, PROVIDER, "GET", path).await?;
        let envelope: CloudflareResponse<T> = HttpUtils::parse_json(&body, PROVIDER)?;
        Self::unwrap_envelope(envelope)
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        request_body: &B,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        let builder = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(request_body);

        let (_, body) = HttpUtils::execute_request(builder, PROVIDER, "POST", path).await?;
        let envelope: CloudflareResponse<T> = HttpUtils::parse_json(&body, PROVIDER)?;
        Self::unwrap_envelope(envelope)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{CF_API_BASE}{path}");
        let builder = self.client.delete(&url).bearer_auth(&self.api_token);

        let (_, body) = HttpUtils::execute_request(builder, PROVIDER, "DELETE", path).await?;
        let envelope: CloudflareResponse<serde_json::Value> =
            HttpUtils::parse_json(&body, PROVIDER)?;
        Self::unwrap_envelope(envelope).map(|_| ())
    }
}
