//! Generic HTTP client tools.
//!
//! Reusable request-processing logic shared by the Cloudflare and cPanel
//! clients. Each client constructs its own `RequestBuilder` (auth headers,
//! query strings) and hands it off here for the common send/log/read flow.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Create an HTTP client with the standard timeout configuration.
///
/// All external-system calls are blocking network operations bounded by these
/// timeouts; there are no automatic retries.
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
}

/// HTTP tool function set.
pub struct HttpUtils;

impl HttpUtils {
    /// Perform an HTTP request and return `(status_code, response_text)`.
    ///
    /// Unified handling of send, logging and error mapping. Timeouts map to
    /// [`ProviderError::Timeout`], everything else network-level to
    /// [`ProviderError::NetworkError`].
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] Response status: {status}");

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response body: {}",
            truncate_for_log(&text)
        );

        Ok((status, text))
    }

    /// Parse a JSON response body into `T`.
    pub fn parse_json<T: DeserializeOwned>(
        body: &str,
        provider_name: &str,
    ) -> Result<T, ProviderError> {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "[{provider_name}] JSON parse failed: {e}; body: {}",
                truncate_for_log(body)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
