// # reqwest Transport
//
// HTTP transport for http-publish built on reqwest.
//
// ## Behavior
//
// - Exactly one request per publish action; no retries, no backoff
// - Headers are sent in the order the dispatcher built them
// - Any 2xx status is success; the body must then decode as JSON
// - Non-2xx statuses and network failures become `Error::Transport`
// - A 2xx body that is not JSON becomes `Error::InvalidResponse`
//
// ## Security
//
// Header values can carry credentials and are never logged.

use async_trait::async_trait;
use http_publish_core::dispatch::PublishRequest;
use http_publish_core::traits::Transport;
use http_publish_core::{Error, Result};

/// Longest slice of an error body kept in error messages
const MAX_ERROR_BODY: usize = 200;

/// Transport that sends publish requests with a shared reqwest client
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport around an existing client
    ///
    /// Use this to configure proxies, timeouts or TLS roots.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PublishRequest) -> Result<serde_json::Value> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| Error::transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("{} answered with status {}", request.url, status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(Error::transport(format!(
                "Server returned {}: {}",
                status,
                truncate(error_text.trim())
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response: {}", e)))?;

        serde_json::from_slice(&body)
            .map_err(|e| Error::invalid_response(format!("Response is not JSON: {}", e)))
    }

    fn transport_name(&self) -> &'static str {
        "reqwest"
    }
}
