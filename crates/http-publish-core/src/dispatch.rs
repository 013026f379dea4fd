//! Publish dispatch
//!
//! The dispatcher turns "publish this text to destination X" into exactly one
//! HTTP request:
//!
//! ```text
//! POST <destination.url>
//! Content-Type: text/markdown
//! <authHeaderName>: <authHeaderValue | "">     (only if a header name is set)
//!
//! <raw document text>
//! ```
//!
//! The response body must be JSON. Only an optional `path` string is
//! interpreted; every other field is kept in [`PublishResponse::extra`].

use serde::Deserialize;
use tracing::{debug, info};

use crate::destination::DestinationSettings;
use crate::error::{Error, Result};
use crate::settings::resolve_destination;
use crate::traits::Transport;

/// Content type sent with every publish request
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

/// A fully built publish request
#[derive(Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Absolute destination URL
    pub url: String,
    /// Headers in send order; `Content-Type` always comes first
    pub headers: Vec<(String, String)>,
    /// Raw UTF-8 document text
    pub body: String,
}

impl PublishRequest {
    /// HTTP method; publishing is always a POST
    pub const METHOD: &'static str = "POST";

    /// Value of the first header named `name` (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Header values may carry credentials
impl std::fmt::Debug for PublishRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("PublishRequest")
            .field("url", &self.url)
            .field("headers", &header_names)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// Decoded server reply
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PublishResponse {
    /// Where the server stored the document
    #[serde(default)]
    pub path: Option<String>,

    /// Any other fields the server returned
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PublishResponse {
    /// Interpret a decoded JSON body
    ///
    /// The body must be a JSON object. A `path` that is present but not a
    /// string, or that spans more than one line, is rejected.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::invalid_response(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }
        let response: Self =
            serde_json::from_value(value).map_err(|e| Error::invalid_response(e.to_string()))?;

        // The path is written back as a single metadata line
        if let Some(path) = &response.path
            && path.contains(['\n', '\r'])
        {
            return Err(Error::invalid_response(format!(
                "path must be a single line, got {:?}",
                path
            )));
        }
        Ok(response)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Resolves destinations and sends documents to them
pub struct PublishDispatcher {
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for PublishDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishDispatcher")
            .field("transport", &self.transport.transport_name())
            .finish()
    }
}

impl PublishDispatcher {
    /// Create a dispatcher sending through `transport`
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Build the request for `destination` carrying `content`
    ///
    /// The destination is used as given; it should have been validated when it
    /// was added. A missing URL becomes an empty string and fails at send time.
    pub fn build_request(destination: &DestinationSettings, content: &str) -> PublishRequest {
        let mut headers = vec![(
            "Content-Type".to_string(),
            MARKDOWN_CONTENT_TYPE.to_string(),
        )];

        if let Some((name, value)) = destination.auth_header() {
            headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
            headers.push((name.to_string(), value.to_string()));
        }

        PublishRequest {
            url: destination.url().unwrap_or_default().to_string(),
            headers,
            body: content.to_string(),
        }
    }

    /// Send `content` to the destination called `name`
    ///
    /// Makes a single attempt. Any failure (unknown destination, network
    /// error, non-success status, body that is not a JSON object) is returned
    /// as `Error::Publish` with the cause attached.
    pub async fn publish(
        &self,
        destinations: &[DestinationSettings],
        name: &str,
        content: &str,
    ) -> Result<PublishResponse> {
        self.try_publish(destinations, name, content)
            .await
            .map_err(|e| Error::publish(name, e))
    }

    async fn try_publish(
        &self,
        destinations: &[DestinationSettings],
        name: &str,
        content: &str,
    ) -> Result<PublishResponse> {
        let destination = resolve_destination(destinations, name)?;
        let request = Self::build_request(destination, content);

        info!(
            "Publishing to {} ({}) via {}",
            name,
            request.url,
            self.transport.transport_name()
        );
        debug!(
            "Request body: {} bytes, auth header: {}",
            request.body.len(),
            destination.auth_header_name().unwrap_or("none")
        );

        let value = self.transport.send(&request).await?;
        let response = PublishResponse::from_value(value)?;

        debug!("Destination {} returned path: {:?}", name, response.path);
        Ok(response)
    }
}
