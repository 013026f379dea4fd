// # Transport Trait
//
// Performs the single HTTP request of a publish action.
//
// ## Implementations
//
// - reqwest: `http-publish-reqwest` crate
//
// ## Capabilities
//
// Transports are single-shot:
// - ✅ Send exactly the request they are given
// - ✅ Decode the response body as JSON
// - ❌ NO retry or backoff
// - ❌ NO caching
// - ❌ NO knowledge of destinations or documents

use async_trait::async_trait;

use crate::dispatch::PublishRequest;

/// Trait for HTTP transports
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and decode the response body as JSON
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: The decoded response body
    /// - `Err(Error)`: Network failure, non-success status or non-JSON body
    async fn send(&self, request: &PublishRequest) -> Result<serde_json::Value, crate::Error>;

    /// Transport name for logs
    fn transport_name(&self) -> &'static str;
}
