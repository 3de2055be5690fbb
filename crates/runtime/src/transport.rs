//! The network seam of the dispatch engine.
//!
//! Every exchange goes through the [`Transport`] trait; the engine never
//! talks to the network directly. [`HttpTransport`] is the production
//! implementation; tests substitute stubs.

use async_trait::async_trait;
use tracing::debug;

use crate::error::TransportError;

/// A fully-prepared request: resolved URL (query string included),
/// method, merged headers and an optional serialized payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// The raw response of an exchange: status code and payload text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Performs one HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the raw response. Implementations
    /// report network-level problems as [`TransportError`]; status codes
    /// are not errors here, classification happens in the binding.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| TransportError(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.to_uppercase().as_bytes())
            .map_err(|err| TransportError(format!("invalid method '{}': {err}", request.method)))?;

        debug!(url = %request.url, method = %method, "Sending request.");

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError(format!("request failed: {err}")))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError(format!("failed to read response body: {err}")))?;

        debug!(status, body_len = body.len(), "Received response.");
        Ok(TransportResponse { status, body })
    }
}
