// src/internal/gateway/http_gateway.rs

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, error};

use super::error::GatewayError;
use super::types::{Outcome, RequestConfig, Requester};
use crate::internal::config::GatewayConfig;

/// reqwest-backed gateway. The client carries no timeout of its own; the
/// deadline is enforced per call so it covers reading the body as well.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn default_timeout(&self) -> Duration {
        self.config.timeout()
    }

    /// JSON content type, then configured headers, then per-call headers.
    /// Later entries win; names compare case-insensitively.
    fn merged_headers(&self, overrides: &HashMap<String, String>) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        for (name, value) in self.config.headers.iter().chain(overrides) {
            headers.insert(name.to_ascii_lowercase(), value.clone());
        }
        headers
    }

    fn build_request(&self, url: &str, config: &RequestConfig) -> Outcome<RequestBuilder> {
        let mut request_builder = self.client.request(config.method.into(), url);

        for (name, value) in self.merged_headers(&config.headers) {
            request_builder = request_builder.header(name, value);
        }

        if let Some(body) = &config.body {
            request_builder = request_builder.body(serde_json::to_vec(body)?);
        }

        Ok(request_builder)
    }

    async fn exchange(request_builder: RequestBuilder) -> Outcome<Value> {
        let response = request_builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        parse_body(&body)
    }
}

/// Parse a successful response body. Empty bodies (204, bare DELETE) are null.
pub(crate) fn parse_body(body: &[u8]) -> Outcome<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}

#[async_trait]
impl Requester for HttpGateway {
    async fn request(&self, url: &str, config: RequestConfig) -> Outcome<Value> {
        let timeout = config.timeout.unwrap_or_else(|| self.default_timeout());
        debug!(method = %config.method, url, timeout_ms = timeout.as_millis() as u64, "Executing request");

        let outcome = match self.build_request(url, &config) {
            // Dropping the exchange future on expiry aborts the connection.
            Ok(request_builder) => tokio::time::timeout(timeout, Self::exchange(request_builder))
                .await
                .unwrap_or(Err(GatewayError::Timeout(timeout))),
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            error!(method = %config.method, url, kind = e.kind().as_str(), "API request failed: {}", e);
        }

        outcome
    }
}
