// src/internal/gateway/types.rs

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::error::GatewayError;

/// Result of a single gateway call.
pub type Outcome<T> = Result<T, GatewayError>;

/// HTTP methods the record services understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call request configuration. Anything left unset falls back to the
/// gateway's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    pub method: Method,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::Post,
            body: Some(body),
            ..Default::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::Delete,
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Seam between the record clients and the HTTP stack.
#[async_trait]
pub trait Requester: Send + Sync {
    /// Issue one request and return the parsed JSON body. An empty 2xx body
    /// comes back as `Value::Null`.
    async fn request(&self, url: &str, config: RequestConfig) -> Outcome<Value>;
}
