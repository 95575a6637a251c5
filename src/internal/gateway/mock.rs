use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{GatewayError, Method, Outcome, RequestConfig, Requester};

/// A request captured by [`MockRequester`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

/// Mock requester for testing - replays queued outcomes and records calls
#[derive(Clone, Default)]
pub struct MockRequester {
    /// Queued outcomes, returned in order
    pub responses: Arc<Mutex<VecDeque<Outcome<Value>>>>,
    /// Captured calls
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockRequester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next call
    pub fn queue(&self, outcome: Outcome<Value>) -> &Self {
        self.responses.lock().unwrap().push_back(outcome);
        self
    }

    pub fn queue_ok(&self, body: Value) -> &Self {
        self.queue(Ok(body))
    }

    pub fn queue_err(&self, err: GatewayError) -> &Self {
        self.queue(Err(err))
    }

    /// Get all captured calls
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Requester for MockRequester {
    async fn request(&self, url: &str, config: RequestConfig) -> Outcome<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: config.method,
            url: url.to_string(),
            body: config.body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Network("no mock response queued".to_string())))
    }
}
