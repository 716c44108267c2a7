use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use super::{SearchTransport, TransportResponse};
use crate::error::Error;

/// A request captured by [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
    pub bearer_token: Option<String>,
}

/// In-process [`SearchTransport`]: replays queued responses in order and
/// records every request it receives. Clones share the same queues.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    responses: Arc<Mutex<VecDeque<TransportResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(TransportResponse::new(status, body));
        self
    }

    pub fn respond_json(&self, status: u16, body: &Value) -> &Self {
        self.respond_with(status, body.to_string())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn pending_responses(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl SearchTransport for MemoryTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        bearer_token: Option<&str>,
    ) -> Result<TransportResponse, Error> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                url: url.to_string(),
                body: body.clone(),
                bearer_token: bearer_token.map(str::to_string),
            });

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| Error::Request(format!("No response queued for {}", url)))
    }
}
