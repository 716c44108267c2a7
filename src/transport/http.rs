use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::trace;

use super::{SearchTransport, TransportResponse};
use crate::error::Error;

/// [`SearchTransport`] over HTTP, one `POST` per search.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Reuses an existing client (shared connection pool, custom TLS...).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        bearer_token: Option<&str>,
    ) -> Result<TransportResponse, Error> {
        let mut request = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(body);
        if let Some(token) = bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;
        let status = response.status().as_u16();
        trace!(url = %url, status, "search response received");

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;
        Ok(TransportResponse::new(status, bytes.to_vec()))
    }
}
