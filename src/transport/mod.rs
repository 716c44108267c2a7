#[cfg(feature = "http")]
pub mod http;
pub mod memory;

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use memory::{MemoryTransport, RecordedRequest};

use crate::composer::QueryComposer;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::query::QueryDescriptor;

/// Raw outcome of one exchange with the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// -----------------------------
/// Transport contract
/// -----------------------------
///
/// Implementors send `body` as a JSON request to `url` and report whatever
/// status came back. Only failures that never produced a status are errors
/// here; status interpretation belongs to [`SearchClient`].
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        bearer_token: Option<&str>,
    ) -> Result<TransportResponse, Error>;
}

/// Sends built descriptors to named endpoints and parses the replies.
///
/// One request per call, awaited to completion. No retries and no timeout
/// beyond what the transport itself applies.
#[derive(Clone)]
pub struct SearchClient {
    config: ClientConfig,
    transport: Arc<dyn SearchTransport>,
}

impl SearchClient {
    pub fn new(config: ClientConfig, transport: Box<dyn SearchTransport>) -> Self {
        Self {
            config,
            transport: transport.into(),
        }
    }

    /// A client backed by [`HttpTransport`], honouring `config.timeout`.
    #[cfg(feature = "http")]
    pub fn http(config: ClientConfig) -> Result<Self, Error> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::new(config, Box::new(transport)))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the composer's descriptor and posts it to `endpoint`.
    pub async fn search_with_query(
        &self,
        endpoint: &str,
        composer: &QueryComposer,
    ) -> Result<Value, Error> {
        self.search(endpoint, &composer.build()).await
    }

    /// Posts an already built descriptor.
    ///
    /// A status outside 2xx is [`Error::Transport`] and the body is not
    /// parsed; a 2xx body that is not JSON is [`Error::MalformedResponse`].
    pub async fn search(&self, endpoint: &str, descriptor: &QueryDescriptor) -> Result<Value, Error> {
        let body = descriptor.to_json()?;
        let url = self.config.endpoint_url(endpoint);
        debug!(
            url = %url,
            conditions = descriptor.conditions.len(),
            relations = descriptor.relations.len(),
            "sending search descriptor"
        );

        let start = Instant::now();
        let result = self
            .transport
            .post_json(&url, &body, self.config.bearer_token.as_deref())
            .await;
        histogram!("taxis.search.duration_ms",
            "endpoint" => endpoint.to_string()
        )
        .record(start.elapsed().as_millis() as f64);

        let result = result.and_then(|response| Self::parse(&url, response));
        counter!("taxis.search.total",
            "status" => if result.is_ok() { "success" } else { "failed" }
        )
        .increment(1);

        result
    }

    /// Like [`SearchClient::search_with_query`], decoding the reply into `T`.
    pub async fn search_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        composer: &QueryComposer,
    ) -> Result<T, Error> {
        let value = self.search_with_query(endpoint, composer).await?;
        serde_json::from_value(value).map_err(|e| Error::MalformedResponse(e.to_string()))
    }

    fn parse(url: &str, response: TransportResponse) -> Result<Value, Error> {
        if !response.is_success() {
            warn!(url = %url, status = response.status, "search endpoint rejected descriptor");
            return Err(Error::Transport {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| {
            warn!(url = %url, error = %e, "search endpoint returned malformed body");
            Error::MalformedResponse(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(TransportResponse::new(200, "[]").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(199, "").is_success());
        assert!(!TransportResponse::new(302, "").is_success());
        assert!(!TransportResponse::new(404, "").is_success());
    }

    #[test]
    fn test_parse_keeps_error_body() {
        let err = SearchClient::parse(
            "http://localhost/test/users",
            TransportResponse::new(400, r#"{"detail":"bad operator"}"#),
        )
        .unwrap_err();

        assert_eq!(err.status(), Some(400));
        match err {
            Error::Transport { body, .. } => assert!(body.contains("bad operator")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_success_body_is_malformed() {
        let err = SearchClient::parse("http://localhost/x", TransportResponse::new(204, ""))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
