//! JSON-over-HTTP endpoint with deadlines and typed decoding.
//!
//! # Responsibilities
//! - Resolve operation paths against the service base URL
//! - Enforce a per-call deadline
//! - Map non-success statuses and undecodable bodies to `RemoteError`
//! - Record call latency and outcome metrics

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use url::Url;

use crate::observability::metrics;
use crate::remote::error::{RemoteError, RemoteResult, Service};

/// Longest error body kept in a `RemoteError::Status`.
const MAX_ERROR_BODY: usize = 256;

/// A collaborator service reachable under one base URL.
#[derive(Clone)]
pub struct JsonEndpoint {
    client: Client,
    base_url: Url,
    service: Service,
    timeout_duration: Duration,
}

impl JsonEndpoint {
    /// Create an endpoint for `service` rooted at `base_url`.
    pub fn new(service: Service, base_url: &str, timeout_secs: u64) -> RemoteResult<Self> {
        let invalid = |reason: String| RemoteError::InvalidUrl {
            service,
            url: base_url.to_string(),
            reason,
        };

        let parsed: Url = base_url.parse().map_err(|e: url::ParseError| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            base_url: parsed,
            service,
            timeout_duration: Duration::from_secs(timeout_secs),
        })
    }

    /// The service this endpoint talks to.
    pub fn service(&self) -> Service {
        self.service
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL for a path given as segments; each segment is percent-encoded.
    pub fn url(&self, segments: &[&str]) -> RemoteResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidUrl {
                service: self.service,
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` a path and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        segments: &[&str],
    ) -> RemoteResult<T> {
        let url = self.url(segments)?;
        let body = self.send(operation, self.client.get(url)).await?;
        self.decode(operation, &body)
    }

    /// `POST` a JSON body and decode the JSON response.
    pub async fn post_json<B, T>(
        &self,
        operation: &'static str,
        segments: &[&str],
        payload: &B,
    ) -> RemoteResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(segments)?;
        let body = self.send(operation, self.client.post(url).json(payload)).await?;
        self.decode(operation, &body)
    }

    /// `POST` a JSON body; any success status is accepted and the body is ignored.
    pub async fn post_unit<B>(
        &self,
        operation: &'static str,
        segments: &[&str],
        payload: &B,
    ) -> RemoteResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        self.send(operation, self.client.post(url).json(payload)).await?;
        Ok(())
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> RemoteResult<String> {
        let started = Instant::now();
        let result = match timeout(self.timeout_duration, self.exchange(operation, request)).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout {
                service: self.service,
                operation,
                secs: self.timeout_duration.as_secs(),
            }),
        };

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_remote_call(self.service.as_str(), operation, outcome, started.elapsed());

        if let Err(e) = &result {
            tracing::warn!(service = %self.service, operation, error = %e, "Remote call failed");
        } else {
            tracing::debug!(
                service = %self.service,
                operation,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Remote call completed"
            );
        }
        result
    }

    async fn exchange(&self, operation: &'static str, request: RequestBuilder) -> RemoteResult<String> {
        let transport = |e: reqwest::Error| RemoteError::Transport {
            service: self.service,
            operation,
            reason: e.to_string(),
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(RemoteError::Status {
                service: self.service,
                operation,
                status: status.as_u16(),
                body: truncate(body),
            });
        }
        Ok(body)
    }

    fn decode<T: DeserializeOwned>(&self, operation: &'static str, body: &str) -> RemoteResult<T> {
        serde_json::from_str(body).map_err(|e| RemoteError::Schema {
            service: self.service,
            operation,
            reason: e.to_string(),
        })
    }

    /// Build a schema error for semantic checks done after decoding.
    pub fn schema_error(&self, operation: &'static str, reason: impl Into<String>) -> RemoteError {
        RemoteError::Schema {
            service: self.service,
            operation,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Debug for JsonEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonEndpoint")
            .field("service", &self.service)
            .field("base_url", &self.base_url.as_str())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}
