//! Client for the lookup server. Implements LookupPort over HTTP.
//!
//! `reqwest::Client` pools connections internally, so one `LookupClient` can be
//! cloned and shared by concurrent callers.

use super::wire::{ErrorBody, HealthBody, LOOKUP_TOOL, ToolResponse};
use crate::domain::{LookupError, ResolvedArticle, TransportError};
use crate::ports::LookupPort;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct LookupClient {
    client: Client,
    base_url: String,
}

impl LookupClient {
    /// # Arguments
    /// * `base_url` - Server root, e.g. "http://localhost:8000"
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connection(format!("HTTP client init failed: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Invoke a named tool on the server.
    ///
    /// # Errors
    /// - `MissingParameter` when the server answers 400
    /// - `Status` for any other non-200 status
    /// - `Connection` when the request never completes (refused, timeout)
    /// - `Decode` when a 200 body is not a tool reply
    pub async fn call_tool(
        &self,
        tool: &str,
        args: &serde_json::Value,
    ) -> Result<ToolResponse, TransportError> {
        let url = format!("{}/tools/{}", self.base_url, tool);
        debug!(url = %url, "calling tool");

        let response = self
            .client
            .post(&url)
            .json(args)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::OK {
            return response
                .json::<ToolResponse>()
                .await
                .map_err(|e| TransportError::Decode(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        warn!(status = %status, url = %url, "tool call failed");
        if status == StatusCode::BAD_REQUEST {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(TransportError::MissingParameter(message));
        }
        Err(TransportError::Status {
            status: status.as_u16(),
            body: text,
        })
    }

    /// Probe `/health`.
    pub async fn health(&self) -> Result<(), TransportError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let body: HealthBody = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        if body.status != "ok" {
            return Err(TransportError::Decode(format!(
                "unexpected health status '{}'",
                body.status
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl LookupPort for LookupClient {
    async fn lookup(&self, term: &str) -> Result<ResolvedArticle, LookupError> {
        let reply = self
            .call_tool(LOOKUP_TOOL, &serde_json::json!({ "busca": term }))
            .await?;
        reply.into_article(term).map_err(LookupError::from)
    }
}
