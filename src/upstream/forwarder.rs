//! HTTP client for the fixed upstream GraphQL endpoint.

use axum::http::{header, HeaderValue, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;

/// A relayed upstream reply: status and JSON body, unchanged.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Failures talking to the upstream, split by whether a response arrived.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-success status. Propagated to the
    /// caller with that status.
    #[error("TMDB API Error: {message}")]
    Rejected { status: StatusCode, message: String },

    /// No usable response arrived (connect/timeout/body failure). Surfaced
    /// to the caller as 500.
    #[error("Proxy error: {0}")]
    Unreachable(String),

    /// The forwarder itself could not be built from configuration.
    #[error("invalid upstream configuration: {0}")]
    Config(String),
}

impl UpstreamError {
    /// HTTP status the caller sees for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            UpstreamError::Rejected { status, .. } => *status,
            UpstreamError::Unreachable(_) | UpstreamError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Forwards GraphQL requests to the single configured upstream.
pub struct UpstreamForwarder {
    client: reqwest::Client,
    url: Url,
    static_bearer: Option<HeaderValue>,
}

impl UpstreamForwarder {
    /// Build the forwarder from validated configuration.
    ///
    /// Certificate validation is relaxed only when the config names it, and
    /// only on this client; nothing else in the process is affected.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let url = Url::parse(&config.url)
            .map_err(|e| UpstreamError::Config(format!("upstream url: {}", e)))?;

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs));
        if config.danger_accept_invalid_certs {
            tracing::warn!(
                upstream = %url,
                "TLS certificate validation disabled for upstream client"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|e| UpstreamError::Config(e.to_string()))?;

        let static_bearer = match &config.bearer_token {
            Some(token) => Some(
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| UpstreamError::Config(format!("bearer token: {}", e)))?,
            ),
            None => None,
        };

        Ok(Self {
            client,
            url,
            static_bearer,
        })
    }

    /// POST `body` to the upstream and relay its reply.
    ///
    /// Authorization policy: the caller's header wins; without one, the
    /// configured static token (if any) is injected; otherwise the request
    /// goes out unauthenticated.
    pub async fn forward(
        &self,
        body: &Value,
        caller_auth: Option<HeaderValue>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let mut request = self.client.post(self.url.clone()).json(body);
        if let Some(auth) = caller_auth.or_else(|| self.static_bearer.clone()) {
            request = request.header(header::AUTHORIZATION, auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Rejected {
                status,
                message: format!("request failed with status code {}", status.as_u16()),
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

        Ok(UpstreamResponse { status, body })
    }
}
