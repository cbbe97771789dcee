// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Ollama generate and tags endpoints.
//!
//! Provides [`OllamaClient`] which handles request construction, connection
//! pooling, timeouts, and retry of transient errors (408, 429, 5xx gateway
//! statuses, transport failures).

use std::time::Duration;

use reqwest::StatusCode;
use switchyard_config::model::OllamaConfig;
use switchyard_core::SwitchyardError;
use switchyard_resilience::RetryPolicy;
use tracing::{debug, warn};

use crate::types::{ErrorResponse, GenerateOptions, GenerateRequest, GenerateResponse, TagsResponse};

/// HTTP client for an Ollama-compatible server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
    retry: RetryPolicy,
    options: Option<GenerateOptions>,
}

impl OllamaClient {
    /// Creates a client from the `[ollama]` config section.
    pub fn new(config: &OllamaConfig) -> Result<Self, SwitchyardError> {
        let request_timeout = Duration::from_secs(config.request_timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(config.max_idle_connections)
            .build()
            .map_err(|e| SwitchyardError::Backend {
                message: format!("failed to build HTTP client: {e}"),
                retryable: false,
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout,
            retry: RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.retry_delay_ms),
            ),
            options: GenerateOptions::from_parts(config.temperature, config.top_p),
        })
    }

    /// Replaces the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Base URL with trailing slashes removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a non-streaming generate request, retrying transient failures.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GenerateResponse, SwitchyardError> {
        let request = GenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: false,
            options: self.options,
        };
        let url = format!("{}/api/generate", self.base_url);

        self.retry
            .run(|attempt| {
                let url = url.as_str();
                let request = &request;
                async move {
                    let response = self
                        .client
                        .post(url)
                        .json(request)
                        .send()
                        .await
                        .map_err(|e| self.transport_error(e))?;

                    let status = response.status();
                    debug!(status = %status, attempt, model, "generate response received");

                    if status.is_success() {
                        let body = response
                            .text()
                            .await
                            .map_err(|e| self.transport_error(e))?;
                        return serde_json::from_str::<GenerateResponse>(&body).map_err(|e| {
                            SwitchyardError::Backend {
                                message: format!("failed to parse generate response: {e}"),
                                retryable: false,
                                source: Some(Box::new(e)),
                            }
                        });
                    }

                    let body = response.text().await.unwrap_or_default();
                    Err(status_error(status, &body))
                }
            })
            .await
    }

    /// Lists installed models via `GET /api/tags`. Not retried.
    pub async fn list_models(&self) -> Result<Vec<String>, SwitchyardError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let tags: TagsResponse = response.json().await.map_err(|e| SwitchyardError::Backend {
            message: format!("failed to parse tags response: {e}"),
            retryable: false,
            source: Some(Box::new(e)),
        })?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    fn transport_error(&self, e: reqwest::Error) -> SwitchyardError {
        if e.is_timeout() {
            warn!(error = %e, "request timed out");
            return SwitchyardError::Timeout {
                duration: self.request_timeout,
            };
        }
        SwitchyardError::Backend {
            message: format!("HTTP request failed: {e}"),
            retryable: true,
            source: Some(Box::new(e)),
        }
    }
}

/// Converts a non-2xx response into a backend error.
fn status_error(status: StatusCode, body: &str) -> SwitchyardError {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string());
    let retryable = is_transient_error(status);
    if retryable {
        warn!(status = %status, body = %detail, "transient error");
    }
    SwitchyardError::backend(format!("server returned {status}: {detail}"), retryable)
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
pub fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 429 | 500 | 502 | 503 | 504)
}

/// Returns true when the request never got an HTTP response (connect
/// failure, timeout), as opposed to an error status or an unreadable body.
pub fn is_transport_error(err: &SwitchyardError) -> bool {
    match err {
        SwitchyardError::Timeout { .. } => true,
        SwitchyardError::Backend {
            source: Some(source),
            ..
        } => source
            .downcast_ref::<reqwest::Error>()
            .is_some_and(|e| !e.is_decode() && !e.is_status()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_statuses() {
        for code in [408, 429, 500, 502, 503, 504] {
            assert!(is_transient_error(StatusCode::from_u16(code).unwrap()), "{code}");
        }
        for code in [400, 401, 404, 501] {
            assert!(!is_transient_error(StatusCode::from_u16(code).unwrap()), "{code}");
        }
    }

    #[test]
    fn status_error_prefers_json_error_field() {
        let err = status_error(StatusCode::NOT_FOUND, r#"{"error": "model 'x' not found"}"#);
        assert_eq!(
            err.to_string(),
            "backend error: server returned 404 Not Found: model 'x' not found"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn status_errors_are_not_transport_errors() {
        let status = status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(!is_transport_error(&status));
        assert!(is_transport_error(&SwitchyardError::Timeout {
            duration: Duration::from_secs(1)
        }));
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = OllamaConfig {
            base_url: "http://localhost:11434//".into(),
            ..OllamaConfig::default()
        };
        let client = OllamaClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
    }
}
