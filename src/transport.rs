// src/transport.rs
//! HTTP transport: base URL + per-request timeout + uniform error
//! surfacing. No retry here; callers treat failure as authoritative.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::TransportError;

/// Seam between adapters and the wire. Tests stub this; production uses
/// [`HttpTransport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, path: &str, params: &[(String, String)]) -> Result<Value, TransportError>;
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpTransport {
    pub fn new(cfg: &AppConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(cfg.timeout).build()?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            timeout_secs: cfg.timeout.as_secs(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                seconds: self.timeout_secs,
            }
        } else {
            TransportError::Network(e)
        }
    }

    async fn decode(&self, resp: reqwest::Response) -> Result<Value, TransportError> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_send_error(e))?;
        if !status.is_success() {
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                // Keep the server's own message, but bounded.
                body.chars().take(300).collect()
            };
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(TransportError::Decode)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, path: &str, params: &[(String, String)]) -> Result<Value, TransportError> {
        let resp = self
            .client
            .get(self.url(path))
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.decode(resp).await
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        self.decode(resp).await
    }
}
