//! HTTP transport to the ledger node.
//!
//! The SDK never talks to the network directly. Everything goes through the
//! [`Transport`] trait, which returns raw response text; callers parse it
//! with [`crate::normalize::parse_response`] so numeric precision is kept.
//! [`HttpTransport`] is the production implementation on `reqwest`.
//!
//! There are no retries at this layer. A submitted transaction may already
//! be accepted when a timeout is observed, and sending it again blindly could
//! double-submit.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::SdkOptions;
use crate::errors::{SdkResult, TransportError};
use crate::normalize::parse_response;

/// The two verbs the node's REST interface uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// Sends one request to the node and returns the raw body.
///
/// `payload` is the query object for `GET` and the JSON body for `POST`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &Value,
    ) -> Result<String, TransportError>;
}

/// Sends a request and returns the normalized JSON response.
pub(crate) async fn request_json(
    transport: &dyn Transport,
    method: HttpMethod,
    path: &str,
    payload: &Value,
) -> Result<Value, TransportError> {
    tracing::debug!(%method, path, "node request");
    let raw = transport.request(method, path, payload).await?;
    parse_response(&raw)
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// [`Transport`] over HTTP(S) with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a client for the node described by `options`.
    pub fn new(options: &SdkOptions) -> SdkResult<Self> {
        options.validate()?;
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: options.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &Value,
    ) -> Result<String, TransportError> {
        if path.trim().is_empty() {
            return Err(TransportError::InvalidRequest("empty request path".into()));
        }

        let url = self.url(path);
        let builder = match method {
            HttpMethod::Get => self.client.get(&url).query(&query_pairs(payload)),
            HttpMethod::Post => self.client.post(&url).json(payload),
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "node returned error status");
            return Err(TransportError::Status(status.as_u16()));
        }

        response.text().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(e.to_string())
    }
}

/// Flattens a payload object into query pairs. Strings are sent as-is,
/// null members are skipped, anything else uses its JSON text.
fn query_pairs(payload: &Value) -> Vec<(String, String)> {
    let Some(map) = payload.as_object() else {
        return Vec::new();
    };
    map.iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| {
            let text = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), text)
        })
        .collect()
}
