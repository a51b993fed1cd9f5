//! HTTP transport of the API client.
//!
//! The browser implementation goes through `gloo-net` (fetch). Requests and
//! replies are plain data so the client logic above can be exercised
//! without a browser.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::shared::error::ApiError;

pub const STATUS_UNAUTHORIZED: u16 = 401;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// JSON text
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Best human-readable reason of a failed reply
    pub fn failure_reason(&self) -> String {
        let parsed: Option<serde_json::Value> = serde_json::from_str(&self.body).ok();
        parsed
            .as_ref()
            .and_then(|v| v.get("detail").or_else(|| v.get("message")))
            .map(|v| match v.as_str() {
                Some(s) => s.to_string(),
                None => v.to_string(),
            })
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }
}

#[async_trait(?Send)]
pub trait Transport {
    /// Only transport-level failures are errors; any HTTP status is a reply
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, ApiError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpReply, ApiError> {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Delete => Request::delete(&request.url),
        }
        .header("Content-Type", "application/json");

        let response = match request.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

        Ok(HttpReply { status, body })
    }
}
