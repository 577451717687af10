//! reqwest-backed transport for Atlassian Cloud REST APIs

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use serde_json::Value;
use tracing::debug;

use super::error::{AtlassianError, Result};
use super::transport::{ApiRequest, HttpTransport, Method};
use crate::config::ConnectionConfig;

/// HTTP client for one Jira or Confluence instance.
///
/// Authenticates every request with basic auth (username + API token). The
/// underlying connection pool is created once and reused. No retries.
#[derive(Debug, Clone)]
pub struct AtlassianHttpClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    api_token: String,
}

impl AtlassianHttpClient {
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| AtlassianError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            api_token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl HttpTransport for AtlassianHttpClient {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = request.method.as_str(), path = %request.path, "Sending request");

        let mut builder = self
            .client
            .request(Self::method(request.method), &url)
            .basic_auth(&self.username, Some(&self.api_token));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let text = response.text().await.map_err(transport_error)?;

        if !(200..300).contains(&status) {
            debug!(status, path = %request.path, "Request failed");
            let message = error_message(status, &text);
            return Err(AtlassianError::from_status(status, &message, retry_after));
        }

        decode_body(&text)
    }
}

fn transport_error(error: reqwest::Error) -> AtlassianError {
    if error.is_timeout() {
        AtlassianError::Timeout(format!("Request timed out: {error}"))
    } else if error.is_connect() {
        AtlassianError::Network(format!("Connection failed: {error}"))
    } else {
        AtlassianError::Network(format!("Request failed: {error}"))
    }
}

fn decode_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| AtlassianError::Decode(e.to_string()))
}

/// Best-effort message from an Atlassian error body.
///
/// Prefers `errorMessages` (joined with `"; "`), then `message`, then the
/// raw body, then `HTTP <status>`.
fn error_message(status: u16, body: &str) -> String {
    let fallback = || {
        if body.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            body.to_string()
        }
    };

    let Ok(parsed) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };
    let Some(object) = parsed.as_object() else {
        return parsed.to_string();
    };

    match object.get("errorMessages") {
        Some(Value::Array(messages)) if !messages.is_empty() => {
            return messages
                .iter()
                .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
                .collect::<Vec<_>>()
                .join("; ");
        }
        Some(Value::String(message)) if !message.is_empty() => return message.clone(),
        _ => {}
    }

    match object.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => fallback(),
    }
}
