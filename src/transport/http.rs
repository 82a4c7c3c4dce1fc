//! HTTP transport for WordPress-style REST APIs.

use super::{Method, Transport, TransportRequest, TransportResponse};
use crate::config::{ConfigError, StoreConfig};
use crate::framework::error::INVALID_JSON;
use crate::framework::RequestError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Header carrying the total size of a collection.
pub const TOTAL_HEADER: &str = "x-wp-total";

/// Code used for non-2xx responses whose body is not a REST error object.
pub const UNKNOWN_ERROR: &str = "unknown_error";

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

fn sanitize_for_log(body: &str) -> String {
    let truncated: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
    let truncated = if truncated.len() < body.len() {
        format!("{}... [truncated, {} bytes total]", truncated, body.len())
    } else {
        truncated
    };
    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Turns a non-2xx response into a [`RequestError`], keeping the server's
/// `{code, message, data}` when present and recording the status in `data.status`.
pub fn error_from_response(status: u16, body: &str) -> RequestError {
    match serde_json::from_str::<RequestError>(body) {
        Ok(error) if !error.code.is_empty() => {
            if error.status().is_some() {
                error
            } else {
                error.with_status(status)
            }
        }
        _ => RequestError::new(UNKNOWN_ERROR, format!("API request failed: {}", status))
            .with_status(status),
    }
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Self::from_config(&StoreConfig::new(base_url))
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, ConfigError> {
        Url::parse(&config.base_url)
            .map_err(|e| ConfigError::Invalid(format!("base_url: {}", e)))?;

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::Invalid(format!("http client: {}", e)))?;

        let credentials = match (&config.consumer_key, &config.consumer_secret) {
            (Some(key), Some(secret)) => Some((key.clone(), secret.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, request: &TransportRequest) -> Result<Url, RequestError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path))
            .map_err(|e| RequestError::network(format!("Invalid request URL: {}", e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, RequestError> {
        let url = self.url(&request)?;
        tracing::debug!(method = %request.method, %url, "Sending request");

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, url);
        if let Some((key, secret)) = &self.credentials {
            builder = builder.basic_auth(key, Some(secret));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RequestError::network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let total = response
            .headers()
            .get(TOTAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<usize>().ok());
        let text = response
            .text()
            .await
            .map_err(|e| RequestError::network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %sanitize_for_log(&text), "API error");
            return Err(error_from_response(status.as_u16(), &text));
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                RequestError::new(INVALID_JSON, format!("Failed to parse response JSON: {}", e))
                    .with_status(status.as_u16())
            })?
        };

        Ok(TransportResponse { body, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_rest_body() {
        let body = r#"{"code":"rest_invalid_param","message":"Invalid parameter(s): name","data":{"status":400}}"#;
        let err = error_from_response(400, body);
        assert_eq!(err.code, "rest_invalid_param");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_error_fills_missing_status() {
        let err = error_from_response(404, r#"{"code":"not_here","message":"Gone"}"#);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_from_html_body() {
        let err = error_from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.code, UNKNOWN_ERROR);
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = "x".repeat(500);
        let sanitized = sanitize_for_log(&long);
        assert!(sanitized.contains("truncated, 500 bytes total"));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(HttpTransport::new("not a url").is_err());
    }
}
