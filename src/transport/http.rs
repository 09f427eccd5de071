//! reqwest-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::Transport;
use crate::cache::Params;
use crate::config::ClientConfig;
use crate::{ApiError, Result, version};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-over-HTTP client bound to one API base URL.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a transport for `base_url` with a custom timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(version::user_agent())
            .build()
            .map_err(|e| ApiError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a transport from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn decode(response: Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string()),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &Params,
        body: Option<Value>,
    ) -> Result<Value> {
        let url = self.url(path);
        debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(&query_pairs(query));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        Self::decode(response).await
    }
}

/// Flatten parameters into query pairs; strings are sent unquoted.
fn query_pairs(params: &Params) -> Vec<(&str, String)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.as_str(), value)
        })
        .collect()
}

/// Error payloads the API is known to send.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(m) }) => Some(m),
        Ok(_) => None,
        Err(_) => {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_joins_without_double_slash() {
        let transport = HttpTransport::new("http://localhost:5000/api/").unwrap();
        assert_eq!(transport.url("/projects"), "http://localhost:5000/api/projects");
        assert_eq!(transport.url("projects/1"), "http://localhost:5000/api/projects/1");
    }

    #[test]
    fn query_pairs_unquote_strings_and_skip_nulls() {
        let mut params = Params::new();
        params.insert("q".into(), json!("rust"));
        params.insert("page".into(), json!(2));
        params.insert("skip".into(), Value::Null);

        let pairs = query_pairs(&params);
        assert_eq!(pairs, vec![("page", "2".to_string()), ("q", "rust".to_string())]);
    }

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"message":"nope"}"#).as_deref(), Some("nope"));
        assert_eq!(error_message(r#"{"error":"bad id"}"#).as_deref(), Some("bad id"));
        assert_eq!(error_message("plain text").as_deref(), Some("plain text"));
        assert_eq!(error_message("").as_deref(), None);
    }
}
