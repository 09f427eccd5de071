//! HTTP transport seam.
//!
//! Resource clients talk to the REST API through the [`Transport`] trait.
//! [`HttpTransport`] is the reqwest-backed implementation; tests can swap in
//! their own.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::Result;
use crate::cache::Params;

/// JSON-over-HTTP request executor.
///
/// Implementations return the decoded JSON body on 2xx (or `Value::Null`
/// when the body is empty) and [`ApiError::Api`](crate::ApiError::Api) with
/// the status code otherwise.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request. `path` is relative to the API base URL.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &Params,
        body: Option<Value>,
    ) -> Result<Value>;

    async fn get(&self, path: &str, query: &Params) -> Result<Value> {
        self.request(Method::GET, path, query, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::POST, path, &Params::new(), Some(body)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::PUT, path, &Params::new(), Some(body)).await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::PATCH, path, &Params::new(), Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, &Params::new(), None).await
    }
}
