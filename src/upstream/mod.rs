//! HTTP client for the backend API service.
//!
//! The backend owns all durable data and business logic; this client only
//! forwards requests with the caller's bearer token and hands back the
//! status and JSON body. One outbound call per inbound request, no retries.

use axum::body::Bytes;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode};
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure talking to the backend, before any HTTP status is available.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),

    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Status and parsed JSON body of a backend response. An empty body
/// (e.g. a 204) parses to `Value::Null`.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Client wrapper for the backend API service.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        debug!("Backend API at {}", base_url);
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Build the full upstream URL for a path plus query pairs. The result
    /// doubles as the cache key for reads.
    pub fn url_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.join(path)?;
        for (name, value) in query {
            url.query_pairs_mut().append_pair(name, value);
        }
        Ok(url)
    }

    /// GET a pre-built URL with the caller's bearer token.
    pub async fn get(&self, url: Url, token: &str) -> Result<UpstreamResponse, UpstreamError> {
        let response = self.http.get(url).bearer_auth(token).send().await?;
        read_response(response).await
    }

    /// Send a JSON body with the caller's bearer token.
    pub async fn send_json(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: &Value,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.base_url.join(path)?;
        let response = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        read_response(response).await
    }

    /// Send a body-less request (DELETE) with the caller's bearer token.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.base_url.join(path)?;
        let response = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .send()
            .await?;
        read_response(response).await
    }

    /// POST a request body verbatim without a token (login), preserving
    /// the original content type so form fields pass through untouched.
    pub async fn post_body(
        &self,
        path: &str,
        content_type: Option<HeaderValue>,
        body: Bytes,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.base_url.join(path)?;
        let mut request = self.http.post(url).body(body);
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        let response = request.send().await?;
        read_response(response).await
    }

    /// POST raw bytes with the original content type preserved, so
    /// multipart uploads pass through untouched.
    pub async fn post_raw(
        &self,
        path: &str,
        content_type: Option<HeaderValue>,
        body: Bytes,
        token: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.base_url.join(path)?;
        let mut request = self.http.post(url).bearer_auth(token).body(body);
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        let response = request.send().await?;
        read_response(response).await
    }
}

async fn read_response(response: reqwest::Response) -> Result<UpstreamResponse, UpstreamError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok(UpstreamResponse { status, body })
}
