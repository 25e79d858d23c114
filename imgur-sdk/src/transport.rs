// ABOUTME: Transport seam between the endpoint client and the HTTP stack
// ABOUTME: Defines the Transport trait and its reqwest-backed implementation

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// A fully built request handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Raw response returned by a [`Transport`] for a 2xx answer.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Body as text, replacing invalid UTF-8.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not reach {url}: {message}")]
    Connect {
        url: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("HTTP status {status} returned by {url}")]
    Status {
        url: String,
        status: StatusCode,
        headers: HeaderMap,
        body: String,
    },

    #[error("could not read response body from {url}: {message}")]
    Body {
        url: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TransportError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Sends a single request and returns the raw answer.
///
/// Implementations must report non-2xx answers as [`TransportError::Status`]
/// and keep connection failures and body read failures distinct.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Default transport backed by a pooled `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;

        debug!(%method, %url, "sending request");

        let mut builder = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|err| TransportError::Connect {
            url: url.clone(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })?;

        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                url,
                status,
                headers,
                body,
            });
        }

        let body = response.bytes().await.map_err(|err| TransportError::Body {
            url: url.clone(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })?;

        Ok(ApiResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
