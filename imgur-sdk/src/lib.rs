// ABOUTME: Imgur SDK library providing a typed client for the Imgur v3 API
// ABOUTME: Includes authentication, URL resolution, uploads and rate-limit tracking

use http::header::{HeaderName, AUTHORIZATION};
use http::{HeaderMap, HeaderValue};
use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Arc;
use url::Url;

pub mod builder;
pub mod constants;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod resolver;
pub mod transport;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use builder::ImgurClientConfig;
pub use error::ImgurError;
pub use models::{
    AlbumInfo, GalleryAlbumInfo, GalleryImageInfo, ImageInfo, Resource, ResourceKind,
};
pub use rate_limit::{extract_quota, QuotaHeaderError, QuotaSnapshot};
pub use resolver::{classify, extract_id, UrlShape};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport, TransportError};
pub use upload::{UploadKind, UploadOptions, UploadRequest};

pub type Result<T> = std::result::Result<T, ImgurError>;

use constants::{headers, urls};

/// Most recent quota observation made by a client.
///
/// Advisory only: concurrent calls overwrite it last-write-wins. Prefer the
/// snapshot attached to each call's result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LastQuota {
    pub snapshot: Option<QuotaSnapshot>,
    /// Header parse failure or failed rate check from the same observation
    pub error: Option<String>,
}

pub struct ImgurClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    auth_headers: HeaderMap,
    routed: bool,
    last_quota: RwLock<LastQuota>,
}

impl fmt::Debug for ImgurClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImgurClient")
            .field("base_url", &self.base_url)
            .field("routed", &self.routed)
            .finish_non_exhaustive()
    }
}

impl ImgurClient {
    /// Creates a client with default settings for the given Client-ID.
    pub fn new(client_id: impl Into<String>) -> Result<Self> {
        let client_id: String = client_id.into();
        Self::builder()
            .client_id(SecretString::new(client_id.into_boxed_str()))
            .build()
    }

    pub fn from_config(config: ImgurClientConfig) -> Result<Self> {
        let client_id = config.client_id.expose_secret().trim();
        if client_id.is_empty() {
            return Err(ImgurError::Configuration(
                "invalid imgur client-id provided".to_string(),
            ));
        }

        let mut auth_headers = HeaderMap::new();
        let mut authorization = HeaderValue::from_str(&format!("Client-ID {client_id}"))
            .map_err(|_| {
                ImgurError::Configuration("client-id contains invalid characters".to_string())
            })?;
        authorization.set_sensitive(true);
        auth_headers.insert(AUTHORIZATION, authorization);

        let routed = match &config.rapidapi_key {
            Some(key) if !key.expose_secret().trim().is_empty() => {
                let mut key_value = HeaderValue::from_str(key.expose_secret().trim())
                    .map_err(|_| {
                        ImgurError::Configuration(
                            "RapidAPI key contains invalid characters".to_string(),
                        )
                    })?;
                key_value.set_sensitive(true);
                auth_headers.insert(
                    HeaderName::from_static(headers::RAPIDAPI_HOST),
                    HeaderValue::from_static(urls::RAPIDAPI_HOST),
                );
                auth_headers.insert(HeaderName::from_static(headers::RAPIDAPI_KEY), key_value);
                true
            }
            _ => false,
        };

        let base_url = match config.base_url {
            Some(base_url) => normalize_base_url(&base_url)?,
            None if routed => urls::RAPIDAPI_BASE.to_string(),
            None => urls::IMGUR_API_BASE.to_string(),
        };

        let transport: Arc<dyn Transport> = match config.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::new(config.timeout, &config.user_agent).map_err(|e| {
                    ImgurError::Configuration(format!("could not build HTTP client: {e}"))
                })?,
            ),
        };

        Ok(Self {
            transport,
            base_url,
            auth_headers,
            routed,
            last_quota: RwLock::new(LastQuota::default()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests go through the RapidAPI gateway.
    pub fn is_routed(&self) -> bool {
        self.routed
    }

    /// Latest quota observed by any call on this client.
    pub fn last_quota(&self) -> LastQuota {
        self.last_quota.read().clone()
    }

    pub(crate) fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request_headers(&self) -> HeaderMap {
        self.auth_headers.clone()
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub(crate) fn record_quota(&self, snapshot: QuotaSnapshot, error: Option<String>) {
        *self.last_quota.write() = LastQuota {
            snapshot: Some(snapshot),
            error,
        };
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url)
        .map_err(|e| ImgurError::Configuration(format!("Invalid base URL: {e}")))?;

    let mut normalized = parsed.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Ok(normalized)
}
