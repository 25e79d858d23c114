// ABOUTME: Custom error types for the Imgur SDK with user-friendly messages
// ABOUTME: Separates configuration, transport, decode, API and validation failures

use std::path::PathBuf;
use thiserror::Error;

use crate::models::ResourceKind;
use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum ImgurError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Problem retrieving {kind} {id}: {source}")]
    Retrieval {
        kind: ResourceKind,
        id: String,
        #[source]
        source: TransportError,
    },

    #[error("Problem posting image upload: {source}")]
    Upload {
        #[source]
        source: TransportError,
    },

    #[error("Problem checking rate limit: {source}")]
    RateCheck {
        #[source]
        source: TransportError,
    },

    #[error("Problem decoding response for {context}")]
    Decode {
        context: String,
        /// Raw response body, kept for diagnosis
        body: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("[{status}] {message}")]
    Api { status: i64, message: String },

    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error("Could not find ID in URL {url}. Was going down the {path} path")]
    IdExtraction { url: String, path: &'static str },

    #[error("URL pattern matching for URL {0} failed")]
    UnresolvableUrl(String),

    #[error("Could not read file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ImgurError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            ImgurError::Configuration(_) => {
                Some("Register an application at https://api.imgur.com/oauth2/addclient to get a Client-ID")
            }
            ImgurError::Retrieval { .. } | ImgurError::Upload { .. } | ImgurError::RateCheck { .. } => {
                Some("Check your internet connection and try again")
            }
            ImgurError::Api { status: 403, .. } => {
                Some("The Client-ID was rejected or the resource is private")
            }
            ImgurError::Api { status: 404, .. } => Some("The resource does not exist or was deleted"),
            ImgurError::Api { status: 429, .. } => {
                Some("Rate limit exceeded. Wait for the quota reset before making more requests")
            }
            ImgurError::UnresolvableUrl(_) | ImgurError::IdExtraction { .. } => Some(
                "Supported URLs look like https://imgur.com/<id>, https://imgur.com/a/<id>, https://imgur.com/gallery/<id> or https://i.imgur.com/<id>.jpg",
            ),
            _ => None,
        }
    }

    /// Provider status code for API rejections.
    pub fn status(&self) -> Option<i64> {
        match self {
            ImgurError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure happened before an envelope could be read.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ImgurError::Retrieval { .. } | ImgurError::Upload { .. } | ImgurError::RateCheck { .. }
        )
    }
}
