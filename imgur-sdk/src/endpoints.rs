// ABOUTME: Read endpoints of the Imgur API: image, album, gallery image/album and credits
// ABOUTME: Shares one request/decode pipeline that attaches the observed quota to results

use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::constants::paths;
use crate::envelope::{check_success, decode_envelope};
use crate::error::ImgurError;
use crate::models::{
    AlbumInfo, GalleryAlbumInfo, GalleryImageInfo, ImageInfo, ResourceKind, WithQuota,
};
use crate::rate_limit::{extract_quota, QuotaSnapshot};
use crate::transport::{ApiRequest, ApiResponse, TransportError};
use crate::{ImgurClient, Result};

impl ImgurClient {
    /// Queries imgur for information on an album.
    pub async fn album_info(&self, id: &str) -> Result<AlbumInfo> {
        self.fetch(ResourceKind::Album, paths::ALBUM, id).await
    }

    /// Queries imgur for information on an image.
    pub async fn image_info(&self, id: &str) -> Result<ImageInfo> {
        self.fetch(ResourceKind::Image, paths::IMAGE, id).await
    }

    /// Queries imgur for an image published to the gallery.
    pub async fn gallery_image_info(&self, id: &str) -> Result<GalleryImageInfo> {
        self.fetch(ResourceKind::GalleryImage, paths::GALLERY_IMAGE, id)
            .await
    }

    /// Queries imgur for an album published to the gallery.
    pub async fn gallery_album_info(&self, id: &str) -> Result<GalleryAlbumInfo> {
        self.fetch(ResourceKind::GalleryAlbum, paths::GALLERY_ALBUM, id)
            .await
    }

    /// Returns the current quota without fetching anything else.
    ///
    /// Probes a cheap endpoint and reads its `X-RateLimit-*` headers; the
    /// response payload is only checked for the success flag.
    pub async fn rate_limit(&self) -> Result<QuotaSnapshot> {
        let url = self.endpoint_url(paths::CREDITS);
        let response = match self.get(url).await {
            Ok(response) => response,
            Err(source) => {
                let snapshot = match &source {
                    TransportError::Status { headers, .. } => extract_quota(headers).0,
                    _ => self.last_quota().snapshot.unwrap_or_default(),
                };
                let err = ImgurError::RateCheck { source };
                self.record_quota(snapshot, Some(err.to_string()));
                return Err(err);
            }
        };

        let snapshot = self.observe_quota(&response.headers);

        if let Err(err) = check_success(&response.body, "rate limit") {
            self.record_quota(snapshot, Some(err.to_string()));
            return Err(err);
        }

        Ok(snapshot)
    }

    async fn fetch<T>(&self, kind: ResourceKind, path: &str, id: &str) -> Result<T>
    where
        T: DeserializeOwned + WithQuota,
    {
        if id.is_empty() {
            return Err(ImgurError::Validation(format!("{kind} id must not be empty")));
        }

        debug!(%kind, id, "fetching resource");
        let response = self
            .get(self.endpoint_url(&format!("{path}{id}")))
            .await
            .map_err(|source| ImgurError::Retrieval {
                kind,
                id: id.to_string(),
                source,
            })?;

        let quota = self.observe_quota(&response.headers);
        let mut info: T = decode_envelope(&response.body, &format!("{kind} {id}"))?;
        info.set_quota(quota);
        Ok(info)
    }

    pub(crate) async fn get(
        &self,
        url: String,
    ) -> std::result::Result<ApiResponse, TransportError> {
        self.send(ApiRequest {
            method: Method::GET,
            url,
            headers: self.request_headers(),
            body: None,
        })
        .await
    }

    /// Sends through the transport; error statuses still report their quota.
    pub(crate) async fn send(
        &self,
        request: ApiRequest,
    ) -> std::result::Result<ApiResponse, TransportError> {
        let result = self.transport().send(request).await;
        if let Err(TransportError::Status { headers, .. }) = &result {
            self.observe_quota(headers);
        }
        result
    }

    /// Extracts the quota from response headers and records it on the client.
    pub(crate) fn observe_quota(&self, headers: &HeaderMap) -> QuotaSnapshot {
        let (snapshot, error) = extract_quota(headers);
        if let Some(error) = &error {
            warn!(error = %error, "could not parse rate-limit header");
        }
        self.record_quota(snapshot, error.map(|e| e.to_string()));
        snapshot
    }
}
