// ABOUTME: Image upload support: form-encoded POST to the image endpoint
// ABOUTME: Validates the payload and upload type before any request is sent

use http::header::{HeaderValue, CONTENT_TYPE};
use http::Method;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;
use typed_builder::TypedBuilder;
use url::form_urlencoded::byte_serialize;

use crate::constants::paths;
use crate::envelope::{check_success, decode_envelope};
use crate::error::ImgurError;
use crate::models::ImageInfo;
use crate::transport::{ApiRequest, TransportError};
use crate::{ImgurClient, Result};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const UPLOAD_CONTEXT: &str = "image upload";

/// How the `image` field of an upload should be interpreted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadKind {
    /// Raw file bytes
    File,
    Base64,
    /// A remote URL the API fetches itself
    Url,
}

impl UploadKind {
    /// Wire value of the `type` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::File => "file",
            UploadKind::Base64 => "base64",
            UploadKind::Url => "URL",
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadKind {
    type Err = ImgurError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "file" => Ok(UploadKind::File),
            "base64" => Ok(UploadKind::Base64),
            "URL" => Ok(UploadKind::Url),
            other => Err(ImgurError::Validation(format!(
                "invalid upload type: {other}. Use file, base64 or URL"
            ))),
        }
    }
}

impl From<UploadKind> for String {
    fn from(kind: UploadKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Optional metadata attached to an upload. Empty values are not sent.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
pub struct UploadOptions {
    /// Album id, or the album's deletehash for anonymous albums
    #[builder(default, setter(strip_option, into))]
    pub album: Option<String>,

    #[builder(default, setter(strip_option, into))]
    pub title: Option<String>,

    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct UploadRequest {
    /// File bytes, base64 text or a URL, depending on `kind`
    #[builder(setter(into))]
    pub image: Vec<u8>,

    /// One of `file`, `base64` or `URL`; checked before sending
    #[builder(setter(into))]
    pub kind: String,

    #[builder(default)]
    pub options: UploadOptions,
}

impl UploadRequest {
    fn form_body(&self, kind: UploadKind) -> Vec<u8> {
        let mut fields: Vec<(&str, &[u8])> = vec![
            ("image", self.image.as_slice()),
            ("type", kind.as_str().as_bytes()),
        ];

        let optional = [
            ("album", &self.options.album),
            ("title", &self.options.title),
            ("description", &self.options.description),
        ];
        for (name, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                fields.push((name, value.as_bytes()));
            }
        }

        fields
            .into_iter()
            .map(|(name, value)| format!("{name}={}", byte_serialize(value).collect::<String>()))
            .collect::<Vec<_>>()
            .join("&")
            .into_bytes()
    }
}

impl ImgurClient {
    /// Uploads an image anonymously.
    ///
    /// The returned info carries the quota read from the upload response.
    pub async fn upload_image(&self, request: UploadRequest) -> Result<ImageInfo> {
        if request.image.is_empty() {
            return Err(ImgurError::Validation("invalid image: no data".to_string()));
        }
        let kind: UploadKind = request.kind.parse()?;

        let mut headers = self.request_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        let url = self.endpoint_url(paths::UPLOAD);
        debug!(%url, %kind, bytes = request.image.len(), "uploading image");

        let response = self
            .send(ApiRequest {
                method: Method::POST,
                url,
                headers,
                body: Some(request.form_body(kind)),
            })
            .await
            .map_err(upload_failure)?;

        let quota = self.observe_quota(&response.headers);
        let mut info: ImageInfo = decode_envelope(&response.body, UPLOAD_CONTEXT)?;
        info.quota = quota;
        Ok(info)
    }

    /// Reads a file from disk and uploads its bytes with kind `file`.
    pub async fn upload_image_from_file(
        &self,
        path: impl AsRef<Path>,
        options: UploadOptions,
    ) -> Result<ImageInfo> {
        let path = path.as_ref();
        let image = tokio::fs::read(path).await.map_err(|source| ImgurError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.upload_image(UploadRequest {
            image,
            kind: UploadKind::File.into(),
            options,
        })
        .await
    }
}

/// Rejections come back as non-2xx answers with a `success=false` envelope.
fn upload_failure(source: TransportError) -> ImgurError {
    if let TransportError::Status { body, .. } = &source {
        let rejection = check_success(body.as_bytes(), UPLOAD_CONTEXT);
        if let Err(err @ ImgurError::Api { .. }) = rejection {
            return err;
        }
    }
    ImgurError::Upload { source }
}
