// ABOUTME: Resolves public imgur URLs into typed resources
// ABOUTME: Ordered pattern table, id extraction and lookup fallback per URL shape

use tracing::debug;

use crate::error::ImgurError;
use crate::models::Resource;
use crate::{ImgurClient, Result};

/// The shape of an imgur URL, which decides how its id is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlShape {
    /// `i.imgur.com/<id>.<ext>`
    DirectImage,
    /// `imgur.com/a/<id>`
    Album,
    /// `imgur.com/gallery/<id>`
    Gallery,
    /// `imgur.com/<id>`
    Image,
}

impl UrlShape {
    /// Path name used in id extraction errors.
    pub fn path_name(&self) -> &'static str {
        match self {
            UrlShape::DirectImage => "i.imgur.com/",
            UrlShape::Album => "imgur.com/a/",
            UrlShape::Gallery => "imgur.com/gallery/",
            UrlShape::Image => "imgur.com/",
        }
    }
}

/// Checked in order; the generic host patterns must come last.
const URL_PATTERNS: &[(&str, UrlShape)] = &[
    ("://i.imgur.com/", UrlShape::DirectImage),
    ("://imgur.com/a/", UrlShape::Album),
    ("://m.imgur.com/a/", UrlShape::Album),
    ("://imgur.com/gallery/", UrlShape::Gallery),
    ("://m.imgur.com/gallery/", UrlShape::Gallery),
    ("://imgur.com/", UrlShape::Image),
    ("://m.imgur.com/", UrlShape::Image),
];

/// Everything before the first `?` or `#`.
fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

/// Returns the shape of the first pattern contained in `url`, ignoring any
/// query string or fragment.
pub fn classify(url: &str) -> Option<UrlShape> {
    let url = strip_query(url);
    URL_PATTERNS
        .iter()
        .find(|(pattern, _)| url.contains(pattern))
        .map(|(_, shape)| *shape)
}

/// Extracts the resource id from `url` as it would be for `shape`.
pub fn extract_id(url: &str, shape: UrlShape) -> Result<&str> {
    let missing = || ImgurError::IdExtraction {
        url: url.to_string(),
        path: shape.path_name(),
    };

    let without_query = strip_query(url);
    let start = without_query.rfind('/').map_or(0, |slash| slash + 1);

    let id = match shape {
        UrlShape::DirectImage => {
            let end = without_query.rfind('.').ok_or_else(missing)?;
            if end <= start {
                return Err(missing());
            }
            &without_query[start..end]
        }
        UrlShape::Album | UrlShape::Gallery | UrlShape::Image => &without_query[start..],
    };

    if id.is_empty() {
        return Err(missing());
    }
    Ok(id)
}

impl ImgurClient {
    /// Resolves an imgur URL into the resource it points at.
    ///
    /// Image and gallery URLs are ambiguous, so they are tried against the
    /// gallery first and fall back to the plain lookup. When both lookups
    /// fail, the error of the second one is returned.
    pub async fn resolve_url(&self, url: &str) -> Result<Resource> {
        let url = url.trim();
        let shape = classify(url).ok_or_else(|| ImgurError::UnresolvableUrl(url.to_string()))?;
        let id = extract_id(url, shape)?;
        debug!(id, path = shape.path_name(), "detected imgur id");

        match shape {
            UrlShape::DirectImage | UrlShape::Image => match self.gallery_image_info(id).await {
                Ok(info) => Ok(info.into()),
                Err(gallery_err) => {
                    debug!(error = %gallery_err, "not a gallery image, trying plain image");
                    self.image_info(id).await.map(Resource::from)
                }
            },
            UrlShape::Album => self.album_info(id).await.map(Resource::from),
            UrlShape::Gallery => match self.gallery_album_info(id).await {
                Ok(info) => Ok(info.into()),
                Err(album_err) => {
                    debug!(error = %album_err, "not a gallery album, trying gallery image");
                    self.gallery_image_info(id).await.map(Resource::from)
                }
            },
        }
    }
}
