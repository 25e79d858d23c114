// ABOUTME: Typed resource descriptors returned by the Imgur API
// ABOUTME: Image, album and their gallery forms plus the Resource sum type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::rate_limit::QuotaSnapshot;

/// Which kind of resource a call was asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Image,
    Album,
    GalleryImage,
    GalleryAlbum,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Image => "image",
            ResourceKind::Album => "album",
            ResourceKind::GalleryImage => "gallery image",
            ResourceKind::GalleryAlbum => "gallery album",
        };
        f.write_str(name)
    }
}

/// Maps an explicit `null` to the empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn epoch_to_utc(epoch: i64) -> Option<DateTime<Utc>> {
    if epoch == 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp(epoch, 0)
}

/// A single image as returned by `image/{id}` and by uploads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageInfo {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Upload time, epoch seconds
    pub datetime: i64,
    #[serde(rename = "type", deserialize_with = "null_as_empty")]
    pub mime_type: String,
    pub animated: bool,
    pub width: u32,
    pub height: u32,
    /// Size in bytes
    pub size: u64,
    pub views: u64,
    pub bandwidth: u64,
    /// Only present when authorized as the owner
    pub deletehash: Option<String>,
    /// Original filename, only present when authorized as the owner
    pub name: Option<String>,
    pub section: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub link: String,
    pub gifv: Option<String>,
    pub mp4: Option<String>,
    pub mp4_size: Option<u64>,
    pub looping: Option<bool>,
    pub favorite: bool,
    pub nsfw: Option<bool>,
    pub vote: Option<String>,
    pub in_gallery: bool,
    #[serde(skip_deserializing)]
    pub quota: QuotaSnapshot,
}

impl ImageInfo {
    pub fn uploaded_at(&self) -> Option<DateTime<Utc>> {
        epoch_to_utc(self.datetime)
    }
}

/// An image that has been published to the gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryImageInfo {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub datetime: i64,
    #[serde(rename = "type", deserialize_with = "null_as_empty")]
    pub mime_type: String,
    pub animated: bool,
    pub width: u32,
    pub height: u32,
    pub size: u64,
    pub views: u64,
    pub bandwidth: u64,
    pub deletehash: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub link: String,
    pub gifv: Option<String>,
    pub mp4: Option<String>,
    pub mp4_size: Option<u64>,
    pub looping: Option<bool>,
    pub vote: Option<String>,
    pub favorite: bool,
    pub nsfw: Option<bool>,
    pub comment_count: Option<u64>,
    pub topic: Option<String>,
    pub topic_id: Option<i64>,
    pub section: Option<String>,
    pub account_url: Option<String>,
    pub account_id: Option<i64>,
    pub ups: i64,
    pub downs: i64,
    /// Upvotes minus downvotes
    pub points: i64,
    /// Imgur popularity score
    pub score: i64,
    pub is_album: bool,
    pub in_most_viral: bool,
    #[serde(skip_deserializing)]
    pub quota: QuotaSnapshot,
}

impl GalleryImageInfo {
    pub fn uploaded_at(&self) -> Option<DateTime<Utc>> {
        epoch_to_utc(self.datetime)
    }
}

/// An album as returned by `album/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumInfo {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub datetime: i64,
    /// Image id of the album cover
    pub cover: Option<String>,
    pub cover_width: Option<u32>,
    pub cover_height: Option<u32>,
    pub account_url: Option<String>,
    pub account_id: Option<i64>,
    pub privacy: Option<String>,
    pub layout: Option<String>,
    pub views: u64,
    #[serde(deserialize_with = "null_as_empty")]
    pub link: String,
    pub favorite: bool,
    pub nsfw: Option<bool>,
    pub section: Option<String>,
    /// Position on the owner's album page
    pub order: i64,
    pub deletehash: Option<String>,
    pub images_count: u64,
    pub images: Vec<ImageInfo>,
    pub in_gallery: bool,
    #[serde(skip_deserializing)]
    pub quota: QuotaSnapshot,
}

impl AlbumInfo {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        epoch_to_utc(self.datetime)
    }
}

/// An album that has been published to the gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryAlbumInfo {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub datetime: i64,
    pub cover: Option<String>,
    pub cover_width: Option<u32>,
    pub cover_height: Option<u32>,
    pub account_url: Option<String>,
    pub account_id: Option<i64>,
    pub privacy: Option<String>,
    pub layout: Option<String>,
    pub views: u64,
    #[serde(deserialize_with = "null_as_empty")]
    pub link: String,
    pub ups: i64,
    pub downs: i64,
    pub points: i64,
    pub score: i64,
    pub is_album: bool,
    pub vote: Option<String>,
    pub favorite: bool,
    pub nsfw: Option<bool>,
    pub comment_count: Option<u64>,
    pub topic: Option<String>,
    pub topic_id: Option<i64>,
    pub images_count: u64,
    pub images: Vec<ImageInfo>,
    pub in_most_viral: bool,
    #[serde(skip_deserializing)]
    pub quota: QuotaSnapshot,
}

impl GalleryAlbumInfo {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        epoch_to_utc(self.datetime)
    }
}

/// Result of resolving a URL: exactly one kind of resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resource {
    Image(ImageInfo),
    Album(AlbumInfo),
    GalleryImage(GalleryImageInfo),
    GalleryAlbum(GalleryAlbumInfo),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Image(_) => ResourceKind::Image,
            Resource::Album(_) => ResourceKind::Album,
            Resource::GalleryImage(_) => ResourceKind::GalleryImage,
            Resource::GalleryAlbum(_) => ResourceKind::GalleryAlbum,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Resource::Image(info) => &info.id,
            Resource::Album(info) => &info.id,
            Resource::GalleryImage(info) => &info.id,
            Resource::GalleryAlbum(info) => &info.id,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Resource::Image(info) => info.title.as_deref(),
            Resource::Album(info) => info.title.as_deref(),
            Resource::GalleryImage(info) => info.title.as_deref(),
            Resource::GalleryAlbum(info) => info.title.as_deref(),
        }
    }

    pub fn link(&self) -> &str {
        match self {
            Resource::Image(info) => &info.link,
            Resource::Album(info) => &info.link,
            Resource::GalleryImage(info) => &info.link,
            Resource::GalleryAlbum(info) => &info.link,
        }
    }

    /// Quota observed by the call that produced this resource.
    pub fn quota(&self) -> &QuotaSnapshot {
        match self {
            Resource::Image(info) => &info.quota,
            Resource::Album(info) => &info.quota,
            Resource::GalleryImage(info) => &info.quota,
            Resource::GalleryAlbum(info) => &info.quota,
        }
    }
}

impl From<ImageInfo> for Resource {
    fn from(info: ImageInfo) -> Self {
        Resource::Image(info)
    }
}

impl From<AlbumInfo> for Resource {
    fn from(info: AlbumInfo) -> Self {
        Resource::Album(info)
    }
}

impl From<GalleryImageInfo> for Resource {
    fn from(info: GalleryImageInfo) -> Self {
        Resource::GalleryImage(info)
    }
}

impl From<GalleryAlbumInfo> for Resource {
    fn from(info: GalleryAlbumInfo) -> Self {
        Resource::GalleryAlbum(info)
    }
}

/// Attaches the quota observed for the request that produced a payload.
pub(crate) trait WithQuota {
    fn set_quota(&mut self, quota: QuotaSnapshot);
}

macro_rules! impl_with_quota {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WithQuota for $ty {
                fn set_quota(&mut self, quota: QuotaSnapshot) {
                    self.quota = quota;
                }
            }
        )*
    };
}

impl_with_quota!(ImageInfo, AlbumInfo, GalleryImageInfo, GalleryAlbumInfo);
