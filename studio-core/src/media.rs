//! Wire types for the video-lookup and thumbnail-download collaborators.

use serde::{Deserialize, Serialize};

/// Quality tier of a source thumbnail, as reported by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailQuality {
    /// 120p default thumbnail.
    Lowest,
    /// 180p thumbnail.
    Low,
    /// 360p thumbnail.
    Medium,
    /// 480p thumbnail.
    High,
    /// 720p thumbnail.
    Hd,
    /// 1080p thumbnail.
    Maxres,
}

impl ThumbnailQuality {
    /// Display label for this tier, e.g. `"720p"` for [`Self::Hd`].
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Lowest => "120p",
            Self::Low => "180p",
            Self::Medium => "360p",
            Self::High => "480p",
            Self::Hd => "720p",
            Self::Maxres => "1080p",
        }
    }
}

impl std::fmt::Display for ThumbnailQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One downloadable source thumbnail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailFormat {
    /// Resolver-assigned identifier.
    pub id: String,
    /// Direct image URL.
    pub url: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Quality tier.
    pub quality: ThumbnailQuality,
    /// File extension, e.g. "jpg" or "webp".
    pub ext: String,
}

/// One downloadable video format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFormat {
    /// Resolver-assigned identifier.
    pub format_id: String,
    /// Container/codec description.
    pub format: String,
    /// Quality description, e.g. "1080p".
    pub quality: String,
    /// File extension.
    pub ext: String,
    /// Resolution string, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// Exact file size in bytes, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    /// Approximate file size in bytes, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize_approx: Option<u64>,
}

/// Metadata for one looked-up video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Video identifier.
    pub id: String,
    /// Video title.
    pub title: String,
    /// Primary thumbnail URL.
    pub thumbnail: String,
    /// Duration string as supplied by the resolver.
    pub duration: String,
    /// View-count string as supplied by the resolver.
    pub views: String,
    /// Downloadable video formats.
    pub formats: Vec<VideoFormat>,
    /// Downloadable thumbnail formats.
    pub thumbnails: Vec<ThumbnailFormat>,
}
