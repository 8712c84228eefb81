//! Input validation for untrusted data.
//!
//! All user-supplied input MUST be validated before use. This module
//! provides validators for the request fields the API accepts.

use thiserror::Error;

use studio_core::ThumbnailDocument;

/// Maximum length for video URLs.
pub const MAX_VIDEO_URL_LEN: usize = 2048;
/// Maximum length for resolver-assigned IDs (video and thumbnail IDs).
pub const MAX_MEDIA_ID_LEN: usize = 64;
/// Maximum length for record IDs (UUIDs are 36 chars).
pub const MAX_RECORD_ID_LEN: usize = 64;
/// Maximum length for thumbnail titles.
pub const MAX_TITLE_LEN: usize = 256;
/// Maximum text content length in elements.
pub const MAX_TEXT_CONTENT_LEN: usize = 10_000;
/// Maximum elements per document.
pub const MAX_ELEMENTS_PER_DOCUMENT: usize = 500;

/// Validation error types.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Video URL exceeds maximum length.
    #[error("video URL too long (max {MAX_VIDEO_URL_LEN} chars)")]
    VideoUrlTooLong,
    /// Video URL is empty or not an http(s) URL.
    #[error("please enter a valid video URL")]
    VideoUrlInvalid,
    /// Media ID exceeds maximum length.
    #[error("media id too long (max {MAX_MEDIA_ID_LEN} chars)")]
    MediaIdTooLong,
    /// Media ID is empty or contains invalid characters.
    #[error("media id contains invalid characters")]
    MediaIdInvalidChars,
    /// Record ID exceeds maximum length.
    #[error("record id too long (max {MAX_RECORD_ID_LEN} chars)")]
    RecordIdTooLong,
    /// Record ID is empty or contains invalid characters.
    #[error("record id contains invalid characters")]
    RecordIdInvalidChars,
    /// Title exceeds maximum length.
    #[error("title too long (max {MAX_TITLE_LEN} chars)")]
    TitleTooLong,
    /// Element text content exceeds maximum length.
    #[error("element text too long (max {MAX_TEXT_CONTENT_LEN} bytes)")]
    TextContentTooLong,
    /// Too many elements in the document.
    #[error("too many elements (max {MAX_ELEMENTS_PER_DOCUMENT})")]
    TooManyElements,
}

impl ValidationError {
    /// Short tag for metrics labels.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::VideoUrlTooLong | Self::VideoUrlInvalid => "video_url",
            Self::MediaIdTooLong | Self::MediaIdInvalidChars => "media_id",
            Self::RecordIdTooLong | Self::RecordIdInvalidChars => "record_id",
            Self::TitleTooLong => "title",
            Self::TextContentTooLong => "text_content",
            Self::TooManyElements => "element_count",
        }
    }
}

/// Check if a character is valid for IDs (alphanumeric, hyphen, or underscore).
fn is_valid_id_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Validate a user-supplied video URL.
///
/// Valid URLs are non-empty, at most [`MAX_VIDEO_URL_LEN`] chars, and parse
/// as http or https.
///
/// # Errors
///
/// Returns [`ValidationError::VideoUrlTooLong`] or
/// [`ValidationError::VideoUrlInvalid`].
pub fn validate_video_url(raw: &str) -> Result<(), ValidationError> {
    if raw.len() > MAX_VIDEO_URL_LEN {
        return Err(ValidationError::VideoUrlTooLong);
    }
    let parsed = url::Url::parse(raw.trim()).map_err(|_| ValidationError::VideoUrlInvalid)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::VideoUrlInvalid);
    }
    Ok(())
}

/// Validate a resolver-assigned media ID (video or thumbnail ID).
///
/// # Errors
///
/// Returns [`ValidationError::MediaIdTooLong`] if the ID exceeds the limit.
/// Returns [`ValidationError::MediaIdInvalidChars`] if the ID is empty or
/// contains invalid characters.
pub fn validate_media_id(id: &str) -> Result<(), ValidationError> {
    if id.len() > MAX_MEDIA_ID_LEN {
        return Err(ValidationError::MediaIdTooLong);
    }
    if id.is_empty() || !id.chars().all(is_valid_id_char) {
        return Err(ValidationError::MediaIdInvalidChars);
    }
    Ok(())
}

/// Validate a store record ID.
///
/// # Errors
///
/// Returns [`ValidationError::RecordIdTooLong`] if the ID exceeds the limit.
/// Returns [`ValidationError::RecordIdInvalidChars`] if the ID is empty or
/// contains invalid characters.
pub fn validate_record_id(id: &str) -> Result<(), ValidationError> {
    if id.len() > MAX_RECORD_ID_LEN {
        return Err(ValidationError::RecordIdTooLong);
    }
    if id.is_empty() || !id.chars().all(is_valid_id_char) {
        return Err(ValidationError::RecordIdInvalidChars);
    }
    Ok(())
}

/// Validate a document before saving or exporting it.
///
/// # Errors
///
/// Returns [`ValidationError::TitleTooLong`],
/// [`ValidationError::TooManyElements`], or
/// [`ValidationError::TextContentTooLong`] when a limit is exceeded.
pub fn validate_document(doc: &ThumbnailDocument) -> Result<(), ValidationError> {
    if doc.metadata.title.len() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    if doc.element_count() > MAX_ELEMENTS_PER_DOCUMENT {
        return Err(ValidationError::TooManyElements);
    }
    for element in &doc.elements {
        if element.content().is_some_and(|c| c.len() > MAX_TEXT_CONTENT_LEN) {
            return Err(ValidationError::TextContentTooLong);
        }
    }
    Ok(())
}
