//! HTTP client for the upstream media resolver.
//!
//! The resolver is the external collaborator that turns a video URL into
//! [`VideoInfo`] and serves source thumbnail bytes. Failures are immediately
//! terminal: no retry, no backoff. When the resolver supplies an error
//! message it is surfaced verbatim; otherwise callers get a generic
//! fallback.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use studio_core::VideoInfo;

/// Fallback message when a video lookup fails without an upstream message.
const LOOKUP_FALLBACK: &str = "Failed to fetch video information";
/// Fallback message when a thumbnail download fails without an upstream message.
const DOWNLOAD_FALLBACK: &str = "Failed to download thumbnail";

/// Errors from resolver calls.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The resolver answered with an error payload; message is verbatim.
    #[error("{0}")]
    Upstream(String),

    /// The request itself failed (connect, timeout, TLS).
    #[error("Media resolver request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The resolver answered success but the body didn't parse.
    #[error("Malformed resolver response: {0}")]
    Malformed(String),
}

/// Error payload shape shared with the resolver.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// One downloaded source thumbnail.
#[derive(Debug, Clone)]
pub struct ThumbnailBytes {
    /// Raw image bytes.
    pub bytes: Vec<u8>,
    /// Content type reported by the resolver.
    pub content_type: String,
}

/// Client for the upstream media resolver.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    client: reqwest::Client,
    base: Url,
}

impl MediaResolver {
    /// Create a resolver client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        // A trailing slash keeps Url::join from eating the last path segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Ok(Self {
            client: reqwest::Client::new(),
            base: Url::parse(&normalized)?,
        })
    }

    /// Look up video metadata for a URL.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::Upstream`] with the resolver's message (or
    /// a generic fallback) on a non-success status,
    /// [`ResolverError::Transport`] if the request fails, or
    /// [`ResolverError::Malformed`] if a success body doesn't parse.
    pub async fn video_info(&self, video_url: &str) -> Result<VideoInfo, ResolverError> {
        let endpoint = self
            .base
            .join("resolve")
            .map_err(|e| ResolverError::Malformed(e.to_string()))?;

        let response = self
            .client
            .get(endpoint)
            .query(&[("url", video_url)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response, LOOKUP_FALLBACK).await);
        }

        response
            .json::<VideoInfo>()
            .await
            .map_err(|e| ResolverError::Malformed(e.to_string()))
    }

    /// Download one source thumbnail as raw image bytes.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::video_info`]; unknown video/thumbnail IDs
    /// come back as [`ResolverError::Upstream`] with the resolver's message.
    pub async fn download_thumbnail(
        &self,
        video_id: &str,
        thumbnail_id: &str,
    ) -> Result<ThumbnailBytes, ResolverError> {
        let endpoint = self
            .base
            .join(&format!("thumbnail/{video_id}/{thumbnail_id}"))
            .map_err(|e| ResolverError::Malformed(e.to_string()))?;

        let response = self.client.get(endpoint).send().await?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response, DOWNLOAD_FALLBACK).await);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(ThumbnailBytes {
            bytes,
            content_type,
        })
    }

    /// Extract the resolver's error message from a failed response.
    ///
    /// Uses the collaborator-supplied message when the body carries one,
    /// otherwise the given fallback.
    async fn upstream_error(response: reqwest::Response, fallback: &str) -> ResolverError {
        let message = response
            .json::<ErrorBody>()
            .await
            .map_or_else(|_| fallback.to_string(), |body| body.error);
        ResolverError::Upstream(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_trailing_slash() {
        let a = MediaResolver::new("http://127.0.0.1:9000").expect("resolver");
        let b = MediaResolver::new("http://127.0.0.1:9000/").expect("resolver");
        assert_eq!(a.base, b.base);
        assert_eq!(
            a.base.join("resolve").expect("join").as_str(),
            "http://127.0.0.1:9000/resolve"
        );
    }

    #[test]
    fn test_new_rejects_garbage() {
        assert!(MediaResolver::new("not a url").is_err());
    }
}
