//! API route handlers.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use studio_core::{Template, TemplateSummary, ThumbnailDocument, ThumbnailRecord, VideoInfo};
use studio_export::{ExportFormat, ThumbnailExporter};

use crate::error::{ApiError, ApiResult};
use crate::generate::{GenerateRequest, GeneratedVariant};
use crate::{metrics, validation, AppState};

/// Request body for `POST /api/videos/info`.
#[derive(Debug, Deserialize)]
pub struct VideoInfoRequest {
    /// The video URL to look up.
    pub url: String,
}

/// Look up video metadata through the upstream media resolver.
#[tracing::instrument(name = "video_info", skip(state, request))]
pub async fn video_info(
    State(state): State<AppState>,
    Json(request): Json<VideoInfoRequest>,
) -> ApiResult<Json<VideoInfo>> {
    validation::validate_video_url(&request.url)?;
    let resolver = state
        .resolver
        .as_ref()
        .ok_or(ApiError::ResolverUnavailable)?;

    let result = resolver.video_info(request.url.trim()).await;
    metrics::record_video_lookup(result.is_ok());
    Ok(Json(result?))
}

/// Request body for `POST /api/thumbnails/download`.
#[derive(Debug, Deserialize)]
pub struct ThumbnailDownloadRequest {
    /// Video the thumbnail belongs to.
    pub video_id: String,
    /// Which thumbnail format to fetch.
    pub thumbnail_id: String,
}

/// Download one source thumbnail as raw image bytes.
#[tracing::instrument(name = "thumbnail_download", skip(state), fields(video_id = %request.video_id))]
pub async fn download_thumbnail(
    State(state): State<AppState>,
    Json(request): Json<ThumbnailDownloadRequest>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_media_id(&request.video_id)?;
    validation::validate_media_id(&request.thumbnail_id)?;
    let resolver = state
        .resolver
        .as_ref()
        .ok_or(ApiError::ResolverUnavailable)?;

    let result = resolver
        .download_thumbnail(&request.video_id, &request.thumbnail_id)
        .await;
    metrics::record_thumbnail_download(result.is_ok());
    let thumbnail = result?;

    let content_type = HeaderValue::from_str(&thumbnail.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    Ok(([(header::CONTENT_TYPE, content_type)], thumbnail.bytes))
}

/// Request body for `POST /api/thumbnails`.
#[derive(Debug, Deserialize)]
pub struct SaveThumbnailRequest {
    /// The document to persist.
    pub document: ThumbnailDocument,
    /// Source video, if the thumbnail was created from one.
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Response body for a successful save.
#[derive(Debug, Serialize)]
pub struct SaveThumbnailResponse {
    /// Store-assigned record ID.
    pub id: String,
}

/// Persist a thumbnail document.
#[tracing::instrument(name = "thumbnail_save", skip(state, request))]
pub async fn save_thumbnail(
    State(state): State<AppState>,
    Json(request): Json<SaveThumbnailRequest>,
) -> ApiResult<(StatusCode, Json<SaveThumbnailResponse>)> {
    validation::validate_document(&request.document)?;
    if let Some(video_id) = &request.video_id {
        validation::validate_media_id(video_id)?;
    }

    let id = state.store.save(request.document, request.video_id);
    metrics::record_save();
    tracing::info!("Saved thumbnail {id}");
    Ok((StatusCode::CREATED, Json(SaveThumbnailResponse { id })))
}

/// List saved thumbnails, newest first.
#[tracing::instrument(name = "thumbnail_list", skip(state))]
pub async fn list_thumbnails(State(state): State<AppState>) -> Json<Vec<ThumbnailRecord>> {
    Json(state.store.list())
}

/// Fetch one saved thumbnail.
#[tracing::instrument(name = "thumbnail_get", skip(state))]
pub async fn get_thumbnail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ThumbnailRecord>> {
    validation::validate_record_id(&id)?;
    state
        .store
        .get(&id)
        .map(Json)
        .ok_or(ApiError::NotFound("Thumbnail", id))
}

/// Delete one saved thumbnail.
#[tracing::instrument(name = "thumbnail_delete", skip(state))]
pub async fn delete_thumbnail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    validation::validate_record_id(&id)?;
    state.store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Request body for `POST /api/export`.
#[derive(Debug, Deserialize)]
pub struct ExportRequestBody {
    /// Requested output format; the export collaborator validates it.
    pub format: String,
    /// The document snapshot to rasterize.
    pub document: ThumbnailDocument,
}

/// Rasterize a document snapshot and return the bytes.
#[tracing::instrument(name = "export", skip(request), fields(format = %request.format))]
pub async fn export(Json(request): Json<ExportRequestBody>) -> ApiResult<impl IntoResponse> {
    let ExportRequestBody { format, document } = request;
    let parsed = ExportFormat::parse(&format)?;
    validation::validate_document(&document)?;

    // Rasterization is CPU-bound; keep it off the async workers
    let bytes = tokio::task::spawn_blocking(move || {
        ThumbnailExporter::with_defaults().export(&document, parsed)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("export task failed: {e}")))??;

    metrics::record_export(&format);
    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static(parsed.mime_type()))],
        bytes,
    ))
}

/// Query parameters for `GET /api/templates`.
#[derive(Debug, Deserialize)]
pub struct TemplatesQuery {
    /// Restrict the listing to one category.
    #[serde(default)]
    pub category: Option<String>,
}

/// List catalog templates, optionally filtered by category.
#[tracing::instrument(name = "templates_list", skip(state))]
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplatesQuery>,
) -> Json<Vec<TemplateSummary>> {
    Json(state.catalog.list(query.category.as_deref()))
}

/// Fetch one template with its document and variables.
#[tracing::instrument(name = "template_get", skip(state))]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Template>> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound("Template", id))
}

/// Response body for `POST /api/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// The generated style variants.
    pub variants: Vec<GeneratedVariant>,
}

/// Generate style variants for a title or video URL.
#[tracing::instrument(name = "generate", skip(state, request))]
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    let has_title = request
        .title
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty());
    let has_url = request
        .video_url
        .as_deref()
        .is_some_and(|u| !u.trim().is_empty());
    if !has_title && !has_url {
        return Err(ApiError::Validation(
            "Provide a video title or URL to generate thumbnails".to_string(),
        ));
    }
    if has_url {
        if let Some(url) = &request.video_url {
            validation::validate_video_url(url)?;
        }
    }

    let variants = state
        .generator
        .generate(request)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if let Some(first) = variants.first() {
        metrics::record_generation(&first.style);
    }
    Ok(Json(GenerateResponse { variants }))
}
