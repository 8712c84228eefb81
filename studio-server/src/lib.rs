//! # Thumb Studio Server Library
//!
//! Shared state and router assembly for the studio server.
//! This library is used by both the binary and integration tests.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use studio_core::ThumbnailStore;

pub mod catalog;
pub mod error;
pub mod generate;
pub mod health;
pub mod metrics;
pub mod resolver;
pub mod routes;
pub mod validation;

pub use catalog::TemplateCatalog;
pub use error::{ApiError, ApiResult};
pub use resolver::MediaResolver;

use generate::{StylePresetGenerator, ThumbnailGenerator};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Saved-thumbnail store.
    pub store: ThumbnailStore,
    /// Read-only template catalog.
    pub catalog: Arc<TemplateCatalog>,
    /// Upstream media resolver, when configured.
    pub resolver: Option<MediaResolver>,
    /// Thumbnail generation seam.
    pub generator: Arc<dyn ThumbnailGenerator>,
}

impl AppState {
    /// Build state with the built-in catalog and preset generator.
    #[must_use]
    pub fn new(store: ThumbnailStore, resolver: Option<MediaResolver>) -> Self {
        Self {
            store,
            catalog: Arc::new(TemplateCatalog::builtin()),
            resolver,
            generator: Arc::new(StylePresetGenerator),
        }
    }

    /// Replace the generator implementation.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn ThumbnailGenerator>) -> Self {
        self.generator = generator;
        self
    }
}

/// Assemble the API router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints (container probes)
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::readiness)) // Backward compatible
        // Media resolver proxies
        .route("/api/videos/info", post(routes::video_info))
        .route("/api/thumbnails/download", post(routes::download_thumbnail))
        // Saved thumbnails
        .route(
            "/api/thumbnails",
            post(routes::save_thumbnail).get(routes::list_thumbnails),
        )
        .route(
            "/api/thumbnails/{id}",
            get(routes::get_thumbnail).delete(routes::delete_thumbnail),
        )
        // Export collaborator
        .route("/api/export", post(routes::export))
        // Template catalog
        .route("/api/templates", get(routes::list_templates))
        .route("/api/templates/{id}", get(routes::get_template))
        // Generation
        .route("/api/generate", post(routes::generate))
        .with_state(state)
}
