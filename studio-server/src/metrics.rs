//! Prometheus metrics for studio-server.
//!
//! Provides metrics collection and a Prometheus-compatible `/metrics`
//! endpoint.

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// Metric names as constants for consistency
const VIDEO_LOOKUPS_TOTAL: &str = "studio_video_lookups_total";
const THUMBNAIL_DOWNLOADS_TOTAL: &str = "studio_thumbnail_downloads_total";
const THUMBNAIL_SAVES_TOTAL: &str = "studio_thumbnail_saves_total";
const EXPORTS_TOTAL: &str = "studio_exports_total";
const GENERATIONS_TOTAL: &str = "studio_generations_total";
const VALIDATION_FAILURES_TOTAL: &str = "studio_validation_failures_total";

/// Initialize metrics and return the Prometheus handle.
///
/// # Errors
///
/// Returns an error if the Prometheus recorder cannot be installed
/// (e.g., if another recorder is already installed).
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record a video lookup.
pub fn record_video_lookup(success: bool) {
    counter!(
        VIDEO_LOOKUPS_TOTAL,
        "success" => success.to_string()
    )
    .increment(1);
}

/// Record a source thumbnail download.
pub fn record_thumbnail_download(success: bool) {
    counter!(
        THUMBNAIL_DOWNLOADS_TOTAL,
        "success" => success.to_string()
    )
    .increment(1);
}

/// Record a thumbnail save.
pub fn record_save() {
    counter!(THUMBNAIL_SAVES_TOTAL).increment(1);
}

/// Record an export.
///
/// # Arguments
///
/// * `format` - Requested export format (png, jpeg, svg)
pub fn record_export(format: &str) {
    counter!(
        EXPORTS_TOTAL,
        "format" => format.to_string()
    )
    .increment(1);
}

/// Record a generation run.
///
/// # Arguments
///
/// * `style` - Style preset used
pub fn record_generation(style: &str) {
    counter!(
        GENERATIONS_TOTAL,
        "style" => style.to_string()
    )
    .increment(1);
}

/// Record an input validation failure.
///
/// # Arguments
///
/// * `validation_type` - Type of validation that failed (video_url, media_id, ...)
pub fn record_validation_failure(validation_type: &str) {
    counter!(
        VALIDATION_FAILURES_TOTAL,
        "type" => validation_type.to_string()
    )
    .increment(1);
}
