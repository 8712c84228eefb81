//! # Thumb Studio Server
//!
//! Local embedded API server for the Thumb Studio editor.
//! Binds to localhost only for security.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Router,
};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use studio_core::ThumbnailStore;
use studio_server::{build_router, metrics, AppState, MediaResolver};

/// Default port for the studio server.
const DEFAULT_PORT: u16 = 8462; // "THMB" on a phone keypad

/// Command-line arguments, each with an environment fallback.
#[derive(Debug, Parser)]
#[command(name = "thumbstudio", version, about = "Thumb Studio API server")]
struct Args {
    /// Port to listen on (localhost only).
    #[arg(long, env = "STUDIO_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory for persisted thumbnails; in-memory only when absent.
    #[arg(long, env = "STUDIO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Base URL of the upstream media resolver.
    #[arg(long, env = "STUDIO_RESOLVER_URL")]
    resolver_url: Option<String>,
}

/// Build a CORS layer that only allows localhost origins.
///
/// The server is designed to run on the creator's machine; requests from
/// anywhere else are rejected.
fn build_cors_layer(port: u16) -> CorsLayer {
    let localhost_origins = [
        format!("http://localhost:{port}"),
        format!("http://127.0.0.1:{port}"),
        // Common dev-server ports
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(), // Vite
        "http://127.0.0.1:3000".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ];

    let origins: Vec<HeaderValue> = localhost_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default:
/// info,studio_server=debug,tower_http=debug). Set `RUST_LOG_FORMAT=json`
/// for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,studio_server=debug,tower_http=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let metrics_handle = metrics::init_metrics()
        .map_err(|e| anyhow::anyhow!("Failed to initialize Prometheus metrics: {e}"))?;
    tracing::info!("Prometheus metrics initialized");

    let store = match &args.data_dir {
        Some(dir) => {
            let store = ThumbnailStore::with_data_dir(dir)?;
            let loaded = store.load_all()?;
            tracing::info!(
                "Loaded {} persisted thumbnails from {}",
                loaded.len(),
                dir.display()
            );
            store
        }
        None => ThumbnailStore::new(),
    };

    let resolver = match &args.resolver_url {
        Some(url) => {
            let resolver =
                MediaResolver::new(url).map_err(|e| anyhow::anyhow!("Invalid resolver URL: {e}"))?;
            tracing::info!("Media resolver configured at {url}");
            Some(resolver)
        }
        None => {
            tracing::warn!(
                "No media resolver configured; video lookup and thumbnail download are disabled"
            );
            None
        }
    };

    let state = AppState::new(store, resolver);

    // Metrics router carries its own state (the Prometheus handle)
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let app = build_router(state)
        .merge(metrics_router)
        // Request ID for tracing correlation
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        // CORS restricted to localhost only
        .layer(build_cors_layer(args.port))
        // Structured request tracing with timing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    // Bind to localhost ONLY
    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Thumb Studio server starting on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Prometheus metrics endpoint.
#[tracing::instrument(name = "metrics", skip(handle))]
async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}
