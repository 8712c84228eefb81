//! Test server harness for integration tests.
//!
//! Spins up the real router on a random port so tests exercise the same
//! code path the binary serves.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use studio_core::ThumbnailStore;
use studio_server::{build_router, AppState, MediaResolver};

/// A test server instance with control handles.
pub struct TestServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with no media resolver configured.
    #[allow(dead_code)]
    pub async fn start() -> Self {
        Self::start_with_resolver(None).await
    }

    /// Start a test server, optionally pointing its resolver at `url`.
    #[allow(dead_code)]
    pub async fn start_with_resolver(resolver_url: Option<&str>) -> Self {
        Self::start_with(ThumbnailStore::new(), resolver_url).await
    }

    /// Start a test server over an existing store.
    #[allow(dead_code)]
    pub async fn start_with_store(store: ThumbnailStore) -> Self {
        Self::start_with(store, None).await
    }

    /// Start a test server with full control over store and resolver.
    ///
    /// # Panics
    ///
    /// Panics if no port is available or the server fails to bind.
    pub async fn start_with(store: ThumbnailStore, resolver_url: Option<&str>) -> Self {
        let port = portpicker::pick_unused_port().expect("no available port");
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let resolver = resolver_url.map(|url| MediaResolver::new(url).expect("resolver url"));
        let state = AppState::new(store, resolver);
        let app = build_router(state);

        let listener = TcpListener::bind(addr).await.expect("failed to bind");
        let actual_addr = listener.local_addr().expect("failed to get local addr");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("server error");
        });

        // Give the server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Self {
            addr: actual_addr,
            shutdown_tx: Some(shutdown_tx),
            handle,
        }
    }

    /// Absolute URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Gracefully shut down the server.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}
