//! Loopback static file server for the site build output.

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::errors::JobError;

/// Serves `root` as static files. Directory requests resolve to `index.html`.
pub fn build_router(root: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root))
        .layer(TraceLayer::new_for_http())
}

/// A running server bound to 127.0.0.1. Must be stopped with [`StaticServer::shutdown`].
pub struct StaticServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl StaticServer {
    /// Binds `127.0.0.1:<port>` and starts serving. Port 0 picks a free port.
    pub async fn start(root: &Path, port: u16) -> Result<Self, JobError> {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| JobError::Server(format!("could not bind {addr}: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| JobError::Server(e.to_string()))?;

        let app = build_router(root);
        let (shutdown, signal) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = signal.await;
                })
                .await
        });

        info!("Running PDF generation server on http://{addr}");
        Ok(Self {
            addr,
            shutdown,
            task,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stops accepting connections and waits for the server task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        match self.task.await {
            Ok(Ok(())) => info!("Server closed."),
            Ok(Err(err)) => warn!("Server exited with error: {err}"),
            Err(err) => warn!("Server task failed: {err}"),
        }
    }
}
