use crate::config::CatalogConfig;
use crate::handlers;
use crate::services::{record_catalog_size, Catalog};
use axum::{middleware::from_fn, routing::get, Router};
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Base URL encoded into item QR codes.
    pub public_url: Arc<str>,
}

impl AppState {
    pub fn new(catalog: Catalog, public_url: impl Into<Arc<str>>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            public_url: public_url.into(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route("/api/items/:id", get(handlers::get_item))
        .route("/api/items/:id/qr", get(handlers::get_item_qr))
        .route("/api/items/:id/card", get(handlers::get_item_card))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost so the span above sees the assigned id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: ServerFuture,
    state: AppState,
}

impl Application {
    /// Load the catalog, then bind the listener.
    ///
    /// A catalog that cannot be read or parsed aborts the build before any
    /// socket is opened.
    pub async fn build(config: CatalogConfig) -> anyhow::Result<Self> {
        let catalog = Catalog::load(&config.catalog.path).map_err(|e| {
            tracing::error!("Failed to load catalog: {}", e);
            e
        })?;
        record_catalog_size(catalog.len());

        let state = AppState::new(catalog, config.catalog.public_url.as_str());
        let app = build_router(state.clone());

        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
        })?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Server running at http://{}", local_addr);

        let server = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .into_future();

        Ok(Self {
            port: local_addr.port(),
            server: Box::pin(server),
            state,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.state.catalog
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
