//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, CORS, request ID)
//! - Resolve Ghostscript once at startup and share it with handlers
//! - Serve until a shutdown signal arrives, then drain gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::compress::{Compressor, Ghostscript};
use crate::config::schema::CorsConfig;
use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::lifecycle::{signals, Shutdown};

/// Slack on top of the configured upload limit so multipart framing never
/// pushes a maximum-size file over the transport cap.
const BODY_LIMIT_SLACK_BYTES: u64 = 4 * 1024 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Absent when no Ghostscript binary was found at startup; the server
    /// still runs and `/compress` reports the missing tool per request.
    pub engine: Option<Arc<Compressor>>,
}

/// HTTP server for the compression service.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server, probing `PATH` for Ghostscript.
    pub fn new(config: AppConfig) -> Self {
        let gs = Ghostscript::discover();
        if gs.is_none() {
            tracing::warn!(
                candidates = ?crate::compress::ghostscript::BINARY_CANDIDATES,
                "Ghostscript not found on PATH; compression requests will fail"
            );
        }
        Self::with_ghostscript(config, gs)
    }

    /// Create a server with an explicit Ghostscript resolution. Used by
    /// tests to pin or withhold the binary.
    pub fn with_ghostscript(config: AppConfig, gs: Option<Ghostscript>) -> Self {
        let engine = gs.map(|gs| {
            tracing::info!(path = %gs.path().display(), "Ghostscript resolved");
            Arc::new(Compressor::new(gs, config.compression.clone()))
        });

        let state = AppState {
            config: Arc::new(config.clone()),
            engine,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let body_cap = config.limits.max_upload_bytes() + BODY_LIMIT_SLACK_BYTES;

        Router::new()
            .route("/health", get(handlers::health))
            .route("/compress", post(handlers::compress))
            .layer(DefaultBodyLimit::max(body_cap as usize))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.cors))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let shutdown = Shutdown::new();
        let mut drain = shutdown.subscribe();
        tokio::spawn(async move {
            signals::shutdown_signal().await;
            shutdown.trigger();
        });

        let app = self.router.into_make_service();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = drain.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials)
}
