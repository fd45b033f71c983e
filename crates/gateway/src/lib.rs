//! HTTP shim for Brushwise.
//!
//! Wraps the keyword resolver, the practice critic and the community content
//! in a small JSON API. Every reply is held back by a configured delay so the
//! front end can show its "thinking" state.
//!
//! Built on Axum.

pub mod api;

use axum::extract::DefaultBodyLimit;
use axum::{Router, http::HeaderValue, response::Json, routing::get};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use brushwise_config::{AppConfig, LatencyConfig};
use brushwise_core::{Critic, Resolver};

/// Request bodies are a few short strings.
const BODY_LIMIT: usize = 64 * 1024;

/// Shared application state for the gateway. Immutable after startup.
pub struct GatewayState {
    pub resolver: Resolver,
    pub critic: Critic,
    pub latency: LatencyConfig,
}

pub type SharedState = Arc<GatewayState>;

impl GatewayState {
    pub fn new(resolver: Resolver, latency: LatencyConfig) -> Self {
        Self {
            resolver,
            critic: Critic::new(),
            latency,
        }
    }

    /// Hold the reply back for `millis` (scaled by the latency switch).
    pub async fn simulate_latency(&self, millis: u64) {
        let delay = self.latency.delay(millis);
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::api_router(state))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors_layer(cors_origins))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// CORS for the browser front end. No configured origins = any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let catalog = config.load_catalog()?;
    info!(
        contexts = catalog.contexts().count(),
        custom = config.catalog.path.is_some(),
        "Response catalog ready"
    );

    let state = Arc::new(GatewayState::new(
        Resolver::new(Arc::new(catalog)),
        config.latency.clone(),
    ));
    let app = build_router(state, &config.gateway.cors_origins);

    info!(addr = %addr, latency = config.latency.enabled, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C (and SIGTERM on unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, draining connections");
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
