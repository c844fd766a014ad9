//! Web upload server
//!
//! Small HTTP front-end around the valuation pipeline: serves a single-page
//! upload form, accepts multipart file uploads, and streams the generated
//! workbook back as a download. Run with `valuate-server`.

pub mod handlers;

use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Upload size cap. Earnings exports are small; anything larger is abuse.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upload page markup, embedded at compile time by the binary.
    pub index_html: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            index_html: "",
        }
    }
}

/// Build the application router.
pub fn build_router(config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    let index_html = config.index_html;

    Router::new()
        .route("/", get(move || handlers::index(index_html)))
        .route("/health", get(handlers::health))
        .route("/process", post(handlers::process))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the upload server until a shutdown signal arrives.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "valuate_server=info,tower_http=info".into()),
        )
        .init();

    let app = build_router(&config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("💿 Royalty DCF server starting on http://{}", addr);
    info!("   Upload form: /  Process: POST /process  Health: /health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Royalty DCF server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
