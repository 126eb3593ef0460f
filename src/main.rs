//! Pagemill Server
//!
//! Single-endpoint document ingestion and OCR service. Uploads land under
//! the dataset directory, results under the output directory; see `config`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagemill_server::config::Config;
use pagemill_server::extract::{LopdfTextExtractor, PdftoppmRasterizer};
use pagemill_server::ocr::TesseractEngine;
use pagemill_server::processor::DocumentProcessor;
use pagemill_server::routes;
use pagemill_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagemill_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Starting Pagemill Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Dataset dir: {}", config.storage.dataset_dir.display());
    tracing::info!("Output dir: {}", config.storage.output_dir.display());

    // Filesystem layout is the only persistent state
    tokio::fs::create_dir_all(&config.storage.dataset_dir)
        .await
        .context("Failed to create dataset directory")?;
    tokio::fs::create_dir_all(&config.storage.output_dir)
        .await
        .context("Failed to create output directory")?;

    if !PdftoppmRasterizer::is_available() {
        tracing::warn!("pdftoppm not found; scanned PDF uploads will fail (install poppler-utils)");
    }
    if !TesseractEngine::is_available() {
        tracing::warn!("tesseract not found; OCR uploads will fail (install tesseract-ocr)");
    }

    // Wire the production extraction backends
    let processor = DocumentProcessor::new(
        Arc::new(LopdfTextExtractor::new()),
        Arc::new(PdftoppmRasterizer::new(config.ocr.dpi)),
        Arc::new(TesseractEngine::new(&config.ocr.language)),
    );
    let app_state = AppState::new(config.clone(), processor);

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Pagemill Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind server address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
