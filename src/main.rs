use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use enquiry_dashboard_api::config::Config;
use enquiry_dashboard_api::db::EnquiryStore;
use enquiry_dashboard_api::handlers::{self, AppState};

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration, opens the document store, wires
/// the report routes, and serves until interrupted. The store client is closed
/// explicitly after the server drains.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "enquiry_dashboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Open the document store; fails fast if the server is unreachable
    let store = Arc::new(EnquiryStore::connect(&config.mongodb_uri, &config.database_name).await?);
    tracing::info!("Document store connected: {}", config.database_name);

    let app_state = Arc::new(AppState {
        store: Arc::clone(&store),
    });

    let app = Router::new()
        .route("/", get(handlers::health))
        .route("/api/transcripts", get(handlers::list_transcripts))
        .route("/api/enquiries", get(handlers::daily_enquiries))
        .route("/api/models", get(handlers::model_breakdown))
        .route("/api/leaderboard/regions", get(handlers::region_leaderboard))
        .route("/api/categories", get(handlers::category_breakdown))
        .route("/api/sales-enquiries", get(handlers::sales_vs_enquiries))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Document store connection closed");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
