//! FormFlow API - Dynamic Form Creator
//!
//! CRUD backend for a dynamic form builder: admins define form schemas
//! (fields, labels, validation rules) and end users submit phone-keyed
//! responses against them.
//!
//! Text values come in two generations: legacy rows store bare strings,
//! current rows store per-language maps. The API accepts and serves both
//! shapes; the /migrate-* admin endpoints rewrite old stores in place.

mod config;
mod db;
mod error;
mod models;
mod routes;
mod state;

use crate::config::Settings;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("🚀 Starting FormFlow - Dynamic Form Creator API...");

    // Load configuration; missing database variables are fatal
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("❌ FATAL: {}", e);
            error!("Set DATABASE_URL or all of DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME");
            anyhow::bail!("invalid configuration: {}", e);
        }
    };
    info!("📋 Configuration loaded successfully");

    // Initialize database pool - REQUIRED (no degraded-mode startup)
    let pool = match db::connect(&settings.database).await {
        Ok(pool) => {
            info!("✅ Database pool created successfully");
            pool
        }
        Err(e) => {
            error!("❌ FATAL: Failed to initialize database pool: {}", e);
            anyhow::bail!("cannot start server without a database connection");
        }
    };

    // Create tables if they don't exist
    if let Err(e) = bootstrap_schema(&pool).await {
        warn!("⚠️  Warning creating tables: {}", e);
    }

    let state = Arc::new(AppState::new(pool));

    // Build the router
    let app = create_router(state, &settings);

    // Create socket address
    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📚 API Endpoints:");
    info!("   ─── Forms ───");
    info!("   POST   /api/forms                - Create a new form");
    info!("   GET    /api/forms                - List forms (paginated)");
    info!("   GET    /api/forms/:id            - Get a specific form");
    info!("   PUT    /api/forms/:id            - Replace an existing form");
    info!("   DELETE /api/forms/:id            - Soft-delete a form");
    info!("");
    info!("   ─── Responses ───");
    info!("   POST   /api/submit               - Submit a form response");
    info!("   GET    /api/forms/:id/responses  - List responses for a form");
    info!("");
    info!("   ─── Admin Migrations ───");
    info!("   POST   /migrate-hero-image       - Widen hero image column");
    info!("   POST   /migrate-multi-language   - Add response language column");
    info!("   POST   /migrate-fields           - Rewrite legacy field text shapes");
    info!("");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,formflow_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Create application tables if they don't exist.
///
/// Stores created before the multi-language rollout are instead upgraded
/// through the /migrate-* admin endpoints.
async fn bootstrap_schema(pool: &deadpool_postgres::Pool) -> anyhow::Result<()> {
    let client = pool.get().await?;

    client.execute(db::queries::CREATE_FORMS_TABLE, &[]).await?;
    client
        .execute(db::queries::CREATE_RESPONSES_TABLE, &[])
        .await?;

    // Index for the per-form response listing
    let _ = client
        .execute(db::queries::CREATE_RESPONSES_FORM_ID_INDEX, &[])
        .await;

    info!("✅ Database tables initialized");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
