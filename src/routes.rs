//! Route definitions and router setup
//!
//! Configures all API routes and middleware.

mod form;
mod migration;
mod response;

use crate::config::Settings;
use crate::state::SharedState;
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    // Build CORS layer
    let cors = build_cors_layer(settings);

    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(cors)
        .propagate_x_request_id();

    // Build the router
    Router::new()
        // Service endpoints
        .route("/", get(root_info))
        .route("/health", get(health_check))
        // Form CRUD
        .route("/api/forms", post(form::create_form).get(form::list_forms))
        .route(
            "/api/forms/{id}",
            get(form::get_form)
                .put(form::update_form)
                .delete(form::delete_form),
        )
        // Responses
        .route(
            "/api/forms/{id}/responses",
            get(response::list_form_responses),
        )
        .route("/api/submit", post(response::submit_response))
        // One-off admin migrations (not steady-state traffic)
        .route("/migrate-hero-image", post(migration::migrate_hero_image))
        .route(
            "/migrate-multi-language",
            post(migration::migrate_multi_language),
        )
        .route("/migrate-fields", post(migration::migrate_fields))
        // Apply middleware and state
        .layer(middleware)
        .with_state(state)
}

/// Build CORS layer from settings
///
/// With no configured origins the API is fully open: the public form pages
/// are served from arbitrary hosts.
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<_> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    }
}

/// Liveness probe
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "healthy"
    }))
}

/// Root info message
async fn root_info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "message": "Dynamic Form Creator API",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
