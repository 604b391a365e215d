//! API Module
//!
//! HTTP layer for the build service: JSON endpoints under `/api`, static
//! serving of finished artifacts under `/isos`, and the frontend under
//! `/app` with an index.html fallback for client-side routes.

pub mod error;
pub mod health;
pub mod iso;

use std::sync::Arc;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::repository::ImageStore;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: ImageStore,
}

/// Create the main router with all endpoints
pub fn create_router(config: Arc<Config>, store: ImageStore) -> Router {
    let frontend = ServeDir::new(&config.frontend_dir)
        .fallback(ServeFile::new(config.frontend_dir.join("index.html")));
    let artifacts = ServeDir::new(&config.image_dir);

    let state = AppState { config, store };

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Build job endpoints
        .route("/api/generate-iso", post(iso::generate_iso))
        .route("/api/logs", get(iso::list_jobs))
        .route("/api/progress/{iso_name}", get(iso::get_progress))
        .route("/api/download/{iso_name}", get(iso::resolve_download))
        // Finished artifacts
        .nest_service("/isos", artifacts)
        // Frontend, with fallback for client-side routing
        .route("/", get(|| async { Redirect::to("/app") }))
        .nest_service("/app", frontend)
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
