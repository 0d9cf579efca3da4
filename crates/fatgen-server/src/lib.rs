//! HTTP surface for FAT procedure generation.
//!
//! Three routes, no state beyond injected collaborators: `POST /generate`
//! (extract + compliance pass), `POST /generate-pdf` (render), `GET /health`.
//! Each request owns its document end to end; nothing is persisted.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Service identifier reported by the health probe.
pub const SERVICE_NAME: &str = "fatgen";

/// Builds the application router. CORS is passed in because the allow-list is
/// deployment configuration, not routing.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/generate", post(routes::generate))
        .route("/generate-pdf", post(routes::generate_pdf))
        .route("/health", get(routes::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
