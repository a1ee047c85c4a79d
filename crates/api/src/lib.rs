//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Image upload and delivery redirect routes
//! - Health check route
//! - Error to response mapping

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use imgvault_core::storage::ObjectStore;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Object storage the uploads are written to.
    pub storage: Arc<dyn ObjectStore>,
    /// CDN base URL used to build delivery URLs.
    pub delivery_base_url: Arc<str>,
}

impl AppState {
    /// Create application state.
    pub fn new(storage: Arc<dyn ObjectStore>, delivery_base_url: impl Into<Arc<str>>) -> Self {
        Self {
            storage,
            delivery_base_url: delivery_base_url.into(),
        }
    }
}

/// Creates the main application router.
///
/// `max_upload_bytes` caps request bodies; `None` lifts axum's default
/// limit entirely so uploads of any size are buffered.
pub fn create_router(state: AppState, max_upload_bytes: Option<usize>) -> Router {
    let body_limit = max_upload_bytes.map_or_else(DefaultBodyLimit::disable, DefaultBodyLimit::max);

    Router::new()
        .merge(routes::api_routes())
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
