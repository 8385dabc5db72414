//! API route modules
//!
//! # Structure
//!
//! - [`orders`] - order lifecycle endpoints
//! - [`notifications`] - recent-notification polling
//! - [`health`] - health check
//!
//! All routes share permissive CORS and request tracing.

pub mod health;
pub mod notifications;
pub mod orders;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::ServerState;

/// Build the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(orders::router())
        .merge(notifications::router())
        .merge(health::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
