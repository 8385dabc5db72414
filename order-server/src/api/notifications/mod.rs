//! Notification polling route
//!
//! Serves the most recent lifecycle notifications so clients without a bus
//! subscription can poll for changes.

use axum::{Json, Router, extract::State, routing::get};

use shared::event::OrderNotification;

use crate::core::ServerState;

/// Notification router
pub fn router() -> Router<ServerState> {
    Router::new().route("/notifications", get(recent))
}

/// Recent notifications, newest first
async fn recent(State(state): State<ServerState>) -> Json<Vec<OrderNotification>> {
    Json(state.recent_notifications())
}
