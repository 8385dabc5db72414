//! Order API handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use shared::order::{Order, OrderDraft, OrderStatus};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// List all orders
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.processor().list().await?;
    Ok(Json(orders))
}

/// Create a new order
pub async fn create(
    State(state): State<ServerState>,
    Json(draft): Json<OrderDraft>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.processor().create(&draft).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .processor()
        .get(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    Ok(Json(order))
}

/// Status update request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// Update order status
///
/// The status value is checked against the enum before the processor is
/// reached; a missing or unknown value is a 400.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let raw = payload
        .status
        .ok_or_else(|| AppError::validation("Status field is required"))?;
    let status =
        OrderStatus::from_str(&raw).map_err(|e| AppError::validation(e.to_string()))?;

    let order = state.processor().update_status(&id, status).await?;
    Ok(Json(order))
}

/// Deletion confirmation body
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Delete an order
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteConfirmation>> {
    state.processor().delete(&id).await?;
    Ok(Json(DeleteConfirmation {
        message: "Order deleted successfully".to_string(),
    }))
}

/// Get the mirrored document for an order
pub async fn get_document(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let document = state.processor().get_document(&id).await.map_err(|e| {
        if e.is_not_found() {
            AppError::not_found(format!("Document not found for order {id}"))
        } else {
            AppError::from(e)
        }
    })?;
    Ok(Json(document))
}
