//! HTTP surface tests via in-process router calls
//!
//! Drives the axum router with `tower::ServiceExt::oneshot` and asserts
//! the status-code mapping and response shapes of every endpoint.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use order_server::{Config, ServerState, api};

async fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config).await.unwrap();
    state.start_background_tasks();
    (api::router(state), dir)
}

fn valid_payload() -> Value {
    json!({
        "customer_id": "CUST-1",
        "customer_name": "Ada Lovelace",
        "items": [
            {"product_id": "P-1", "name": "Widget", "quantity": 3, "price": 10.50},
            {"product_id": "P-2", "name": "Gadget", "quantity": 1, "price": 5.00}
        ]
    })
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_order(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/orders", valid_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn create_returns_201_with_derived_fields() {
    let (app, _dir) = test_app().await;

    let order = create_order(&app).await;
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["customer_id"], "CUST-1");
    assert_eq!(order["total_amount"].as_f64(), Some(36.5));
    assert_eq!(order["items"][0]["total"].as_f64(), Some(31.5));
    assert!(order["order_id"].as_str().unwrap().starts_with("ORD-"));
    assert!(order["created_at"].is_string());
}

#[tokio::test]
async fn create_rejects_bad_payload_with_400() {
    let (app, _dir) = test_app().await;

    let mut payload = valid_payload();
    payload["items"] = json!([]);
    let response = app
        .clone()
        .oneshot(json_request("POST", "/orders", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Order must contain at least one item");

    let mut payload = valid_payload();
    payload.as_object_mut().unwrap().remove("customer_id");
    let response = app
        .clone()
        .oneshot(json_request("POST", "/orders", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing required field: customer_id");
}

#[tokio::test]
async fn get_by_id_round_trips_and_unknown_is_404() {
    let (app, _dir) = test_app().await;
    let order = create_order(&app).await;
    let id = order["order_id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/orders/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["order_id"], *id);

    let response = app
        .clone()
        .oneshot(get_request("/orders/ORD-ffffffff"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn list_returns_all_orders() {
    let (app, _dir) = test_app().await;
    create_order(&app).await;
    create_order(&app).await;

    let response = app.clone().oneshot(get_request("/orders")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn patch_status_validates_before_reaching_the_processor() {
    let (app, _dir) = test_app().await;
    let order = create_order(&app).await;
    let id = order["order_id"].as_str().unwrap().to_string();

    // Missing status field
    let response = app
        .clone()
        .oneshot(json_request("PATCH", &format!("/orders/{id}/status"), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Status field is required");

    // Unknown status value
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/orders/{id}/status"),
            json!({"status": "SHIPPED"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Valid transition
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/orders/{id}/status"),
            json!({"status": "PROCESSING"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], "PROCESSING");
    assert_eq!(updated["total_amount"].as_f64(), Some(36.5));

    // Unknown order id
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/orders/ORD-ffffffff/status",
            json!({"status": "PROCESSING"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_confirms_and_second_delete_is_404() {
    let (app, _dir) = test_app().await;
    let order = create_order(&app).await;
    let id = order["order_id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/orders/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Order deleted successfully");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/orders/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn document_endpoint_serves_the_mirror() {
    let (app, _dir) = test_app().await;
    let order = create_order(&app).await;
    let id = order["order_id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/orders/{id}/document")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let document = body_json(response).await;
    assert_eq!(document, order);

    let response = app
        .clone()
        .oneshot(get_request("/orders/ORD-ffffffff/document"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notifications_endpoint_reports_recent_events() {
    let (app, _dir) = test_app().await;
    create_order(&app).await;

    // The feed task drains the bus concurrently
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let response = app
        .clone()
        .oneshot(get_request("/notifications"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let notifications = body.as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["event_type"], "ORDER_CREATED");
    assert_eq!(notifications[0]["topic"], "order-events");
}

#[tokio::test]
async fn responses_carry_permissive_cors_headers() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/orders")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (app, _dir) = test_app().await;

    let response = app.clone().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
