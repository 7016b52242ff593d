// src/api_tests.rs
//! End-to-end HTTP tests against the in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::routes::app;
use crate::state::AppState;
use crate::store::MemoryStore;

fn test_app() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn seed(app: &Router, price: f64) -> (i64, i64) {
    let (_, product) = send(app, "POST", "/products", Some(json!({"name": "Widget", "price": price, "stock": 10}))).await;
    let (_, customer) = send(app, "POST", "/customers", Some(json!({"name": "Ada", "email": "ada@example.com"}))).await;
    (
        product["data"]["id"].as_i64().unwrap(),
        customer["data"]["id"].as_i64().unwrap(),
    )
}

mod health {
    use super::*;

    #[tokio::test]
    async fn health_check_returns_ok() {
        let app = test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"OK");
    }
}

mod products {
    use super::*;

    #[tokio::test]
    async fn create_then_read_back() {
        let app = test_app();

        let (status, created) = send(&app, "POST", "/products", Some(json!({"name": "Widget", "price": 9.99, "stock": 10}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["message"], "Product created successfully");

        let id = created["data"]["id"].as_i64().unwrap();
        let (status, fetched) = send(&app, "GET", &format!("/products/{id}"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"]["name"], "Widget");
        assert_eq!(fetched["data"]["price"], 9.99);
        assert_eq!(fetched["data"]["stock"], 10);
        assert_eq!(fetched["data"], created["data"]);
    }

    #[tokio::test]
    async fn price_keeps_full_precision() {
        let app = test_app();

        let (status, created) = send(&app, "POST", "/products", Some(json!({"name": "Bolt", "price": 9.999, "stock": 1}))).await;
        assert_eq!(status, StatusCode::CREATED);

        let id = created["data"]["id"].as_i64().unwrap();
        let (_, fetched) = send(&app, "GET", &format!("/products/{id}"), None).await;

        assert_eq!(fetched["data"]["price"], 9.999);
    }

    #[tokio::test]
    async fn list_returns_all() {
        let app = test_app();
        seed(&app, 1.0).await;
        seed(&app, 2.0).await;

        let (status, body) = send(&app, "GET", "/products", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let app = test_app();
        let (product_id, _) = seed(&app, 1.0).await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/products/{product_id}"),
            Some(json!({"name": "Gadget", "price": 3.5, "stock": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Update Product successfully");
        assert_eq!(body["data"]["name"], "Gadget");
        assert_eq!(body["data"]["price"], 3.5);
    }

    #[tokio::test]
    async fn update_missing_product_is_404() {
        let app = test_app();

        let (status, body) = send(&app, "PUT", "/products/7", Some(json!({"name": "X", "price": 1.0, "stock": 1}))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let app = test_app();

        let (status, body) = send(&app, "POST", "/products", Some(json!({"name": "X", "price": -1.0, "stock": 1}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Price cannot be negative");
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let app = test_app();

        let (status, body) = send(&app, "POST", "/products", Some(json!({"name": "X", "price": "cheap"}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn invalid_id_is_400() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/products/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid product ID");
    }

    #[tokio::test]
    async fn missing_product_is_404() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/products/404", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");
    }

    #[tokio::test]
    async fn delete_is_no_content_even_when_missing() {
        let app = test_app();
        let (product_id, _) = seed(&app, 1.0).await;

        let (status, body) = send(&app, "DELETE", &format!("/products/{product_id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, "DELETE", &format!("/products/{product_id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &format!("/products/{product_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod customers {
    use super::*;

    #[tokio::test]
    async fn crud_flow() {
        let app = test_app();

        let (status, created) = send(&app, "POST", "/customers", Some(json!({"name": "Ada", "email": "ada@example.com"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["data"]["id"].as_i64().unwrap();

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/customers/{id}"),
            Some(json!({"name": "Ada L.", "email": "ada@lovelace.dev"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["email"], "ada@lovelace.dev");

        let (status, listed) = send(&app, "GET", "/customers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["data"][0]["name"], "Ada L.");

        let (status, _) = send(&app, "DELETE", &format!("/customers/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &format!("/customers/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Customer not found");
    }

    #[tokio::test]
    async fn invalid_id_is_400() {
        let app = test_app();

        let (status, body) = send(&app, "DELETE", "/customers/1.5", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid customer ID");
    }
}

mod orders {
    use super::*;

    #[tokio::test]
    async fn creates_order_with_computed_total() {
        let app = test_app();
        let (product_id, customer_id) = seed(&app, 5.0).await;

        let (status, body) = send(
            &app,
            "POST",
            "/orders",
            Some(json!({"customerId": customer_id, "productId": product_id, "quantity": 3})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Order created successfully");
        assert_eq!(body["data"]["total"], 15.0);
        assert_eq!(body["data"]["quantity"], 3);

        let id = body["data"]["id"].as_i64().unwrap();
        let (status, fetched) = send(&app, "GET", &format!("/orders/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"], body["data"]);
    }

    #[tokio::test]
    async fn unknown_product_is_400() {
        let app = test_app();
        let (_, customer_id) = seed(&app, 5.0).await;

        let (status, body) = send(
            &app,
            "POST",
            "/orders",
            Some(json!({"customer_id": customer_id, "product_id": 999, "quantity": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Product not found");
    }

    #[tokio::test]
    async fn unknown_customer_is_400() {
        let app = test_app();
        let (product_id, _) = seed(&app, 5.0).await;

        let (status, body) = send(
            &app,
            "POST",
            "/orders",
            Some(json!({"customer_id": 999, "product_id": product_id, "quantity": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Customer not found");
    }

    #[tokio::test]
    async fn stock_is_not_decremented() {
        let app = test_app();
        let (product_id, customer_id) = seed(&app, 1.0).await;

        for _ in 0..3 {
            let (status, _) = send(
                &app,
                "POST",
                "/orders",
                Some(json!({"customer_id": customer_id, "product_id": product_id, "quantity": 50})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, product) = send(&app, "GET", &format!("/products/{product_id}"), None).await;
        assert_eq!(product["data"]["stock"], 10);
    }

    #[tokio::test]
    async fn large_quantity_is_accepted() {
        let app = test_app();
        let (product_id, customer_id) = seed(&app, 1000.0).await;

        let (status, body) = send(
            &app,
            "POST",
            "/orders",
            Some(json!({"customer_id": customer_id, "product_id": product_id, "quantity": 3_000_000_000_i64})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["quantity"], 3_000_000_000_i64);
        assert_eq!(body["data"]["total"], 3.0e12);
    }

    #[tokio::test]
    async fn missing_order_is_404() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/orders/1", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Order not found");
    }

    #[tokio::test]
    async fn missing_fields_are_400() {
        let app = test_app();

        let (status, body) = send(&app, "POST", "/orders", Some(json!({"customer_id": 1}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
