use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use orderflow_api::{app, AppState};
use orderflow_core::{
    ErrorResponse, InventoryClient, OrderId, OrderResponse, OrderStatus, OrderStore, PaymentClient,
    PaymentRequest, ProductDetails, ProductId, ServiceError, ServiceLookup, ServiceResult,
};
use orderflow_infra::InMemoryOrderStore;
use orderflow_order::OrderWorkflow;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

struct StockedInventory {
    available: i64,
}

#[async_trait]
impl InventoryClient for StockedInventory {
    async fn reduce_quantity(&self, _product_id: ProductId, quantity: i64) -> ServiceResult<()> {
        if quantity > self.available {
            return Err(ServiceError::Remote {
                service: "PRODUCT-SERVICE".to_string(),
                code: "INSUFFICIENT_QUANTITY".to_string(),
                status: 400,
                message: "Product does not have sufficient quantity".to_string(),
            });
        }
        Ok(())
    }
}

struct Gateway {
    approve: bool,
}

#[async_trait]
impl PaymentClient for Gateway {
    async fn do_payment(&self, _request: &PaymentRequest) -> ServiceResult<()> {
        if self.approve {
            Ok(())
        } else {
            Err(ServiceError::Remote {
                service: "PAYMENT-SERVICE".to_string(),
                code: "PAYMENT_DECLINED".to_string(),
                status: 402,
                message: "Card declined".to_string(),
            })
        }
    }
}

struct Catalog;

#[async_trait]
impl ServiceLookup for Catalog {
    async fn get_product_by_id(&self, product_id: ProductId) -> ServiceResult<ProductDetails> {
        Ok(ProductDetails {
            product_id,
            product_name: "iPhone".to_string(),
        })
    }
}

fn test_app(store: Arc<InMemoryOrderStore>, approve: bool) -> axum::Router {
    let workflow = OrderWorkflow::new(
        store,
        Arc::new(StockedInventory { available: 10 }),
        Arc::new(Gateway { approve }),
        Arc::new(Catalog),
    );
    app(AppState::new(workflow))
}

fn place_order_request(quantity: i64) -> Request<Body> {
    let body = serde_json::json!({
        "productId": 42,
        "quantity": quantity,
        "totalAmount": 19.98,
        "paymentMode": "CARD"
    });
    Request::builder()
        .method("POST")
        .uri("/order/placeOrder")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_place_and_fetch_order() {
    let store = Arc::new(InMemoryOrderStore::new());

    let response = test_app(store.clone(), true)
        .oneshot(place_order_request(2))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let order_id: OrderId = read_json(response).await;
    assert_eq!(order_id, 1);

    let response = test_app(store, true)
        .oneshot(
            Request::builder()
                .uri(format!("/order/{}", order_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let details: OrderResponse = read_json(response).await;
    assert_eq!(details.order_id, order_id);
    assert_eq!(details.order_status, OrderStatus::Placed);
    assert_eq!(details.amount, Decimal::new(1998, 2));
    assert_eq!(details.product_details.product_id, 42);
    assert_eq!(details.product_details.product_name, "iPhone");
}

#[tokio::test]
async fn test_declined_payment_still_returns_order_id() {
    let store = Arc::new(InMemoryOrderStore::new());

    let response = test_app(store.clone(), false)
        .oneshot(place_order_request(2))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let order_id: OrderId = read_json(response).await;
    let order = store.find_by_id(order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::PaymentFailed);
}

#[tokio::test]
async fn test_insufficient_stock_is_rejected() {
    let store = Arc::new(InMemoryOrderStore::new());

    let response = test_app(store.clone(), true)
        .oneshot(place_order_request(50))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error_code, "INSUFFICIENT_QUANTITY");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_unknown_order_is_404() {
    let response = test_app(Arc::new(InMemoryOrderStore::new()), true)
        .oneshot(
            Request::builder()
                .uri("/order/77")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error_code, "NOT_FOUND");
    assert_eq!(error.error_message, "Order not found for the order Id: 77");
}

#[tokio::test]
async fn test_malformed_body_gets_error_response() {
    let store = Arc::new(InMemoryOrderStore::new());
    let request = Request::builder()
        .method("POST")
        .uri("/order/placeOrder")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"productId": 42,"#))
        .unwrap();

    let response = test_app(store.clone(), true).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error_code, "INVALID_REQUEST");
    assert!(!error.error_message.is_empty());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_non_numeric_order_id_gets_error_response() {
    let response = test_app(Arc::new(InMemoryOrderStore::new()), true)
        .oneshot(
            Request::builder()
                .uri("/order/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error_code, "INVALID_REQUEST");
}
