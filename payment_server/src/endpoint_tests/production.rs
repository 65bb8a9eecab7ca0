use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use payment_engine::{OrderServiceError, OrderStatusRelay};
use serde_json::json;

use super::{
    helpers::{json_body, send_request},
    mocks::MockOrders,
};
use crate::routes::{OrdersByStatusRoute, UpdateOrderStatusRoute};

fn configure(orders: MockOrders) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(OrdersByStatusRoute::<MockOrders>::new())
            .service(UpdateOrderStatusRoute::<MockOrders>::new())
            .app_data(web::Data::new(OrderStatusRelay::new(orders)));
    }
}

#[actix_web::test]
async fn orders_by_status_are_passed_through() {
    let _ = env_logger::try_init().ok();
    let payload = json!([{"orderId": "ord1", "status": "Recebido", "items": [{"name": "X-Burger"}]}]);
    let expected = payload.clone();
    let mut orders = MockOrders::new();
    orders
        .expect_fetch_orders_by_status()
        .withf(|s| s == "Recebido")
        .times(1)
        .returning(move |_| Ok(payload.clone()));
    let req = TestRequest::get().uri("/production/status/Recebido");
    let (status, body) = send_request(req, configure(orders)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), expected);
}

#[actix_web::test]
async fn orders_by_status_failure() {
    let _ = env_logger::try_init().ok();
    let mut orders = MockOrders::new();
    orders
        .expect_fetch_orders_by_status()
        .times(1)
        .returning(|_| Err(OrderServiceError::Rejected { status: 500, message: "boom".into() }));
    let req = TestRequest::get().uri("/production/status/Recebido");
    let (status, body) = send_request(req, configure(orders)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body), json!({"error": "Failed to fetch orders"}));
}

#[actix_web::test]
async fn update_status_requires_a_status() {
    let _ = env_logger::try_init().ok();
    for body in [json!({}), json!({"status": ""}), json!({"status": null})] {
        let mut orders = MockOrders::new();
        orders.expect_update_order_status().never();
        let req = TestRequest::patch().uri("/production/ord1/status").set_json(body);
        let (status, body) = send_request(req, configure(orders)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&body), json!({"error": "Status is required"}));
    }
}

#[actix_web::test]
async fn update_status() {
    let _ = env_logger::try_init().ok();
    let mut orders = MockOrders::new();
    orders
        .expect_update_order_status()
        .withf(|id, s| id == "ord1" && s == "Pronto")
        .times(1)
        .returning(|_, _| Ok(json!({"ok": true})));
    let req = TestRequest::patch().uri("/production/ord1/status").set_json(json!({"status": "Pronto"}));
    let (status, body) = send_request(req, configure(orders)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!({"message": "Order status updated successfully", "orderId": "ord1", "status": "Pronto"})
    );
}

#[actix_web::test]
async fn update_status_failure() {
    let _ = env_logger::try_init().ok();
    let mut orders = MockOrders::new();
    orders
        .expect_update_order_status()
        .times(1)
        .returning(|_, _| Err(OrderServiceError::Rejected { status: 404, message: "Order not found".into() }));
    let req = TestRequest::patch().uri("/production/ord9/status").set_json(json!({"status": "Pronto"}));
    let (status, body) = send_request(req, configure(orders)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = json_body(&body)["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Could not set order ord9 to 'Pronto'."), "{error}");
    assert!(error.contains("Order not found"), "{error}");
}
