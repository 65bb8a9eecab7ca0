use actix_web::{
    http::{header::ContentType, StatusCode},
    test::TestRequest,
    web,
    web::ServiceConfig,
};
use payment_common::Amount;
use payment_engine::{
    db_types::{NewPaymentRecord, Product},
    traits::QrCode,
    PaymentOrchestrator,
    ProviderError,
    StoreError,
};
use serde_json::json;

use super::{
    helpers::{json_body, send_request, stored_payment},
    mocks::{MockProvider, MockStore},
};
use crate::routes::{CreatePaymentRoute, PaymentByIdRoute};

const NOTIFICATION_URL: &str = "https://payments.example.com/webhook";

fn configure(provider: MockProvider, store: MockStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = PaymentOrchestrator::new(provider, store, NOTIFICATION_URL);
        cfg.service(CreatePaymentRoute::<MockProvider, MockStore>::new())
            .service(PaymentByIdRoute::<MockProvider, MockStore>::new())
            .app_data(web::Data::new(api));
    }
}

fn order_body() -> serde_json::Value {
    json!({
        "orderId": "ord1",
        "clientId": "client7",
        "products": [
            {"id": "1", "name": "X-Burger", "unitPrice": 100},
            {"id": "2", "name": "Fries", "unitPrice": 200}
        ],
        "totalAmount": 300
    })
}

fn provider_issuing(qr: &'static str) -> MockProvider {
    let mut provider = MockProvider::new();
    provider
        .expect_create_qr_order()
        .withf(|r| {
            r.external_reference == "ord1" &&
                r.total_amount == Amount::from_cents(30_000) &&
                r.notification_url == NOTIFICATION_URL &&
                r.items.len() == 2
        })
        .times(1)
        .returning(move |_| Ok(QrCode::new(qr)));
    provider
}

fn store_saving() -> MockStore {
    let mut store = MockStore::new();
    store
        .expect_insert_payment()
        .withf(|p| p.order_id == "ord1" && p.client_id == "client7" && p.amount() == Amount::from_cents(30_000))
        .times(1)
        .returning(|p| Ok(stored_payment(1, &p)));
    store
}

#[actix_web::test]
async fn create_payment() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::post().uri("/payments").set_json(order_body());
    let (status, body) = send_request(req, configure(provider_issuing("QR-ord1"), store_saving())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json_body(&body), json!({"orderId": "ord1", "qrCode": "QR-ord1"}));
}

#[actix_web::test]
async fn create_payment_ignores_claimed_total() {
    let _ = env_logger::try_init().ok();
    let mut order = order_body();
    order["totalAmount"] = json!(1.5);
    let req = TestRequest::post().uri("/payments").set_json(order);
    let (status, body) = send_request(req, configure(provider_issuing("QR-ord1"), store_saving())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json_body(&body)["qrCode"], "QR-ord1");
}

#[actix_web::test]
async fn create_payment_without_products() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::post().uri("/payments").set_json(json!({"orderId": "ord1", "clientId": "c", "products": []}));
    let (status, body) = send_request(req, configure(MockProvider::new(), MockStore::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "Invalid payment request. At least one product is required");
}

#[actix_web::test]
async fn create_payment_with_negative_price() {
    let _ = env_logger::try_init().ok();
    let mut order = order_body();
    order["products"][1]["unitPrice"] = json!(-2);
    let req = TestRequest::post().uri("/payments").set_json(order);
    let (status, body) = send_request(req, configure(MockProvider::new(), MockStore::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "Invalid payment request. Product 2 has a negative price (-2.00 BRL)");
}

#[actix_web::test]
async fn create_payment_with_total_out_of_range() {
    let _ = env_logger::try_init().ok();
    let mut order = order_body();
    order["products"][0]["unitPrice"] = json!(50_000_000_000_000_000_u64);
    order["products"][1]["unitPrice"] = json!(50_000_000_000_000_000_u64);
    let mut provider = MockProvider::new();
    provider.expect_create_qr_order().never();
    let req = TestRequest::post().uri("/payments").set_json(order);
    let (status, body) = send_request(req, configure(provider, MockStore::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"], "Invalid payment request. The order total is out of range");
}

#[actix_web::test]
async fn create_payment_provider_failure() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockProvider::new();
    provider.expect_create_qr_order().times(1).returning(|_| {
        Err(ProviderError::Rejected { status: 401, message: "invalid access token".into() })
    });
    let mut store = MockStore::new();
    store.expect_insert_payment().never();
    let req = TestRequest::post().uri("/payments").set_json(order_body());
    let (status, body) = send_request(req, configure(provider, store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = json_body(&body)["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Could not create the QR code."), "{error}");
    assert!(error.contains("invalid access token"), "{error}");
}

#[actix_web::test]
async fn create_payment_storage_failure() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_insert_payment().times(1).returning(|_| Err(StoreError::DatabaseError("disk I/O error".into())));
    let req = TestRequest::post().uri("/payments").set_json(order_body());
    let (status, body) = send_request(req, configure(provider_issuing("QR-ord1"), store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = json_body(&body)["error"].as_str().unwrap().to_string();
    assert!(error.contains("could not be saved"), "{error}");
}

#[actix_web::test]
async fn create_payment_malformed_body() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::post().uri("/payments").insert_header(ContentType::json()).set_payload("{\"orderId\": ");
    let (status, _) = send_request(req, configure(MockProvider::new(), MockStore::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn fetch_payment() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_payment().withf(|id| *id == 5).times(1).returning(|id| {
        let products = vec![Product::new("1", "X-Burger", Amount::from_cents(2590))];
        Ok(Some(stored_payment(id, &NewPaymentRecord::new("ord5", "client7", products, "QR-ord5"))))
    });
    let req = TestRequest::get().uri("/payments/5");
    let (status, body) = send_request(req, configure(MockProvider::new(), store)).await;
    assert_eq!(status, StatusCode::OK);
    let payment = json_body(&body);
    assert_eq!(payment["id"], 5);
    assert_eq!(payment["orderId"], "ord5");
    assert_eq!(payment["amount"].as_f64(), Some(25.9));
    assert_eq!(payment["status"], "Pending");
    assert_eq!(payment["qrCode"], "QR-ord5");
}

#[actix_web::test]
async fn fetch_missing_payment() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_payment().times(1).returning(|_| Ok(None));
    let req = TestRequest::get().uri("/payments/7");
    let (status, body) = send_request(req, configure(MockProvider::new(), store)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"], "The data was not found. No payment with id 7");
}

#[actix_web::test]
async fn fetch_payment_storage_failure() {
    let _ = env_logger::try_init().ok();
    let mut store = MockStore::new();
    store.expect_fetch_payment().times(1).returning(|_| Err(StoreError::DatabaseError("database is locked".into())));
    let req = TestRequest::get().uri("/payments/7");
    let (status, _) = send_request(req, configure(MockProvider::new(), store)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
