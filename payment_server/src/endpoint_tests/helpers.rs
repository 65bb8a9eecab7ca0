use actix_web::{http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use log::debug;
use payment_engine::db_types::{NewPaymentRecord, PaymentRecord};
use serde_json::{json, Value};

pub async fn send_request<F>(req: TestRequest, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub fn json_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("Response is not JSON ({e}): {body}"))
}

/// The record a store would return after saving `payment` as payment #`id`.
pub fn stored_payment(id: i64, payment: &NewPaymentRecord) -> PaymentRecord {
    serde_json::from_value(json!({
        "id": id,
        "orderId": payment.order_id,
        "clientId": payment.client_id,
        "products": payment.products(),
        "amount": payment.amount(),
        "status": "Pending",
        "qrCode": payment.qr_code,
        "createdAt": "2024-09-15T12:00:00Z",
        "updatedAt": "2024-09-15T12:00:00Z"
    }))
    .unwrap()
}
