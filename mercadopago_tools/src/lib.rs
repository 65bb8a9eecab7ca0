//! A small, typed client for the parts of the Mercado Pago REST API used by the payment service:
//!
//! * In-store QR orders (`POST /instore/orders/qr/seller/collectors/{collector}/pos/{pos}/qrs`)
//! * Payments (`GET /v1/payments/{id}`)
//! * Merchant orders (`GET /merchant_orders/{id}`)
mod api;
mod config;
mod error;

pub mod data_objects;

pub use api::MercadoPagoApi;
pub use config::MercadoPagoConfig;
pub use data_objects::{MerchantOrder, MerchantOrderPayment, MpId, Payment, QrOrder, QrOrderItem, QrOrderResponse};
pub use error::MercadoPagoApiError;
