//! # Backend contracts
//!
//! The engine is handed its collaborators as trait implementations. This keeps the core flows free of HTTP and SQL
//! details, and lets tests substitute in-memory fakes.
//!
//! * [`PaymentProvider`] issues QR orders and answers lookups for payments and merchant orders (Mercado Pago).
//! * [`OrderService`] is the downstream order service that receives status updates.
//! * [`PaymentStore`] persists payment records.
mod data_objects;
mod order_service;
mod payment_provider;
mod payment_store;

pub use data_objects::{MerchantOrderDetails, ProviderPaymentDetails, QrCode, QrOrderRequest};
pub use order_service::{OrderService, OrderServiceError};
pub use payment_provider::{PaymentProvider, ProviderError};
pub use payment_store::{PaymentStore, StoreError};
