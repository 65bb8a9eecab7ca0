//! # Payment server
//! This crate hosts the HTTP surface of the fast-food payment service. It is responsible for:
//! Issuing Mercado Pago QR codes for orders and recording the pending payments.
//! Receiving Mercado Pago payment notifications and relaying the resulting order status to the order service.
//! Proxying the kitchen's production screens to the order service.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `POST /payments`: Creates a QR code for an order.
//! * `GET /payments/{id}`: Fetches a stored payment record.
//! * `POST /webhook`: The Mercado Pago notification route.
//! * `POST /webhook/merchant_orders/{id}`: Reconciles a single merchant order.
//! * `GET /production/status/{status}`: Orders with the given status, straight from the order service.
//! * `PATCH /production/{order_id}/status`: Updates an order's status at the order service.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
