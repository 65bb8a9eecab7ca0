//! Adapters between the payment engine's backend traits and the outside world.
//!
//! * [`mercadopago`] implements [`payment_engine::PaymentProvider`] on top of `mercadopago_tools`.
//! * [`order_service`] implements [`payment_engine::OrderService`] as a small reqwest client.
pub mod mercadopago;
pub mod order_service;
