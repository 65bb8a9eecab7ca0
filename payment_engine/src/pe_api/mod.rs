//! # Payment engine public API
//!
//! * [`payment_orchestrator`] turns an order into a Mercado Pago QR code and a stored payment record.
//! * [`notification_reconciler`] reacts to provider notifications. It re-fetches the authoritative state from the
//!   provider, maps it onto the order-status vocabulary and relays the result.
//! * [`order_status_relay`] forwards status changes to the downstream order service.
//!
//! Each API is created by handing it the backends it needs:
//!
//! ```rust,ignore
//! let store = SqliteDatabase::new_with_url(url, 5).await?;
//! let orchestrator = PaymentOrchestrator::new(provider, store, notification_url);
//! let qr = orchestrator.process_order_payment("ord-1", "client-9", products).await?;
//! ```
pub mod errors;
pub mod notification_reconciler;
pub mod order_status_relay;
pub mod payment_objects;
pub mod payment_orchestrator;
pub mod reconcile_objects;
pub mod status_mapping;

#[cfg(test)]
mod test_mocks;
