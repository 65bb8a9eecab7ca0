//! Payment Engine
//!
//! The payment engine contains the core logic of the fast-food payment service. It is transport-agnostic: the HTTP
//! surface lives in `payment_server`, and the concrete Mercado Pago and order-service clients are supplied by the caller.
//!
//! The library is divided into three main sections:
//! 1. Backend contracts ([`mod@traits`]). The engine never talks to the network or the database directly. Instead,
//!    it is handed implementations of [`PaymentProvider`], [`OrderService`] and [`PaymentStore`].
//! 2. Storage ([`SqliteDatabase`]). The SQLite implementation of [`PaymentStore`]. The record types it stores are
//!    defined in [`mod@db_types`] and are public.
//! 3. The public API ([`PaymentOrchestrator`], [`NotificationReconciler`] and [`OrderStatusRelay`]). These are generic
//!    over the backend traits, so tests can swap in fakes for any of the collaborators.
//!
//! Incoming webhook bodies are classified by [`NotificationEvent::classify`] before the reconciler acts on them.
pub mod db_types;
pub mod notification;
mod pe_api;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod traits;

#[cfg(feature = "sqlite")]
pub use sqlite::{db::create_database_if_missing, SqliteDatabase};

pub use notification::NotificationEvent;
pub use pe_api::{
    errors::{PaymentFlowError, ReconcileError, RelayError},
    notification_reconciler::NotificationReconciler,
    order_status_relay::OrderStatusRelay,
    payment_objects,
    payment_orchestrator::PaymentOrchestrator,
    reconcile_objects,
    status_mapping,
};
pub use traits::{OrderService, OrderServiceError, PaymentProvider, PaymentStore, ProviderError, StoreError};
