use thiserror::Error;

use crate::db_types::{NewPaymentRecord, PaymentRecord, PaymentStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Payments can only be moved to a terminal status, not {0}")]
    InvalidStatusTransition(PaymentStatus),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}

/// Persistence for payment records.
#[allow(async_fn_in_trait)]
pub trait PaymentStore {
    /// Stores a new record with status `Pending` and returns it as saved.
    async fn insert_payment(&self, payment: NewPaymentRecord) -> Result<PaymentRecord, StoreError>;

    async fn fetch_payment(&self, id: i64) -> Result<Option<PaymentRecord>, StoreError>;

    /// Returns the most recent record for the given order, if any.
    async fn fetch_payment_by_order_id(&self, order_id: &str) -> Result<Option<PaymentRecord>, StoreError>;

    /// Moves the `Pending` records of `order_id` to `status`, which must be terminal. Records that are already in a
    /// terminal status are left untouched. Returns the number of records that changed.
    async fn mark_payment_status(&self, order_id: &str, status: PaymentStatus) -> Result<u64, StoreError>;
}
