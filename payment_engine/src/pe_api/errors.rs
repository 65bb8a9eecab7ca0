use log::Level;
use thiserror::Error;

use crate::traits::{OrderServiceError, ProviderError, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentFlowError {
    #[error("Invalid payment request. {0}")]
    ValidationError(String),
    #[error("Could not create the QR code. {0}")]
    ProviderError(#[from] ProviderError),
    #[error("The QR code was issued, but the payment could not be saved. {0}")]
    StorageError(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not set order {order_id} to '{status}'. {source}")]
pub struct RelayError {
    pub order_id: String,
    pub status: String,
    pub source: OrderServiceError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("Could not fetch payment {payment_id}. {source}")]
    PaymentFetchFailed { payment_id: String, source: ProviderError },
    #[error("Could not fetch merchant order {merchant_order_id}. {source}")]
    MerchantOrderFetchFailed { merchant_order_id: String, source: ProviderError },
    #[error("{resource} does not contain an external reference (orderId)")]
    MissingExternalReference { resource: String },
    #[error(transparent)]
    RelayFailed(#[from] RelayError),
}

impl ReconcileError {
    /// The level a failure is logged at. A payment that cannot be tied to an order is expected noise from the provider,
    /// not a fault.
    pub fn log_level(&self) -> Level {
        match self {
            ReconcileError::MissingExternalReference { .. } => Level::Warn,
            _ => Level::Error,
        }
    }
}
