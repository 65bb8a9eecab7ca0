use thiserror::Error;

use crate::traits::data_objects::{MerchantOrderDetails, ProviderPaymentDetails, QrCode, QrOrderRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Could not reach the payment provider. {0}")]
    Transport(String),
    #[error("The payment provider rejected the request with status {status}. {message}")]
    Rejected { status: u16, message: String },
    #[error("The payment provider sent a response that could not be understood. {0}")]
    InvalidResponse(String),
}

/// The payment provider (Mercado Pago) as seen by the engine.
///
/// Implementations are responsible for authentication, timeouts and translating the provider's wire format into the
/// types in this module.
#[allow(async_fn_in_trait)]
pub trait PaymentProvider {
    /// Creates the in-store order for `request` and returns the QR payload the customer scans.
    async fn create_qr_order(&self, request: &QrOrderRequest) -> Result<QrCode, ProviderError>;

    /// Fetches the current, authoritative state of a payment.
    async fn fetch_payment(&self, payment_id: &str) -> Result<ProviderPaymentDetails, ProviderError>;

    /// Fetches the current state of a merchant order, including the statuses of its payments.
    async fn fetch_merchant_order(&self, merchant_order_id: &str) -> Result<MerchantOrderDetails, ProviderError>;
}
