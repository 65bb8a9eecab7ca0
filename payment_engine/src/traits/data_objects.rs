use payment_common::Amount;

use crate::db_types::{total_amount, Product};

/// Everything the payment provider needs in order to issue a QR code for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrOrderRequest {
    /// Our order id. The provider attaches it to every payment made against the QR code.
    pub external_reference: String,
    pub notification_url: String,
    pub total_amount: Amount,
    pub items: Vec<Product>,
}

impl QrOrderRequest {
    pub fn new<S1: Into<String>, S2: Into<String>>(order_id: S1, notification_url: S2, items: Vec<Product>) -> Self {
        let total_amount = total_amount(&items);
        Self { external_reference: order_id.into(), notification_url: notification_url.into(), total_amount, items }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    pub qr_data: String,
    pub provider_order_id: Option<String>,
}

impl QrCode {
    pub fn new<S: Into<String>>(qr_data: S) -> Self {
        Self { qr_data: qr_data.into(), provider_order_id: None }
    }
}

/// The provider's authoritative view of a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPaymentDetails {
    pub payment_id: String,
    /// Our order id, if the payment was made against one of our QR codes
    pub external_reference: Option<String>,
    /// Provider status string, e.g. `approved`, `rejected`, `pending`
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantOrderDetails {
    pub merchant_order_id: String,
    pub external_reference: Option<String>,
    /// `opened` or `closed`
    pub status: String,
    /// The status of every payment attached to the merchant order
    pub payment_statuses: Vec<String>,
}
