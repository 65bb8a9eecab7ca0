use serde::{Deserialize, Serialize};

/// The result of a successful checkout: the order id and the QR payload to display to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQr {
    pub order_id: String,
    pub qr_code: String,
}
