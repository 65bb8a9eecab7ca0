use std::fmt::Display;

use payment_common::{Amount, CURRENCY_CODE};
use serde::{Deserialize, Serialize};

const DEFAULT_ORDER_TITLE: &str = "Product order";
const DEFAULT_ORDER_DESCRIPTION: &str = "Purchase description.";
const DEFAULT_CATEGORY: &str = "Lanches";
const DEFAULT_UNIT_MEASURE: &str = "unit";

/// Mercado Pago sends identifiers as numbers in some payloads and as strings in others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MpId {
    Number(u64),
    Text(String),
}

impl Display for MpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MpId::Number(n) => write!(f, "{n}"),
            MpId::Text(s) => f.write_str(s),
        }
    }
}

//--------------------------------------      QR orders      ---------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrOrder {
    /// Our order id. Mercado Pago echoes it back on every payment and merchant order.
    pub external_reference: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    pub total_amount: Amount,
    pub items: Vec<QrOrderItem>,
    pub cash_out: CashOut,
}

impl QrOrder {
    pub fn new(external_reference: String, total_amount: Amount, items: Vec<QrOrderItem>) -> Self {
        Self {
            external_reference,
            title: DEFAULT_ORDER_TITLE.to_string(),
            description: DEFAULT_ORDER_DESCRIPTION.to_string(),
            notification_url: None,
            total_amount,
            items,
            cash_out: CashOut::default(),
        }
    }

    pub fn with_notification_url<S: Into<String>>(mut self, url: S) -> Self {
        let url = url.into();
        self.notification_url = (!url.is_empty()).then_some(url);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrOrderItem {
    pub id: String,
    pub category_id: String,
    pub currency_id: String,
    pub description: String,
    pub picture_url: Option<String>,
    pub title: String,
    pub quantity: u32,
    pub unit_measure: String,
    pub unit_price: Amount,
    pub total_amount: Amount,
}

impl QrOrderItem {
    /// A single unit of a product. The line total is the unit price.
    pub fn new(id: String, name: String, unit_price: Amount) -> Self {
        Self {
            id,
            category_id: DEFAULT_CATEGORY.to_string(),
            currency_id: CURRENCY_CODE.to_string(),
            description: format!("Product: {name}"),
            picture_url: None,
            title: name,
            quantity: 1,
            unit_measure: DEFAULT_UNIT_MEASURE.to_string(),
            unit_price,
            total_amount: unit_price,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashOut {
    pub amount: Amount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrOrderResponse {
    #[serde(default)]
    pub in_store_order_id: Option<String>,
    /// The EMVCo payload that is rendered as a QR code at the point of sale
    pub qr_data: String,
}

//--------------------------------------       Payments      ---------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub id: Option<MpId>,
    /// `approved`, `rejected`, `pending`, `in_process`, `cancelled`, `refunded`, ...
    pub status: String,
    #[serde(default)]
    pub status_detail: Option<String>,
    #[serde(default)]
    pub external_reference: Option<String>,
    #[serde(default)]
    pub transaction_amount: Option<Amount>,
    #[serde(default)]
    pub date_approved: Option<String>,
}

//--------------------------------------   Merchant orders   ---------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantOrder {
    #[serde(default)]
    pub id: Option<MpId>,
    /// `opened` or `closed`
    pub status: String,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub external_reference: Option<String>,
    #[serde(default)]
    pub payments: Vec<MerchantOrderPayment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantOrderPayment {
    #[serde(default)]
    pub id: Option<MpId>,
    pub status: String,
    #[serde(default)]
    pub transaction_amount: Option<Amount>,
}
