use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use payment_common::Amount;
use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

//--------------------------------------       Product       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub unit_price: Amount,
}

impl Product {
    pub fn new<S1: Into<String>, S2: Into<String>>(id: S1, name: S2, unit_price: Amount) -> Self {
        Self { id: id.into(), name: name.into(), unit_price }
    }
}

/// The sum of the unit prices of every product. Each product counts as one unit. Saturates instead of overflowing;
/// use [`checked_total_amount`] where an out-of-range total must be rejected.
pub fn total_amount(products: &[Product]) -> Amount {
    products.iter().fold(Amount::default(), |total, p| total.saturating_add(p.unit_price))
}

/// The exact sum of the unit prices, or `None` if it does not fit in an [`Amount`].
pub fn checked_total_amount(products: &[Product]) -> Option<Amount> {
    products.iter().try_fold(Amount::default(), |total, p| total.checked_add(p.unit_price))
}

//--------------------------------------    PaymentStatus    ---------------------------------------------------------
/// The local lifecycle of a payment record.
///
/// Records are created as `Pending`. `Success` and `Failed` are terminal: once a record reaches either of them, it never
/// moves again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Success => write!(f, "Success"),
            PaymentStatus::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid payment status: {0}")]
pub struct PaymentStatusConversionError(String);

impl FromStr for PaymentStatus {
    type Err = PaymentStatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Success" => Ok(Self::Success),
            "Failed" => Ok(Self::Failed),
            s => Err(PaymentStatusConversionError(s.to_string())),
        }
    }
}

//--------------------------------------     OrderStatus     ---------------------------------------------------------
/// The order-status vocabulary understood by the downstream order service.
///
/// These strings are a wire contract and must be sent exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Recebido")]
    Received,
    #[serde(rename = "Em Preparação")]
    InPreparation,
    #[serde(rename = "FAILED")]
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Recebido",
            OrderStatus::InPreparation => "Em Preparação",
            OrderStatus::Failed => "FAILED",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//--------------------------------------   NewPaymentRecord  ---------------------------------------------------------
/// A payment record that has not been stored yet. The amount is always derived from the products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentRecord {
    pub order_id: String,
    pub client_id: String,
    pub qr_code: String,
    products: Vec<Product>,
    amount: Amount,
}

impl NewPaymentRecord {
    pub fn new<S1, S2, S3>(order_id: S1, client_id: S2, products: Vec<Product>, qr_code: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        let amount = total_amount(&products);
        Self { order_id: order_id.into(), client_id: client_id.into(), qr_code: qr_code.into(), products, amount }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

//--------------------------------------    PaymentRecord    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: i64,
    pub order_id: String,
    pub client_id: String,
    pub products: Vec<Product>,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
