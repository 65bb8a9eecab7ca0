//! Classification of inbound Mercado Pago notifications.
//!
//! Mercado Pago delivers notifications in two envelope shapes:
//!
//! * Webhooks: `{"action": "payment.updated", "type": "payment", "data": {"id": "123"}}`
//! * IPN: `{"topic": "payment", "resource": "123"}` or
//!   `{"topic": "merchant_order", "resource": "https://api.mercadopago.com/merchant_orders/456"}`
//!
//! The shapes are tried in that order. Anything else is [`NotificationEvent::Unrecognized`].
use std::fmt::Display;

use serde::Deserialize;
use serde_json::Value;

const PAYMENT_ACTIONS: [&str; 2] = ["payment.updated", "payment.created"];
const PAYMENT_TYPE: &str = "payment";
const PAYMENT_TOPIC: &str = "payment";
const MERCHANT_ORDER_TOPIC: &str = "merchant_order";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Payment { payment_id: String },
    MerchantOrder { merchant_order_id: String },
    Unrecognized,
}

impl Display for NotificationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationEvent::Payment { payment_id } => write!(f, "payment #{payment_id}"),
            NotificationEvent::MerchantOrder { merchant_order_id } => write!(f, "merchant order #{merchant_order_id}"),
            NotificationEvent::Unrecognized => write!(f, "unrecognized notification"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_non_empty(self) -> Option<String> {
        let id = match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.trim().to_string(),
        };
        is_usable_id(&id).then_some(id)
    }
}

/// Ids end up as a path segment in provider URLs. Empty ids and dot-segments can never name a resource.
fn is_usable_id(id: &str) -> bool {
    !matches!(id, "" | "." | "..")
}

#[derive(Deserialize)]
struct ActionEnvelope {
    action: String,
    #[serde(rename = "type")]
    kind: String,
    data: ActionData,
}

#[derive(Deserialize)]
struct ActionData {
    id: RawId,
}

#[derive(Deserialize)]
struct TopicEnvelope {
    topic: String,
    resource: RawId,
}

impl NotificationEvent {
    /// Classifies a webhook body. This never fails: bodies that match none of the known shapes are `Unrecognized`.
    pub fn classify(body: &Value) -> Self {
        Self::from_action_envelope(body).or_else(|| Self::from_topic_envelope(body)).unwrap_or(Self::Unrecognized)
    }

    fn from_action_envelope(body: &Value) -> Option<Self> {
        let envelope = ActionEnvelope::deserialize(body).ok()?;
        if !PAYMENT_ACTIONS.contains(&envelope.action.as_str()) || envelope.kind != PAYMENT_TYPE {
            return None;
        }
        let payment_id = envelope.data.id.into_non_empty()?;
        Some(Self::Payment { payment_id })
    }

    fn from_topic_envelope(body: &Value) -> Option<Self> {
        let envelope = TopicEnvelope::deserialize(body).ok()?;
        let resource = envelope.resource.into_non_empty()?;
        match envelope.topic.as_str() {
            PAYMENT_TOPIC => Some(Self::Payment { payment_id: resource }),
            MERCHANT_ORDER_TOPIC => {
                let merchant_order_id = last_path_segment(&resource)?;
                Some(Self::MerchantOrder { merchant_order_id })
            },
            _ => None,
        }
    }
}

/// Merchant order resources are usually full URLs. The id is the final path segment.
fn last_path_segment(resource: &str) -> Option<String> {
    let segment = resource.trim_end_matches('/').rsplit('/').next()?;
    let segment = segment.split('?').next()?.trim();
    is_usable_id(segment).then(|| segment.to_string())
}
