//! Mapping of provider states onto the order-status vocabulary.
use crate::{
    db_types::{OrderStatus, PaymentStatus},
    traits::MerchantOrderDetails,
};

const APPROVED: &str = "approved";
const REJECTED: &str = "rejected";
const CLOSED: &str = "closed";

/// What a provider payment status means for the order and for the local payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
}

/// Only `approved` and `rejected` are actionable. Every other provider status (`pending`, `in_process`, ...) is
/// `None` and results in no relay.
pub fn payment_transition(provider_status: &str) -> Option<StatusTransition> {
    match provider_status {
        APPROVED => {
            Some(StatusTransition { order_status: OrderStatus::InPreparation, payment_status: PaymentStatus::Success })
        },
        REJECTED => Some(StatusTransition { order_status: OrderStatus::Failed, payment_status: PaymentStatus::Failed }),
        _ => None,
    }
}

/// A merchant order is paid once it is closed and at least one of its payments was approved.
pub fn merchant_order_is_paid(order: &MerchantOrderDetails) -> bool {
    order.status == CLOSED && order.payment_statuses.iter().any(|s| s == APPROVED)
}

pub fn merchant_order_status(order: &MerchantOrderDetails) -> OrderStatus {
    if merchant_order_is_paid(order) {
        OrderStatus::InPreparation
    } else {
        OrderStatus::Received
    }
}
