use std::fmt::Display;

use crate::{db_types::OrderStatus, pe_api::errors::ReconcileError};

/// What the reconciler does when a notification cannot be reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnReconcileFailure {
    /// Log the failure and report it as [`ReconcileOutcome::Failed`]. The webhook is still acknowledged.
    #[default]
    Log,
    /// Return the error to the caller.
    Escalate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcilerOptions {
    pub on_failure: OnReconcileFailure,
    /// When set, `merchant_order` notifications delivered to the generic webhook are reconciled too. Otherwise they
    /// are acknowledged and ignored.
    pub follow_merchant_orders: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    UnrecognizedEnvelope,
    MerchantOrdersNotFollowed { merchant_order_id: String },
    UnmappedStatus { payment_id: String, status: String },
}

impl Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::UnrecognizedEnvelope => write!(f, "Notification is not a payment event"),
            IgnoreReason::MerchantOrdersNotFollowed { merchant_order_id } => {
                write!(f, "Merchant order {merchant_order_id} notifications are not followed")
            },
            IgnoreReason::UnmappedStatus { payment_id, status } => {
                write!(f, "Payment {payment_id} has status '{status}', which requires no action")
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Ignored(IgnoreReason),
    Relayed { order_id: String, status: OrderStatus },
    Failed(ReconcileError),
}

impl Display for ReconcileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileOutcome::Ignored(reason) => write!(f, "Ignored. {reason}"),
            ReconcileOutcome::Relayed { order_id, status } => write!(f, "Order {order_id} updated to '{status}'"),
            ReconcileOutcome::Failed(e) => write!(f, "Failed. {e}"),
        }
    }
}
