use std::fmt::Debug;

use log::*;
use serde_json::Value;

use crate::{
    db_types::PaymentStatus,
    notification::NotificationEvent,
    pe_api::{
        errors::ReconcileError,
        order_status_relay::OrderStatusRelay,
        reconcile_objects::{IgnoreReason, OnReconcileFailure, ReconcileOutcome, ReconcilerOptions},
        status_mapping::{merchant_order_is_paid, merchant_order_status, payment_transition},
    },
    traits::{OrderService, PaymentProvider, PaymentStore},
};

/// `NotificationReconciler` turns provider notifications into order status updates.
///
/// Notifications are treated as hints only. For every actionable notification the reconciler fetches the current
/// state from the provider, maps it onto the order-status vocabulary and relays the result to the order service. The
/// local payment record is moved to its terminal status as a side effect.
///
/// No deduplication is done: a redelivered notification is re-fetched and relayed again. Since the provider's state is
/// fetched fresh each time and terminal local statuses never change, repeated and out-of-order deliveries converge on
/// the same result.
pub struct NotificationReconciler<P, O, S> {
    provider: P,
    relay: OrderStatusRelay<O>,
    store: S,
    options: ReconcilerOptions,
}

impl<P, O, S> Debug for NotificationReconciler<P, O, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NotificationReconciler({:?})", self.options)
    }
}

impl<P, O, S> NotificationReconciler<P, O, S> {
    pub fn new(provider: P, order_service: O, store: S, options: ReconcilerOptions) -> Self {
        Self { provider, relay: OrderStatusRelay::new(order_service), store, options }
    }

    pub fn options(&self) -> ReconcilerOptions {
        self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<P, O, S> NotificationReconciler<P, O, S>
where
    P: PaymentProvider,
    O: OrderService,
    S: PaymentStore,
{
    /// Handles a raw webhook body.
    ///
    /// With [`OnReconcileFailure::Log`] this only returns `Ok`. Failures are reported as [`ReconcileOutcome::Failed`].
    /// With [`OnReconcileFailure::Escalate`], failures are returned as errors.
    pub async fn handle_webhook(&self, body: &Value) -> Result<ReconcileOutcome, ReconcileError> {
        debug!("🪝️ Received notification: {body}");
        let event = NotificationEvent::classify(body);
        match event {
            NotificationEvent::Payment { payment_id } => self.on_failure(self.reconcile_payment(&payment_id).await),
            NotificationEvent::MerchantOrder { merchant_order_id } if self.options.follow_merchant_orders => {
                self.on_failure(self.reconcile_merchant_order(&merchant_order_id).await)
            },
            NotificationEvent::MerchantOrder { merchant_order_id } => {
                debug!("🪝️ Ignoring notification for merchant order {merchant_order_id}");
                Ok(ReconcileOutcome::Ignored(IgnoreReason::MerchantOrdersNotFollowed { merchant_order_id }))
            },
            NotificationEvent::Unrecognized => {
                info!("🪝️ Ignoring notification. It is not a payment event.");
                Ok(ReconcileOutcome::Ignored(IgnoreReason::UnrecognizedEnvelope))
            },
        }
    }

    /// Reconciles a single payment, identified by its provider id.
    ///
    /// `approved` payments move the order to "Em Preparação" and `rejected` payments move it to "FAILED". Any other
    /// status is ignored. Payments without an external reference cannot be tied to an order, and are an error.
    pub async fn reconcile_payment(&self, payment_id: &str) -> Result<ReconcileOutcome, ReconcileError> {
        let payment = self.provider.fetch_payment(payment_id).await.map_err(|source| {
            ReconcileError::PaymentFetchFailed { payment_id: payment_id.to_string(), source }
        })?;
        let order_id = match payment.external_reference.as_deref().map(str::trim) {
            Some(order_id) if !order_id.is_empty() => order_id.to_string(),
            _ => {
                return Err(ReconcileError::MissingExternalReference { resource: format!("Payment {payment_id}") });
            },
        };
        let Some(transition) = payment_transition(&payment.status) else {
            debug!("🪝️ Payment {payment_id} for order {order_id} has status '{}'. No action taken.", payment.status);
            let reason = IgnoreReason::UnmappedStatus { payment_id: payment_id.to_string(), status: payment.status };
            return Ok(ReconcileOutcome::Ignored(reason));
        };
        self.relay.update_order_status(&order_id, transition.order_status.as_str()).await?;
        self.record_terminal_status(&order_id, transition.payment_status).await;
        Ok(ReconcileOutcome::Relayed { order_id, status: transition.order_status })
    }

    /// Reconciles a merchant order. The order is "Em Preparação" once the merchant order is closed with at least one
    /// approved payment, and "Recebido" otherwise.
    ///
    /// This always returns failures as errors, regardless of [`ReconcilerOptions::on_failure`].
    pub async fn reconcile_merchant_order(&self, merchant_order_id: &str) -> Result<ReconcileOutcome, ReconcileError> {
        let merchant_order = self.provider.fetch_merchant_order(merchant_order_id).await.map_err(|source| {
            ReconcileError::MerchantOrderFetchFailed { merchant_order_id: merchant_order_id.to_string(), source }
        })?;
        let order_id = match merchant_order.external_reference.as_deref().map(str::trim) {
            Some(order_id) if !order_id.is_empty() => order_id.to_string(),
            _ => {
                return Err(ReconcileError::MissingExternalReference {
                    resource: format!("Merchant order {merchant_order_id}"),
                });
            },
        };
        let status = merchant_order_status(&merchant_order);
        self.relay.update_order_status(&order_id, status.as_str()).await?;
        if merchant_order_is_paid(&merchant_order) {
            self.record_terminal_status(&order_id, PaymentStatus::Success).await;
        }
        Ok(ReconcileOutcome::Relayed { order_id, status })
    }

    fn on_failure(&self, result: Result<ReconcileOutcome, ReconcileError>) -> Result<ReconcileOutcome, ReconcileError> {
        match (result, self.options.on_failure) {
            (Ok(outcome), _) => Ok(outcome),
            (Err(e), OnReconcileFailure::Log) => {
                log!(e.log_level(), "🪝️ Notification could not be reconciled. {e}");
                Ok(ReconcileOutcome::Failed(e))
            },
            (Err(e), OnReconcileFailure::Escalate) => Err(e),
        }
    }

    /// The order service is the source of truth for order state, so a failure here is logged and not propagated.
    async fn record_terminal_status(&self, order_id: &str, status: PaymentStatus) {
        match self.store.mark_payment_status(order_id, status).await {
            Ok(0) => trace!("🪝️ No pending payment for order {order_id}. Local status unchanged."),
            Ok(n) => debug!("🪝️ {n} payment(s) for order {order_id} marked as {status}"),
            Err(e) => error!("🪝️ Could not mark the payment for order {order_id} as {status}. {e}"),
        }
    }
}
