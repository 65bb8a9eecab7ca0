use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{checked_total_amount, NewPaymentRecord, PaymentRecord, Product},
    pe_api::{errors::PaymentFlowError, payment_objects::PaymentQr},
    traits::{PaymentProvider, PaymentStore, QrOrderRequest},
};

/// `PaymentOrchestrator` runs the checkout flow: it asks the payment provider for a QR code for the order and records
/// the pending payment.
pub struct PaymentOrchestrator<P, S> {
    provider: P,
    store: S,
    notification_url: String,
}

impl<P, S> Debug for PaymentOrchestrator<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentOrchestrator")
    }
}

impl<P, S> PaymentOrchestrator<P, S> {
    pub fn new<U: Into<String>>(provider: P, store: S, notification_url: U) -> Self {
        Self { provider, store, notification_url: notification_url.into() }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<P, S> PaymentOrchestrator<P, S>
where
    P: PaymentProvider,
    S: PaymentStore,
{
    /// Issues a QR code for the order and saves a `Pending` payment record for it.
    ///
    /// The order total is always the sum of the product prices. If the provider call fails, nothing is stored. If the
    /// record cannot be saved after the QR code was issued, the QR code is orphaned at the provider and
    /// [`PaymentFlowError::StorageError`] is returned.
    pub async fn process_order_payment(
        &self,
        order_id: &str,
        client_id: &str,
        products: Vec<Product>,
    ) -> Result<PaymentQr, PaymentFlowError> {
        validate_order(order_id, &products)?;
        let request = QrOrderRequest::new(order_id, self.notification_url.as_str(), products.clone());
        debug!("💳️ Requesting QR code for order {order_id}. Total: {}", request.total_amount);
        let qr = self.provider.create_qr_order(&request).await.map_err(|e| {
            error!("💳️ Could not create a QR code for order {order_id}. {e}");
            PaymentFlowError::ProviderError(e)
        })?;
        let record = NewPaymentRecord::new(order_id, client_id, products, qr.qr_data.as_str());
        let saved = self.store.insert_payment(record).await.map_err(|e| {
            error!(
                "💳️ A QR code was issued for order {order_id}, but the payment record could not be saved. The QR \
                 code [{}] is orphaned. {e}",
                qr.qr_data
            );
            PaymentFlowError::StorageError(e)
        })?;
        info!("💳️ Payment #{} for order {order_id} is pending. Amount: {}", saved.id, saved.amount);
        Ok(PaymentQr { order_id: order_id.to_string(), qr_code: qr.qr_data })
    }

    pub async fn fetch_payment(&self, id: i64) -> Result<Option<PaymentRecord>, PaymentFlowError> {
        let payment = self.store.fetch_payment(id).await?;
        Ok(payment)
    }
}

fn validate_order(order_id: &str, products: &[Product]) -> Result<(), PaymentFlowError> {
    if order_id.trim().is_empty() {
        return Err(PaymentFlowError::ValidationError("An order id is required".into()));
    }
    if products.is_empty() {
        return Err(PaymentFlowError::ValidationError("At least one product is required".into()));
    }
    if let Some(p) = products.iter().find(|p| p.unit_price.is_negative()) {
        return Err(PaymentFlowError::ValidationError(format!(
            "Product {} has a negative price ({})",
            p.id, p.unit_price
        )));
    }
    if checked_total_amount(products).is_none() {
        return Err(PaymentFlowError::ValidationError("The order total is out of range".into()));
    }
    Ok(())
}
