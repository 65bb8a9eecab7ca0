use log::*;
use mercadopago_tools::{MercadoPagoApi, MercadoPagoApiError, MercadoPagoConfig, QrOrder, QrOrderItem};
use payment_engine::{
    traits::{MerchantOrderDetails, ProviderPaymentDetails, QrCode, QrOrderRequest},
    PaymentProvider,
    ProviderError,
};

/// Mercado Pago as a [`PaymentProvider`].
#[derive(Clone)]
pub struct MercadoPagoGateway {
    api: MercadoPagoApi,
}

impl MercadoPagoGateway {
    pub fn new(config: MercadoPagoConfig) -> Result<Self, MercadoPagoApiError> {
        let api = MercadoPagoApi::new(config)?;
        Ok(Self { api })
    }

    pub fn api(&self) -> &MercadoPagoApi {
        &self.api
    }
}

fn provider_error(e: MercadoPagoApiError) -> ProviderError {
    match e {
        MercadoPagoApiError::Initialization(s) | MercadoPagoApiError::RestResponseError(s) => {
            ProviderError::Transport(s)
        },
        MercadoPagoApiError::JsonError(s) => ProviderError::InvalidResponse(s),
        MercadoPagoApiError::QueryError { status, message } => ProviderError::Rejected { status, message },
    }
}

impl PaymentProvider for MercadoPagoGateway {
    async fn create_qr_order(&self, request: &QrOrderRequest) -> Result<QrCode, ProviderError> {
        let items = request
            .items
            .iter()
            .map(|p| QrOrderItem::new(p.id.clone(), p.name.clone(), p.unit_price))
            .collect::<Vec<_>>();
        let order = QrOrder::new(request.external_reference.clone(), request.total_amount, items)
            .with_notification_url(request.notification_url.as_str());
        trace!("💳️ QR order payload: {order:?}");
        let response = self.api.create_qr_order(&order).await.map_err(provider_error)?;
        if response.qr_data.trim().is_empty() {
            return Err(ProviderError::InvalidResponse("Mercado Pago returned an empty QR code".into()));
        }
        Ok(QrCode { qr_data: response.qr_data, provider_order_id: response.in_store_order_id })
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<ProviderPaymentDetails, ProviderError> {
        let payment = self.api.fetch_payment(payment_id).await.map_err(provider_error)?;
        Ok(ProviderPaymentDetails {
            payment_id: payment.id.map(|id| id.to_string()).unwrap_or_else(|| payment_id.to_string()),
            external_reference: payment.external_reference,
            status: payment.status,
        })
    }

    async fn fetch_merchant_order(&self, merchant_order_id: &str) -> Result<MerchantOrderDetails, ProviderError> {
        let order = self.api.fetch_merchant_order(merchant_order_id).await.map_err(provider_error)?;
        Ok(MerchantOrderDetails {
            merchant_order_id: order.id.map(|id| id.to_string()).unwrap_or_else(|| merchant_order_id.to_string()),
            external_reference: order.external_reference,
            status: order.status,
            payment_statuses: order.payments.into_iter().map(|p| p.status).collect(),
        })
    }
}
