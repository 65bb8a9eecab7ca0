use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use payment_engine::traits::{
    MerchantOrderDetails,
    OrderService,
    OrderServiceError,
    PaymentProvider,
    ProviderError,
    ProviderPaymentDetails,
    QrCode,
    QrOrderRequest,
};
use serde_json::{json, Value};

/// An in-memory Mercado Pago. Payments and merchant orders are scripted by the test steps.
#[derive(Debug, Clone, Default)]
pub struct FakeProvider {
    state: Arc<Mutex<ProviderState>>,
}

#[derive(Debug, Default)]
struct ProviderState {
    offline: bool,
    qr_requests: Vec<QrOrderRequest>,
    payments: HashMap<String, ProviderPaymentDetails>,
    merchant_orders: HashMap<String, MerchantOrderDetails>,
    fetches: usize,
}

impl FakeProvider {
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub fn set_payment(&self, payment: ProviderPaymentDetails) {
        self.state.lock().unwrap().payments.insert(payment.payment_id.clone(), payment);
    }

    pub fn set_merchant_order(&self, order: MerchantOrderDetails) {
        self.state.lock().unwrap().merchant_orders.insert(order.merchant_order_id.clone(), order);
    }

    pub fn qr_requests(&self) -> Vec<QrOrderRequest> {
        self.state.lock().unwrap().qr_requests.clone()
    }

    pub fn fetches(&self) -> usize {
        self.state.lock().unwrap().fetches
    }
}

impl PaymentProvider for FakeProvider {
    async fn create_qr_order(&self, request: &QrOrderRequest) -> Result<QrCode, ProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.offline {
            return Err(ProviderError::Transport("provider is offline".into()));
        }
        state.qr_requests.push(request.clone());
        Ok(QrCode::new(format!("QR-{}", request.external_reference)))
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<ProviderPaymentDetails, ProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.offline {
            return Err(ProviderError::Transport("provider is offline".into()));
        }
        state.fetches += 1;
        state
            .payments
            .get(payment_id)
            .cloned()
            .ok_or_else(|| ProviderError::Rejected { status: 404, message: "Payment not found".into() })
    }

    async fn fetch_merchant_order(&self, merchant_order_id: &str) -> Result<MerchantOrderDetails, ProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.offline {
            return Err(ProviderError::Transport("provider is offline".into()));
        }
        state.fetches += 1;
        state
            .merchant_orders
            .get(merchant_order_id)
            .cloned()
            .ok_or_else(|| ProviderError::Rejected { status: 404, message: "Merchant order not found".into() })
    }
}

/// An in-memory order service that records every status update it receives.
#[derive(Debug, Clone, Default)]
pub struct FakeOrderService {
    state: Arc<Mutex<OrderServiceState>>,
}

#[derive(Debug, Default)]
struct OrderServiceState {
    offline: bool,
    updates: Vec<(String, String)>,
}

impl FakeOrderService {
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub fn updates(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().updates.clone()
    }
}

impl OrderService for FakeOrderService {
    async fn update_order_status(&self, order_id: &str, status: &str) -> Result<Value, OrderServiceError> {
        let mut state = self.state.lock().unwrap();
        if state.offline {
            return Err(OrderServiceError::Transport("order service is offline".into()));
        }
        state.updates.push((order_id.to_string(), status.to_string()));
        Ok(json!({ "orderId": order_id, "status": status }))
    }

    async fn fetch_orders_by_status(&self, status: &str) -> Result<Value, OrderServiceError> {
        let state = self.state.lock().unwrap();
        let orders = state
            .updates
            .iter()
            .filter(|(_, s)| s == status)
            .map(|(id, s)| json!({ "orderId": id, "status": s }))
            .collect::<Vec<_>>();
        Ok(Value::Array(orders))
    }
}
