use mockall::mock;
use serde_json::Value;

use crate::{
    db_types::{NewPaymentRecord, PaymentRecord, PaymentStatus},
    traits::{
        MerchantOrderDetails,
        OrderService,
        OrderServiceError,
        PaymentProvider,
        PaymentStore,
        ProviderError,
        ProviderPaymentDetails,
        QrCode,
        QrOrderRequest,
        StoreError,
    },
};

mock! {
    pub Provider {}
    impl PaymentProvider for Provider {
        async fn create_qr_order(&self, request: &QrOrderRequest) -> Result<QrCode, ProviderError>;
        async fn fetch_payment(&self, payment_id: &str) -> Result<ProviderPaymentDetails, ProviderError>;
        async fn fetch_merchant_order(&self, merchant_order_id: &str) -> Result<MerchantOrderDetails, ProviderError>;
    }
}

mock! {
    pub Orders {}
    impl OrderService for Orders {
        async fn update_order_status(&self, order_id: &str, status: &str) -> Result<Value, OrderServiceError>;
        async fn fetch_orders_by_status(&self, status: &str) -> Result<Value, OrderServiceError>;
    }
}

mock! {
    pub Store {}
    impl PaymentStore for Store {
        async fn insert_payment(&self, payment: NewPaymentRecord) -> Result<PaymentRecord, StoreError>;
        async fn fetch_payment(&self, id: i64) -> Result<Option<PaymentRecord>, StoreError>;
        async fn fetch_payment_by_order_id(&self, order_id: &str) -> Result<Option<PaymentRecord>, StoreError>;
        async fn mark_payment_status(&self, order_id: &str, status: PaymentStatus) -> Result<u64, StoreError>;
    }
}

/// A stored record built from `payment`, as a store would return it.
pub fn saved_record(payment: &NewPaymentRecord) -> PaymentRecord {
    let now = chrono::Utc::now();
    PaymentRecord {
        id: 1,
        order_id: payment.order_id.clone(),
        client_id: payment.client_id.clone(),
        products: payment.products().to_vec(),
        amount: payment.amount(),
        status: PaymentStatus::Pending,
        qr_code: payment.qr_code.clone(),
        created_at: now,
        updated_at: now,
    }
}
