use cucumber::World;
use log::*;
use payment_engine::{
    payment_objects::PaymentQr,
    reconcile_objects::{ReconcileOutcome, ReconcilerOptions},
    NotificationReconciler,
    OrderStatusRelay,
    PaymentFlowError,
    PaymentOrchestrator,
    ReconcileError,
    SqliteDatabase,
};

use super::fakes::{FakeOrderService, FakeProvider};
use crate::support::prepare_env::prepare_test_env;

#[derive(Default, Debug, World)]
pub struct PaymentWorld {
    pub system: Option<PaymentSystem>,
}

#[derive(Debug)]
pub struct PaymentSystem {
    pub db_path: String,
    pub db: SqliteDatabase,
    pub provider: FakeProvider,
    pub orders: FakeOrderService,
    pub options: ReconcilerOptions,
    pub last_checkout: Option<Result<PaymentQr, PaymentFlowError>>,
    pub last_outcome: Option<Result<ReconcileOutcome, ReconcileError>>,
}

impl PaymentWorld {
    pub fn system(&mut self) -> &mut PaymentSystem {
        self.system.as_mut().expect("Payment system not initialised")
    }
}

impl PaymentSystem {
    pub async fn new() -> Self {
        let url = prepare_test_env().await;
        let db = SqliteDatabase::new_with_url(&url, 1).await.expect("Error creating connection to database");
        debug!("Created database: {url}");
        Self {
            db_path: url,
            db,
            provider: FakeProvider::default(),
            orders: FakeOrderService::default(),
            options: ReconcilerOptions::default(),
            last_checkout: None,
            last_outcome: None,
        }
    }

    pub fn orchestrator(&self) -> PaymentOrchestrator<FakeProvider, SqliteDatabase> {
        PaymentOrchestrator::new(self.provider.clone(), self.db.clone(), "https://payments.example.com/webhook")
    }

    pub fn reconciler(&self) -> NotificationReconciler<FakeProvider, FakeOrderService, SqliteDatabase> {
        NotificationReconciler::new(self.provider.clone(), self.orders.clone(), self.db.clone(), self.options)
    }

    pub fn relay(&self) -> OrderStatusRelay<FakeOrderService> {
        OrderStatusRelay::new(self.orders.clone())
    }
}
