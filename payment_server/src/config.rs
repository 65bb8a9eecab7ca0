use std::{env, time::Duration};

use log::*;
use mercadopago_tools::MercadoPagoConfig;
use payment_common::helpers::parse_boolean_flag;
use payment_engine::reconcile_objects::{OnReconcileFailure, ReconcilerOptions};

const DEFAULT_PAYMENT_HOST: &str = "127.0.0.1";
const DEFAULT_PAYMENT_PORT: u16 = 3001;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/payments.db";
const DEFAULT_ORDER_SERVICE_URL: &str = "http://localhost:3000";
const DEFAULT_ORDER_SERVICE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub mercadopago: MercadoPagoConfig,
    /// The public URL of this service's `/webhook` route. Mercado Pago posts payment notifications here.
    pub notification_url: String,
    pub order_service: OrderServiceConfig,
    /// If true, the reconciler returns failures as errors instead of `Failed` outcomes. The webhook is acknowledged
    /// either way.
    pub escalate_reconcile_failures: bool,
    /// If true, `merchant_order` notifications arriving on `/webhook` are reconciled as well.
    pub follow_merchant_orders: bool,
}

#[derive(Clone, Debug)]
pub struct OrderServiceConfig {
    /// e.g. "http://localhost:3000"
    pub url: String,
    pub timeout: Duration,
}

impl Default for OrderServiceConfig {
    fn default() -> Self {
        Self { url: DEFAULT_ORDER_SERVICE_URL.to_string(), timeout: DEFAULT_ORDER_SERVICE_TIMEOUT }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PAYMENT_HOST.to_string(),
            port: DEFAULT_PAYMENT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            mercadopago: MercadoPagoConfig::default(),
            notification_url: String::default(),
            order_service: OrderServiceConfig::default(),
            escalate_reconcile_failures: false,
            follow_merchant_orders: false,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("PAYMENT_HOST").ok().unwrap_or_else(|| DEFAULT_PAYMENT_HOST.into());
        let port = env::var("PAYMENT_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for PAYMENT_PORT. {e} Using the default, {DEFAULT_PAYMENT_PORT}, \
                         instead."
                    );
                    DEFAULT_PAYMENT_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_PAYMENT_PORT);
        let database_url = env::var("PAYMENT_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ PAYMENT_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let mercadopago = MercadoPagoConfig::new_from_env_or_default();
        let notification_url = env::var("MERCADOPAGO_NOTIFICATION_URL").ok().unwrap_or_else(|| {
            warn!(
                "🪛️ MERCADOPAGO_NOTIFICATION_URL is not set. QR orders will be created without a notification URL, \
                 and Mercado Pago will only notify the URL configured on the account."
            );
            String::default()
        });
        let order_service = OrderServiceConfig::from_env_or_default();
        let escalate_reconcile_failures =
            parse_boolean_flag(env::var("PAYMENT_ESCALATE_RECONCILE_FAILURES").ok(), false);
        let follow_merchant_orders = parse_boolean_flag(env::var("PAYMENT_FOLLOW_MERCHANT_ORDERS").ok(), false);
        Self {
            host,
            port,
            database_url,
            mercadopago,
            notification_url,
            order_service,
            escalate_reconcile_failures,
            follow_merchant_orders,
        }
    }

    pub fn reconciler_options(&self) -> ReconcilerOptions {
        let on_failure =
            if self.escalate_reconcile_failures { OnReconcileFailure::Escalate } else { OnReconcileFailure::Log };
        ReconcilerOptions { on_failure, follow_merchant_orders: self.follow_merchant_orders }
    }
}

impl OrderServiceConfig {
    pub fn from_env_or_default() -> Self {
        let url = env::var("ORDER_SERVICE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ ORDER_SERVICE_URL is not set. Using the default, {DEFAULT_ORDER_SERVICE_URL}.");
            DEFAULT_ORDER_SERVICE_URL.to_string()
        });
        let timeout = env::var("ORDER_SERVICE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for ORDER_SERVICE_TIMEOUT_SECS. {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_ORDER_SERVICE_TIMEOUT);
        Self { url: url.trim_end_matches('/').to_string(), timeout }
    }
}
