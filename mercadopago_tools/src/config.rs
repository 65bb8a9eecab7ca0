use std::time::Duration;

use log::*;
use payment_common::Secret;

pub const DEFAULT_MERCADOPAGO_BASE_URL: &str = "https://api.mercadopago.com";
pub const DEFAULT_COLLECTOR_ID: &str = "2023202558";
pub const DEFAULT_POS_ID: &str = "FIAP2POS001";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct MercadoPagoConfig {
    /// The root of the Mercado Pago REST API, without a trailing slash. e.g. "https://api.mercadopago.com"
    pub base_url: String,
    pub access_token: Secret<String>,
    /// The seller (collector) user id that owns the point of sale
    pub collector_id: String,
    /// The external id of the point of sale that displays the QR codes
    pub pos_id: String,
    /// Upper bound on every request made to Mercado Pago
    pub timeout: Duration,
}

impl Default for MercadoPagoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MERCADOPAGO_BASE_URL.to_string(),
            access_token: Secret::default(),
            collector_id: DEFAULT_COLLECTOR_ID.to_string(),
            pos_id: DEFAULT_POS_ID.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl MercadoPagoConfig {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: Secret::new(access_token.to_string()),
            ..Default::default()
        }
    }

    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("MERCADOPAGO_BASE_URL").unwrap_or_else(|_| {
            info!("🪛️ MERCADOPAGO_BASE_URL not set, using {DEFAULT_MERCADOPAGO_BASE_URL}");
            DEFAULT_MERCADOPAGO_BASE_URL.to_string()
        });
        let access_token = Secret::new(std::env::var("MERCADOPAGO_ACCESS_TOKEN").unwrap_or_else(|_| {
            error!(
                "🪛️ MERCADOPAGO_ACCESS_TOKEN is not set. Every call to Mercado Pago will be rejected until it is \
                 configured."
            );
            String::default()
        }));
        let collector_id = std::env::var("MERCADOPAGO_COLLECTOR_ID").unwrap_or_else(|_| {
            warn!("🪛️ MERCADOPAGO_COLLECTOR_ID not set, using {DEFAULT_COLLECTOR_ID} as default");
            DEFAULT_COLLECTOR_ID.to_string()
        });
        let pos_id = std::env::var("MERCADOPAGO_POS_ID").unwrap_or_else(|_| {
            warn!("🪛️ MERCADOPAGO_POS_ID not set, using {DEFAULT_POS_ID} as default");
            DEFAULT_POS_ID.to_string()
        });
        let timeout = std::env::var("MERCADOPAGO_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid value for MERCADOPAGO_TIMEOUT_SECS ({s}). {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self { base_url: base_url.trim_end_matches('/').to_string(), access_token, collector_id, pos_id, timeout }
    }
}
