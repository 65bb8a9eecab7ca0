use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::MercadoPagoConfig,
    data_objects::{MerchantOrder, Payment, QrOrder, QrOrderResponse},
    MercadoPagoApiError,
};

#[derive(Clone)]
pub struct MercadoPagoApi {
    config: MercadoPagoConfig,
    client: Arc<Client>,
}

impl MercadoPagoApi {
    pub fn new(config: MercadoPagoConfig) -> Result<Self, MercadoPagoApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.access_token.reveal()))
            .map_err(|e| MercadoPagoApiError::Initialization(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| MercadoPagoApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &MercadoPagoConfig {
        &self.config
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, MercadoPagoApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {method} {url}");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| MercadoPagoApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| MercadoPagoApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| MercadoPagoApiError::RestResponseError(e.to_string()))?;
            Err(MercadoPagoApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Creates (or replaces) the order displayed on the configured point of sale and returns its QR payload.
    pub async fn create_qr_order(&self, order: &QrOrder) -> Result<QrOrderResponse, MercadoPagoApiError> {
        let path = format!(
            "/instore/orders/qr/seller/collectors/{}/pos/{}/qrs",
            self.config.collector_id, self.config.pos_id
        );
        debug!("Creating QR order for external reference {}", order.external_reference);
        let result = self.rest_query::<QrOrderResponse, &QrOrder>(Method::POST, &path, Some(order)).await?;
        info!("QR order created for external reference {}", order.external_reference);
        Ok(result)
    }

    /// `payment_id` usually comes from an unauthenticated webhook, so it is always percent-encoded into a single path
    /// segment.
    pub async fn fetch_payment(&self, payment_id: &str) -> Result<Payment, MercadoPagoApiError> {
        let path = format!("/v1/payments/{}", urlencoding::encode(payment_id));
        debug!("Fetching payment #{payment_id}");
        let result = self.rest_query::<Payment, ()>(Method::GET, &path, None).await?;
        debug!("Fetched payment #{payment_id}. Status: {}", result.status);
        Ok(result)
    }

    pub async fn fetch_merchant_order(&self, merchant_order_id: &str) -> Result<MerchantOrder, MercadoPagoApiError> {
        let path = format!("/merchant_orders/{}", urlencoding::encode(merchant_order_id));
        debug!("Fetching merchant order #{merchant_order_id}");
        let result = self.rest_query::<MerchantOrder, ()>(Method::GET, &path, None).await?;
        debug!("Fetched merchant order #{merchant_order_id}. Status: {}", result.status);
        Ok(result)
    }
}
