use std::sync::Arc;

use log::*;
use payment_common::helpers::join_url;
use payment_engine::{OrderService, OrderServiceError};
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};

use crate::config::OrderServiceConfig;

/// REST client for the downstream order service.
#[derive(Clone)]
pub struct OrderServiceApi {
    base_url: String,
    client: Arc<Client>,
}

impl OrderServiceApi {
    pub fn new(config: &OrderServiceConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { base_url: config.url.clone(), client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, OrderServiceError> {
        let response = request.send().await.map_err(|e| OrderServiceError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| OrderServiceError::Transport(e.to_string()))?;
        if !status.is_success() {
            let message = String::from_utf8_lossy(&body).into_owned();
            return Err(OrderServiceError::Rejected { status: status.as_u16(), message });
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| OrderServiceError::InvalidResponse(e.to_string()))
    }
}

impl OrderService for OrderServiceApi {
    async fn update_order_status(&self, order_id: &str, status: &str) -> Result<Value, OrderServiceError> {
        let url = self.url(&format!("/orders/{}/status", urlencoding::encode(order_id)));
        trace!("📦️ PATCH {url}");
        self.send(self.client.patch(url).json(&json!({ "status": status }))).await
    }

    async fn fetch_orders_by_status(&self, status: &str) -> Result<Value, OrderServiceError> {
        let url = self.url(&format!("/orders/status/{}", urlencoding::encode(status)));
        trace!("📦️ GET {url}");
        self.send(self.client.get(url)).await
    }
}
