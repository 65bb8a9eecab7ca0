use std::fmt::Debug;

use log::*;
use serde_json::Value;

use crate::{
    pe_api::errors::RelayError,
    traits::{OrderService, OrderServiceError},
};

/// `OrderStatusRelay` forwards order status changes to the downstream order service.
///
/// Status strings are passed through unchanged. The relay does not retry; a failed update is reported to the caller.
pub struct OrderStatusRelay<O> {
    service: O,
}

impl<O> Debug for OrderStatusRelay<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderStatusRelay")
    }
}

impl<O> OrderStatusRelay<O> {
    pub fn new(service: O) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &O {
        &self.service
    }
}

impl<O> OrderStatusRelay<O>
where O: OrderService
{
    pub async fn update_order_status(&self, order_id: &str, status: &str) -> Result<Value, RelayError> {
        trace!("📦️ Relaying status '{status}' for order {order_id}");
        let response = self.service.update_order_status(order_id, status).await.map_err(|source| {
            error!("📦️ Failed to update status for order {order_id}. {source}");
            RelayError { order_id: order_id.to_string(), status: status.to_string(), source }
        })?;
        info!("📦️ Order {order_id} status updated to '{status}'");
        Ok(response)
    }

    pub async fn fetch_orders_by_status(&self, status: &str) -> Result<Value, OrderServiceError> {
        trace!("📦️ Fetching orders with status '{status}'");
        self.service.fetch_orders_by_status(status).await.map_err(|e| {
            error!("📦️ Failed to fetch orders with status '{status}'. {e}");
            e
        })
    }
}
