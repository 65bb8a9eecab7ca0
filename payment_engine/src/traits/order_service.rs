use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderServiceError {
    #[error("Could not reach the order service. {0}")]
    Transport(String),
    #[error("The order service responded with status {status}. {message}")]
    Rejected { status: u16, message: String },
    #[error("The order service sent a response that could not be understood. {0}")]
    InvalidResponse(String),
}

/// The downstream order service. Status strings are forwarded verbatim.
#[allow(async_fn_in_trait)]
pub trait OrderService {
    /// Sets the status of `order_id`. Returns whatever the order service sent back.
    async fn update_order_status(&self, order_id: &str, status: &str) -> Result<Value, OrderServiceError>;

    /// Lists the orders currently in `status`.
    async fn fetch_orders_by_status(&self, status: &str) -> Result<Value, OrderServiceError>;
}
