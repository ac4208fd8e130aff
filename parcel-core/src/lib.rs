pub mod models;
pub mod repository;

pub use models::{GeoPoint, Order, OrderId, OrderStatus};
pub use repository::{InMemoryOrderRepository, OrderRepository, RepositoryResult};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Malformed order payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),
    #[error("Duplicate order id: {0}")]
    DuplicateOrderId(OrderId),
}

pub type CoreResult<T> = Result<T, CoreError>;
