use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::models::Order;

pub type RepositoryResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Source of the order snapshot shown by the dashboard.
///
/// Any failure is treated the same way by callers; implementations are free
/// to report whatever error they have.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn fetch_orders(&self) -> RepositoryResult<Vec<Order>>;
}

/// Fixed in-memory snapshot, used for demos and wiring tests
pub struct InMemoryOrderRepository {
    orders: Vec<Order>,
    fetches: AtomicUsize,
}

impl InMemoryOrderRepository {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of completed `fetch_orders` calls
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn fetch_orders(&self) -> RepositoryResult<Vec<Order>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.orders.clone())
    }
}
