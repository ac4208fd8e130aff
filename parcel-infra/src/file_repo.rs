use async_trait::async_trait;
use parcel_core::{Order, OrderRepository, RepositoryResult};
use std::path::PathBuf;
use tracing::debug;

use crate::FetchError;

/// Reads the order snapshot from a JSON file on disk
pub struct FileOrderRepository {
    path: PathBuf,
}

impl FileOrderRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<Vec<Order>, FetchError> {
        debug!("Reading orders from {}", self.path.display());
        let raw = tokio::fs::read(&self.path).await?;
        Ok(Order::decode_collection(&raw)?)
    }
}

#[async_trait]
impl OrderRepository for FileOrderRepository {
    async fn fetch_orders(&self) -> RepositoryResult<Vec<Order>> {
        Ok(self.read().await?)
    }
}
