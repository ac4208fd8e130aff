use async_trait::async_trait;
use parcel_core::{Order, OrderRepository, RepositoryResult};
use std::time::Duration;
use tracing::debug;

use crate::FetchError;

/// Fetches the order snapshot from an HTTP endpoint returning a JSON array
pub struct HttpOrderRepository {
    http: reqwest::Client,
    url: String,
}

impl HttpOrderRepository {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    async fn fetch(&self) -> Result<Vec<Order>, FetchError> {
        debug!("GET {}", self.url);
        let body = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(Order::decode_collection(&body)?)
    }
}

#[async_trait]
impl OrderRepository for HttpOrderRepository {
    async fn fetch_orders(&self) -> RepositoryResult<Vec<Order>> {
        Ok(self.fetch().await?)
    }
}
