pub mod app_config;
pub mod file_repo;
pub mod http_repo;

use parcel_core::{CoreError, OrderRepository};
use std::sync::Arc;
use std::time::Duration;

pub use app_config::{Config, SourceConfig, SourceKind};
pub use file_repo::FileOrderRepository;
pub use http_repo::HttpOrderRepository;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to read order file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid order payload: {0}")]
    Payload(#[from] CoreError),
    #[error("Missing source setting: {0}")]
    MissingSetting(&'static str),
}

/// Build the order source selected in the `source` config section
pub fn build_repository(source: &SourceConfig) -> Result<Arc<dyn OrderRepository>, FetchError> {
    match source.kind {
        SourceKind::Http => {
            let url = source.url.as_deref().ok_or(FetchError::MissingSetting("source.url"))?;
            let repo = HttpOrderRepository::new(url, Duration::from_secs(source.timeout_secs))?;
            Ok(Arc::new(repo))
        }
        SourceKind::File => {
            let path = source.path.as_deref().ok_or(FetchError::MissingSetting("source.path"))?;
            Ok(Arc::new(FileOrderRepository::new(path)))
        }
    }
}
