use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable key/value backend holding raw snapshot bytes.
pub trait Storage: Send + Sync {
    /// Returns `None` when nothing is stored under `key`.
    fn read(&self, key: &str) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write(&self, key: &str, data: &[u8]) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where the initial catalogue comes from when storage is empty.
#[async_trait]
pub trait SeedSource: Send + Sync {
    async fn fetch(&self) -> Result<serde_json::Value>;

    fn describe(&self) -> String;
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self, prefix: &str) -> String;
}
