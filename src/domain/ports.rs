use crate::domain::model::Record;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn table(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn retry_attempts(&self) -> u32;
    fn retry_delay(&self) -> Duration;
}

/// A read-only collection that can be queried one column at a time.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn select(&self, column: &str) -> Result<Vec<Record>>;
}
