use crate::domain::model::{RawSource, SourceSpec, VerifiedDigits};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Persistent store for raw downloaded page bodies, keyed by source URL.
pub trait CacheStore: Send + Sync {
    fn read(&self, url: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn write(
        &self,
        url: &str,
        content: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn sources(&self) -> Vec<SourceSpec>;
    fn target_places(&self) -> usize;
    fn cache_dir(&self) -> &str;
    /// None disables the reference table comparison.
    fn reference_path(&self) -> Option<&str>;
    fn json_report(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawSource>>;
    async fn transform(&self, data: Vec<RawSource>) -> Result<VerifiedDigits>;
    async fn load(&self, result: VerifiedDigits) -> Result<String>;
}
