//! Concrete implementations for external systems: the on-disk page cache
//! and the HTTP fetcher layered on top of it.

use crate::domain::ports::{CacheStore, Fetcher};
use crate::utils::error::Result;
use async_trait::async_trait;
use md5::{Digest, Md5};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Browser identification sent with every request; some digit pages answer
/// 403 to non-browser clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// File-backed cache keyed by an MD5 hash of the source URL. Entries never
/// expire and are never invalidated automatically.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let hash = hex::encode(Md5::digest(url.as_bytes()));
        self.dir.join(format!("pi_{}.html", hash))
    }
}

impl CacheStore for FileCache {
    async fn read(&self, url: &str) -> Result<Option<String>> {
        let path = self.entry_path(url);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(content))
    }

    async fn write(&self, url: &str, content: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.entry_path(url), content)?;
        Ok(())
    }
}

/// HTTP fetcher that consults the cache before going to the network and
/// stores every successful download back into it.
pub struct CachingFetcher<C: CacheStore> {
    client: reqwest::Client,
    cache: C,
}

impl<C: CacheStore> CachingFetcher<C> {
    pub fn new(cache: C) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, cache })
    }
}

#[async_trait]
impl<C: CacheStore> Fetcher for CachingFetcher<C> {
    async fn fetch(&self, url: &str) -> Result<String> {
        if let Some(content) = self.cache.read(url).await? {
            tracing::info!("using cached copy of {}", url);
            return Ok(content);
        }

        tracing::info!("downloading {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let content = response.text().await?;

        self.cache.write(url, &content).await?;
        tracing::debug!("cached {} ({} bytes)", url, content.len());

        Ok(content)
    }
}
