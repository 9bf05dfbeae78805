use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `body` under `key` with a public-read policy.
    async fn put_public(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()>;

    /// URL the object stored under `key` is served from.
    fn public_url(&self, key: &str) -> String;
}
