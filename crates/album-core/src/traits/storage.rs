//! Blob store trait - opaque-key object storage for uploaded media bytes

use async_trait::async_trait;

use crate::traits::RepoResult;

/// Object storage addressed by opaque string keys
///
/// Keys are derived by the upload coordinator and treated as locators only;
/// nothing else about their shape is assumed.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload raw bytes at the given key, overwriting any previous blob
    async fn put(&self, key: &str, bytes: &[u8]) -> RepoResult<()>;

    /// Fetch the blob at the given key
    async fn fetch(&self, key: &str) -> RepoResult<Vec<u8>>;

    /// Delete the blob at the given key; deleting a missing key is not an error
    async fn delete(&self, key: &str) -> RepoResult<()>;

    /// Resolve the public URL a browser can load the blob from
    fn public_url(&self, key: &str) -> String;
}
