use crate::domain::AccessToken;
use crate::error::CacheError;
use async_trait::async_trait;
use std::time::Duration;

pub mod memory;
pub mod redis;

pub use self::memory::MemoryTokenCache;
pub use self::redis::RedisTokenCache;

/// Key/value store for access tokens with per-entry expiry.
///
/// Writers race freely: the last `put` for a key wins.
#[async_trait]
pub trait TokenCache: Send + Sync + std::fmt::Debug {
    /// Returns the token stored under `key`, if any.
    ///
    /// # Errors
    /// Returns an error if the backend is unreachable or holds an undecodable value.
    async fn get(&self, key: &str) -> Result<Option<AccessToken>, CacheError>;

    /// # Errors
    /// Returns an error if the backend is unreachable.
    async fn has(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Stores `token` under `key` for `ttl`.
    ///
    /// # Errors
    /// Returns an error if the backend is unreachable.
    async fn put(&self, key: &str, token: &AccessToken, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backend is unreachable.
    async fn invalidate(&self, key: &str) -> Result<(), CacheError>;
}
