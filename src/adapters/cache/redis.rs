use crate::adapters::cache::TokenCache;
use crate::domain::AccessToken;
use crate::error::CacheError;
use ::redis::AsyncCommands;
use ::redis::aio::ConnectionManager;
use async_trait::async_trait;
use std::time::Duration;

/// Token cache shared between processes through Redis.
#[derive(Clone)]
pub struct RedisTokenCache {
    conn: ConnectionManager,
    prefix: String,
}

impl std::fmt::Debug for RedisTokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTokenCache").field("prefix", &self.prefix).finish_non_exhaustive()
    }
}

impl RedisTokenCache {
    /// Connects to Redis at `url`.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the connection fails.
    pub async fn connect(url: &str, prefix: String) -> Result<Self, CacheError> {
        let client = ::redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn, prefix })
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn get(&self, key: &str) -> Result<Option<AccessToken>, CacheError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(self.full_key(key)).await?;
        raw.map(|value| serde_json::from_str(&value)).transpose().map_err(CacheError::from)
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn has(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(self.full_key(key)).await?;
        Ok(exists)
    }

    #[tracing::instrument(level = "debug", skip(self, token), err)]
    async fn put(&self, key: &str, token: &AccessToken, ttl: Duration) -> Result<(), CacheError> {
        let payload = serde_json::to_string(token)?;
        // SETEX rejects a zero TTL.
        let ttl_secs = ttl.as_secs().max(1);
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(self.full_key(key), payload, ttl_secs).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(self.full_key(key)).await?;
        Ok(())
    }
}
