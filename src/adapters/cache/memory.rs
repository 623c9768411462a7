use crate::adapters::cache::TokenCache;
use crate::domain::AccessToken;
use crate::error::CacheError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    token: AccessToken,
    evict_at: Instant,
}

/// Process-local token cache. Entries are evicted lazily on read.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenCache {
    entries: Arc<DashMap<String, Entry>>,
}

impl MemoryTokenCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl TokenCache for MemoryTokenCache {
    async fn get(&self, key: &str) -> Result<Option<AccessToken>, CacheError> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.evict_at > now {
                return Ok(Some(entry.token.clone()));
            }
        }
        self.entries.remove_if(key, |_, entry| entry.evict_at <= now);
        Ok(None)
    }

    async fn put(&self, key: &str, token: &AccessToken, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), Entry { token: token.clone(), evict_at: Instant::now() + ttl });
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}
