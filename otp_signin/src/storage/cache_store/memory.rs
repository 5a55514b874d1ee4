use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheStore, InMemoryCacheStore};

const CACHE_PREFIX: &str = "cache";

impl InMemoryCacheStore {
    pub(crate) fn new() -> Self {
        tracing::info!("Creating new in-memory generic cache store");
        Self {
            entry: HashMap::new(),
        }
    }

    fn make_key(prefix: &str, key: &str) -> String {
        format!("{CACHE_PREFIX}:{prefix}:{key}")
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(()) // Nothing to initialize for in-memory store
    }

    async fn put(&mut self, prefix: &str, key: &str, value: CacheData) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        self.entry.insert(key, (value, None));
        Ok(())
    }

    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        let expires = Instant::now() + Duration::from_secs(ttl as u64);
        self.entry.insert(key, (value, Some(expires)));
        Ok(())
    }

    async fn get(&mut self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let key = Self::make_key(prefix, key);
        match self.entry.get(&key) {
            Some((_, Some(expires))) if *expires <= Instant::now() => {
                self.entry.remove(&key);
                Ok(None)
            }
            Some((data, _)) => Ok(Some(data.clone())),
            None => Ok(None),
        }
    }

    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        self.entry.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key() {
        // Given a prefix and key
        let prefix = "session";
        let key = "user123";

        // When creating a key
        let result = InMemoryCacheStore::make_key(prefix, key);

        // Then it should be formatted correctly
        assert_eq!(result, "cache:session:user123");
    }

    #[tokio::test]
    async fn test_init() {
        let store = InMemoryCacheStore::new();
        assert!(store.init().await.is_ok());
    }

    #[tokio::test]
    async fn test_put_and_get() {
        // Given an in-memory cache store
        let mut store = InMemoryCacheStore::new();
        let value = CacheData {
            value: "test value".to_string(),
        };

        // When putting a value
        store
            .put("test", "key1", value.clone())
            .await
            .expect("put failed");

        // Then getting it back should return the stored value
        let retrieved = store.get("test", "key1").await.expect("get failed");
        assert_eq!(retrieved.expect("missing value").value, "test value");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let mut store = InMemoryCacheStore::new();
        let retrieved = store.get("test", "nope").await.expect("get failed");
        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let mut store = InMemoryCacheStore::new();
        let value = CacheData {
            value: "to be removed".to_string(),
        };
        store.put("test", "key2", value).await.expect("put failed");

        store.remove("test", "key2").await.expect("remove failed");

        let retrieved = store.get("test", "key2").await.expect("get failed");
        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn test_remove_nonexistent_is_ok() {
        let mut store = InMemoryCacheStore::new();
        assert!(store.remove("test", "ghost").await.is_ok());
    }

    #[tokio::test]
    async fn test_ttl_expiry_evicts_entry() {
        // Given a value stored with a zero-second TTL
        let mut store = InMemoryCacheStore::new();
        let value = CacheData {
            value: "short lived".to_string(),
        };
        store
            .put_with_ttl("test", "key3", value, 0)
            .await
            .expect("put failed");

        // When reading it back after the TTL has elapsed
        tokio::time::sleep(Duration::from_millis(10)).await;
        let retrieved = store.get("test", "key3").await.expect("get failed");

        // Then it should have been evicted
        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn test_ttl_not_yet_expired() {
        let mut store = InMemoryCacheStore::new();
        let value = CacheData {
            value: "still alive".to_string(),
        };
        store
            .put_with_ttl("test", "key4", value, 300)
            .await
            .expect("put failed");

        let retrieved = store.get("test", "key4").await.expect("get failed");
        assert_eq!(retrieved.expect("missing value").value, "still alive");
    }

    #[tokio::test]
    async fn test_prefixes_are_isolated() {
        // Given the same key under two prefixes
        let mut store = InMemoryCacheStore::new();
        store
            .put(
                "signin",
                "shared",
                CacheData {
                    value: "a".to_string(),
                },
            )
            .await
            .expect("put failed");
        store
            .put(
                "session",
                "shared",
                CacheData {
                    value: "b".to_string(),
                },
            )
            .await
            .expect("put failed");

        // When removing one of them
        store.remove("signin", "shared").await.expect("remove failed");

        // Then the other should be untouched
        assert!(store.get("signin", "shared").await.expect("get").is_none());
        assert_eq!(
            store
                .get("session", "shared")
                .await
                .expect("get")
                .expect("missing")
                .value,
            "b"
        );
    }
}
