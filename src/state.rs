//! TTL-bounded shared state
//!
//! The host platform's object cache and transient store are rendered here
//! as in-process TTL caches. Get/set are atomic per entry; there is no
//! transactional guarantee, and a benign double-populate race between two
//! concurrent callers is tolerated.

use moka::future::Cache;
use std::hash::Hash;
use std::time::Duration;

/// Name of the schema-check throttle flag
const SCHEMA_CHECK_FLAG: &str = "schema_check";

/// Generic TTL cache wrapper using Moka
#[derive(Clone)]
pub struct TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    cache: Cache<K, V>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { cache }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: K, value: V) {
        self.cache.insert(key, value).await;
    }
}

/// Short-lived flag gating repeated schema checks. Once set, it is a hard
/// gate: all schema work is skipped until the TTL expires.
#[derive(Clone)]
pub struct ThrottleFlag {
    cache: TtlCache<String, bool>,
}

impl ThrottleFlag {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(1, ttl),
        }
    }

    pub async fn is_set(&self) -> bool {
        self.cache.get(&SCHEMA_CHECK_FLAG.to_string()).await.is_some()
    }

    pub async fn set(&self) {
        self.cache.insert(SCHEMA_CHECK_FLAG.to_string(), true).await;
    }
}
