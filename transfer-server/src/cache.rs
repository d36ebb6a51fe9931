//! Caching layer for TRA transfer queries.
//!
//! A day's transfer timetable changes rarely, and the TRA site is slow, so
//! parsed results are kept for half an hour per query. Only successful
//! parses are cached; failures are retried on the next request.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::TransferRecord;
use crate::tra::{TraClient, TraError, TransferQuery};

/// Cached result for one query.
type RecordsEntry = Arc<Vec<TransferRecord>>;

/// Default time-to-live, which is also what the HTTP layer advertises in
/// `Cache-Control`.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_capacity: 256,
        }
    }
}

/// Cache of parsed transfer records, keyed by query.
pub struct RecordCache {
    records: MokaCache<TransferQuery, RecordsEntry>,
}

impl RecordCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let records = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { records }
    }

    /// Get a cached entry.
    pub async fn get(&self, key: &TransferQuery) -> Option<RecordsEntry> {
        self.records.get(key).await
    }

    /// Insert an entry.
    pub async fn insert(&self, key: TransferQuery, entry: RecordsEntry) {
        self.records.insert(key, entry).await;
    }
}

/// TRA client with caching.
pub struct CachedTraClient {
    client: TraClient,
    cache: RecordCache,
}

impl CachedTraClient {
    /// Create a new cached client.
    pub fn new(client: TraClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: RecordCache::new(cache_config),
        }
    }

    /// Get the transfer records for a query, using the cache if possible.
    pub async fn get_records(&self, query: &TransferQuery) -> Result<RecordsEntry, TraError> {
        if let Some(cached) = self.cache.get(query).await {
            debug!(direction = %query.direction, date = %query.date, "cache hit");
            return Ok(cached);
        }

        debug!(direction = %query.direction, date = %query.date, "cache miss");
        let records = Arc::new(self.client.fetch_records(query).await?);
        self.cache.insert(query.clone(), records.clone()).await;

        Ok(records)
    }
}
