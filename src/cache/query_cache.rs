// ABOUTME: In-memory query cache with LRU bounds, freshness windows, and shared in-flight fetches
// ABOUTME: Includes background cleanup task for entries past their retention window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Receepee Contributors

use super::{QueryCacheConfig, QueryKey, QueryPolicy, QueryState};
use crate::errors::{AppError, AppResult};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use lru::LruCache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Serialized query result shared between the store and in-flight waiters
type Payload = Arc<Vec<u8>>;

/// A fetch every concurrent requester of the same key awaits
type SharedFetch = Shared<BoxFuture<'static, Result<Payload, AppError>>>;

struct InFlight {
    id: u64,
    fetch: SharedFetch,
}

/// Cached query with its last good data and last error
#[derive(Debug, Clone)]
struct QueryEntry {
    data: Option<Payload>,
    data_updated_at: Option<Instant>,
    error: Option<AppError>,
    last_accessed: Instant,
    retention: Duration,
}

impl QueryEntry {
    const fn empty(retention: Duration, now: Instant) -> Self {
        Self {
            data: None,
            data_updated_at: None,
            error: None,
            last_accessed: now,
            retention,
        }
    }

    fn is_fresh(&self, stale_time: Duration, now: Instant) -> bool {
        self.data.is_some()
            && self
                .data_updated_at
                .is_some_and(|updated| now.duration_since(updated) < stale_time)
    }

    fn is_unused(&self, now: Instant) -> bool {
        now.duration_since(self.last_accessed) >= self.retention
    }
}

struct Inner {
    store: RwLock<LruCache<QueryKey, QueryEntry>>,
    in_flight: Mutex<HashMap<QueryKey, InFlight>>,
    next_fetch_id: AtomicU64,
}

impl Inner {
    fn in_flight(&self) -> MutexGuard<'_, HashMap<QueryKey, InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the outcome of fetch `fetch_id` and release its in-flight slot
    async fn settle(
        &self,
        key: &QueryKey,
        policy: QueryPolicy,
        fetch_id: u64,
        outcome: &Result<Payload, AppError>,
    ) {
        let now = Instant::now();
        let mut store = self.store.write().await;
        let entry = store.get_or_insert_mut(key.clone(), || {
            QueryEntry::empty(policy.retention, now)
        });
        entry.last_accessed = now;
        entry.retention = policy.retention;

        match outcome {
            Ok(payload) => {
                entry.data = Some(Arc::clone(payload));
                entry.data_updated_at = Some(now);
                entry.error = None;
            }
            Err(error) => {
                warn!(key = %key, error = %error, "Query fetch failed, keeping previous data");
                entry.error = Some(error.clone());
            }
        }
        drop(store);

        let mut in_flight = self.in_flight();
        if in_flight
            .get(key)
            .is_some_and(|current| current.id == fetch_id)
        {
            in_flight.remove(key);
        }
    }
}

/// Keyed query cache with freshness/retention windows and request deduplication
///
/// - A key with fresh data is served from memory without calling the fetcher.
/// - Concurrent requests for the same key share one in-flight fetch.
/// - A failed fetch records the error but keeps the last good data.
/// - Entries not accessed within their retention window are discarded.
///
/// Cloning is cheap; clones share the same store. The background cleanup task
/// stops once the last clone is dropped.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
    _shutdown_tx: Option<Arc<mpsc::Sender<()>>>,
}

impl QueryCache {
    /// Default cache capacity when config specifies zero entries
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a new cache, spawning the cleanup task when enabled
    ///
    /// Background cleanup and fetching both require a running tokio runtime.
    #[must_use]
    pub fn new(config: QueryCacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CAPACITY);

        let inner = Arc::new(Inner {
            store: RwLock::new(LruCache::new(capacity)),
            in_flight: Mutex::new(HashMap::new()),
            next_fetch_id: AtomicU64::new(0),
        });

        let shutdown_tx = if config.enable_background_cleanup {
            let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
            let task_inner = Arc::clone(&inner);
            let cleanup_interval = config.cleanup_interval;

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(cleanup_interval);
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            Self::purge(&task_inner).await;
                        }
                        _ = shutdown_rx.recv() => {
                            debug!("Query cache cleanup task stopping");
                            break;
                        }
                    }
                }
            });

            Some(Arc::new(shutdown_tx))
        } else {
            None
        };

        Self {
            inner,
            _shutdown_tx: shutdown_tx,
        }
    }

    /// Return fresh cached data for `key`, or fetch it
    ///
    /// If a fetch for `key` is already in flight the caller awaits that one
    /// instead of issuing another.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error, or a serialization error if the value
    /// cannot round-trip through the store
    pub async fn fetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        policy: QueryPolicy,
        fetcher: F,
    ) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        if let Some(payload) = self.fresh_payload(key, policy).await {
            debug!(key = %key, "Query cache hit");
            return decode(&payload);
        }

        let payload = self.join_or_start(key, policy, fetcher).await?;
        decode(&payload)
    }

    /// Fetch `key` regardless of freshness
    ///
    /// Joins a fetch already in flight for the same key.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error, or a serialization error if the value
    /// cannot round-trip through the store
    pub async fn refetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        policy: QueryPolicy,
        fetcher: F,
    ) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        debug!(key = %key, "Forced refetch");
        let payload = self.join_or_start(key, policy, fetcher).await?;
        decode(&payload)
    }

    /// Observable state of `key` without touching its access time
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the stored data does not decode as `T`
    pub async fn state<T: DeserializeOwned>(&self, key: &QueryKey) -> AppResult<QueryState<T>> {
        let is_fetching = self.inner.in_flight().contains_key(key);
        let now = Instant::now();

        let store = self.inner.store.read().await;
        let Some(entry) = store.peek(key).filter(|entry| !entry.is_unused(now)) else {
            return Ok(QueryState {
                is_fetching,
                ..QueryState::default()
            });
        };

        let data = entry.data.as_deref().map(|bytes| decode(bytes)).transpose()?;
        Ok(QueryState {
            data,
            error: entry.error.clone(),
            is_fetching,
            data_updated_at: entry.data_updated_at,
        })
    }

    /// Last good data for `key`, fresh or stale
    pub async fn cached_data<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.state(key).await.ok().and_then(|state| state.data)
    }

    /// Drop the entry for `key`
    pub async fn invalidate(&self, key: &QueryKey) {
        self.inner.store.write().await.pop(key);
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.inner.store.write().await.clear();
    }

    /// Number of stored entries, including ones awaiting purge
    pub async fn len(&self) -> usize {
        self.inner.store.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove entries not accessed within their retention window
    pub async fn purge_unused(&self) -> usize {
        Self::purge(&self.inner).await
    }

    async fn purge(inner: &Inner) -> usize {
        let now = Instant::now();
        let mut store = inner.store.write().await;

        // Collect first, the store can't be modified while iterating
        let unused: Vec<QueryKey> = store
            .iter()
            .filter(|(_, entry)| entry.is_unused(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &unused {
            store.pop(key);
        }
        drop(store);

        if !unused.is_empty() {
            debug!(removed = unused.len(), "Purged unused query cache entries");
        }
        unused.len()
    }

    /// Fresh payload for `key`, touching its access time; drops entries past retention
    async fn fresh_payload(&self, key: &QueryKey, policy: QueryPolicy) -> Option<Payload> {
        let now = Instant::now();
        let mut store = self.inner.store.write().await;

        let entry = store.get_mut(key)?;
        if entry.is_unused(now) {
            store.pop(key);
            return None;
        }
        entry.last_accessed = now;
        entry.retention = policy.retention;

        if entry.is_fresh(policy.stale_time, now) {
            entry.data.clone()
        } else {
            None
        }
    }

    /// Join the fetch in flight for `key`, or spawn a new one
    ///
    /// The spawned task settles the store itself, so a caller dropped
    /// mid-fetch never leaves the key marked as fetching.
    fn join_or_start<T, F, Fut>(
        &self,
        key: &QueryKey,
        policy: QueryPolicy,
        fetcher: F,
    ) -> SharedFetch
    where
        T: Serialize + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        // Held until the entry is inserted; the task cannot settle before that
        let mut in_flight = self.inner.in_flight();
        if let Some(existing) = in_flight.get(key) {
            debug!(key = %key, fetch_id = existing.id, "Joining in-flight query");
            return existing.fetch.clone();
        }

        let fetch_id = self.inner.next_fetch_id.fetch_add(1, Ordering::Relaxed);
        let request = fetcher();
        let task_inner = Arc::clone(&self.inner);
        let task_key = key.clone();
        let task = tokio::spawn(async move {
            let outcome = request.await.and_then(|value| {
                serde_json::to_vec(&value)
                    .map(Arc::new)
                    .map_err(AppError::from)
            });
            task_inner
                .settle(&task_key, policy, fetch_id, &outcome)
                .await;
            outcome
        });

        let fetch: SharedFetch = task
            .map(|joined| {
                joined.unwrap_or_else(|e| {
                    Err(AppError::internal(format!("Query fetch task failed: {e}")))
                })
            })
            .boxed()
            .shared();

        in_flight.insert(
            key.clone(),
            InFlight {
                id: fetch_id,
                fetch: fetch.clone(),
            },
        );
        drop(in_flight);

        debug!(key = %key, fetch_id, "Query cache miss, fetching");
        fetch
    }
}

fn decode<T: DeserializeOwned>(payload: &[u8]) -> AppResult<T> {
    serde_json::from_slice(payload).map_err(AppError::from)
}
