// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Cache-first reads.
//!
//! A cached value is returned right away and a refresh is started in the
//! background; only a cold cache makes the caller wait on the network.
//!
//! Refreshes of the same kind are not de-duplicated. When two overlap, the
//! one that finishes last owns the cache slot, whichever was started first.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::error::{ApiError, CacheError};
use crate::models::{BadgeCounts, TradeRecord};
use crate::remote::RemoteSource;

/// Selects the cache slot and the remote operation for one kind of data.
#[async_trait]
pub trait DataKind: Send + Sync + 'static {
    type Value: Serialize + DeserializeOwned + Send + Sync + 'static;

    const NAME: &'static str;
    const CACHE_KEY: &'static str;

    async fn fetch_remote(remote: &dyn RemoteSource) -> Result<Self::Value, ApiError>;
}

pub struct TradeRecords;

#[async_trait]
impl DataKind for TradeRecords {
    type Value = Vec<TradeRecord>;

    const NAME: &'static str = "trade_records";
    const CACHE_KEY: &'static str = "trade_records";

    async fn fetch_remote(remote: &dyn RemoteSource) -> Result<Self::Value, ApiError> {
        let dtos = remote.fetch_trade_records().await?;
        Ok(dtos.into_iter().map(TradeRecord::from).collect())
    }
}

pub struct Badges;

#[async_trait]
impl DataKind for Badges {
    type Value = BadgeCounts;

    const NAME: &'static str = "badge_counts";
    const CACHE_KEY: &'static str = "badge_counts";

    async fn fetch_remote(remote: &dyn RemoteSource) -> Result<Self::Value, ApiError> {
        let dto = remote.fetch_badge_counts().await?;
        BadgeCounts::try_from(dto)
    }
}

/// Dropping the synchronizer aborts any refresh still in flight.
pub struct Synchronizer {
    cache: Arc<dyn CacheStore>,
    remote: Arc<dyn RemoteSource>,
    refreshes: Mutex<JoinSet<()>>,
}

impl Synchronizer {
    pub fn new(cache: Arc<dyn CacheStore>, remote: Arc<dyn RemoteSource>) -> Self {
        Synchronizer {
            cache,
            remote,
            refreshes: Mutex::new(JoinSet::new()),
        }
    }

    pub async fn fetch<K: DataKind>(&self) -> Result<K::Value, ApiError> {
        if let Some(cached) = read_cached::<K>(self.cache.as_ref()) {
            debug!(kind = K::NAME, "cache hit; refreshing in background");
            self.spawn_refresh::<K>();
            return Ok(cached);
        }

        debug!(kind = K::NAME, "cache miss; fetching from remote");
        let fresh = K::fetch_remote(self.remote.as_ref()).await?;
        write_cached::<K>(self.cache.as_ref(), &fresh);
        Ok(fresh)
    }

    /// Drop the cached slot so the next `fetch` goes to the remote.
    pub fn clear<K: DataKind>(&self) -> Result<(), CacheError> {
        self.cache.clear(K::CACHE_KEY)
    }

    /// Number of background refreshes not yet finished.
    pub fn pending(&self) -> usize {
        let mut set = self.tasks();
        reap(&mut set);
        set.len()
    }

    /// Wait for every background refresh, including ones started while
    /// waiting.
    pub async fn drain(&self) {
        loop {
            let mut set = std::mem::take(&mut *self.tasks());
            if set.is_empty() {
                return;
            }
            while let Some(res) = set.join_next().await {
                log_join(res);
            }
        }
    }

    /// Abort outstanding refreshes and wait for them to stop.
    pub async fn shutdown(&self) {
        let mut set = std::mem::take(&mut *self.tasks());
        let n = set.len();
        set.shutdown().await;
        if n > 0 {
            debug!(aborted = n, "background refreshes stopped");
        }
    }

    fn tasks(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.refreshes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn_refresh<K: DataKind>(&self) {
        let cache = Arc::clone(&self.cache);
        let remote = Arc::clone(&self.remote);
        let mut set = self.tasks();
        reap(&mut set);
        set.spawn(async move {
            match K::fetch_remote(remote.as_ref()).await {
                Ok(fresh) => {
                    write_cached::<K>(cache.as_ref(), &fresh);
                    debug!(kind = K::NAME, "background refresh stored");
                }
                Err(e) => {
                    warn!(kind = K::NAME, error = %e, "background refresh failed; keeping cached value");
                }
            }
        });
    }
}

fn reap(set: &mut JoinSet<()>) {
    while let Some(res) = set.try_join_next() {
        log_join(res);
    }
}

fn log_join(res: Result<(), JoinError>) {
    if let Err(e) = res {
        if e.is_panic() {
            warn!(error = %e, "background refresh panicked");
        }
    }
}

fn read_cached<K: DataKind>(cache: &dyn CacheStore) -> Option<K::Value> {
    let bytes = match cache.get(K::CACHE_KEY) {
        Ok(Some(b)) => b,
        Ok(None) => return None,
        Err(e) => {
            warn!(kind = K::NAME, error = %e, "cache read failed; treating as miss");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(kind = K::NAME, error = %e, "cached value unreadable; treating as miss");
            None
        }
    }
}

fn write_cached<K: DataKind>(cache: &dyn CacheStore, value: &K::Value) {
    let res = serde_json::to_vec(value)
        .map_err(CacheError::from)
        .and_then(|bytes| cache.set(K::CACHE_KEY, &bytes));
    if let Err(e) = res {
        warn!(kind = K::NAME, error = %e, "cache write failed");
    }
}
