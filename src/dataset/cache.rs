use std::sync::{Arc, Mutex, PoisonError, TryLockError};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::dataset::{CountrySource, FallbackStore, RawCountry, Snapshot, SnapshotOrigin};
use crate::error::Unavailable;

/// Cache timing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// How long a snapshot is fresh before a refresh is attempted.
    pub ttl: Duration,
    /// Minimum age of the fallback copy before a successful fetch rewrites
    /// it. `Duration::ZERO` rewrites after every fetch.
    pub fallback_refresh: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings { ttl: Duration::from_secs(6 * 60 * 60), fallback_refresh: Duration::from_secs(7 * 24 * 60 * 60) }
    }
}

/// Thread-safe country dataset with lazy, single-flight refresh.
///
/// Reads are lock-free (`ArcSwapOption`); every reader gets an owned
/// `Arc<Snapshot>` that stays consistent even if a refresh swaps in new data.
/// Writes are serialized by `refresh`: while one caller fetches, others are
/// served the previous snapshot, or wait if there is none yet.
pub struct DatasetCache<S, F> {
    source: S,
    fallback: F,
    settings: CacheSettings,
    current: ArcSwapOption<Snapshot>,
    refresh: Mutex<()>,
}

impl<S: CountrySource, F: FallbackStore> DatasetCache<S, F> {
    pub fn new(source: S, fallback: F, settings: CacheSettings) -> Self {
        DatasetCache { source, fallback, settings, current: ArcSwapOption::empty(), refresh: Mutex::new(()) }
    }

    pub fn settings(&self) -> CacheSettings {
        self.settings
    }

    /// Current snapshot without triggering any refresh.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    pub fn get_dataset(&self) -> Result<Arc<Snapshot>, Unavailable> {
        self.get_dataset_at(Utc::now())
    }

    /// [`get_dataset`](Self::get_dataset) with an explicit reference time.
    pub fn get_dataset_at(&self, now: DateTime<Utc>) -> Result<Arc<Snapshot>, Unavailable> {
        if let Some(snapshot) = self.current.load_full() {
            if snapshot.is_fresh_at(now, self.settings.ttl) {
                return Ok(snapshot);
            }
            return Ok(self.revalidate(snapshot, now));
        }
        self.cold_start(now)
    }

    /// Load once and log the outcome. Never fails.
    pub fn warm(&self) {
        match self.get_dataset() {
            Ok(snapshot) => info!(countries = snapshot.len(), origin = ?snapshot.origin(), "country cache warmed"),
            Err(err) => warn!(error = %err, "country cache warm failed"),
        }
    }

    fn revalidate(&self, stale: Arc<Snapshot>, now: DateTime<Utc>) -> Arc<Snapshot> {
        let _guard = match self.refresh.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                debug!("refresh already in flight, serving previous snapshot");
                return stale;
            }
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };

        // Another caller may have refreshed between our read and the lock.
        let latest = self.current.load_full().unwrap_or(stale);
        if latest.is_fresh_at(now, self.settings.ttl) {
            return latest;
        }

        match self.fetch_upstream(now) {
            Some(fresh) => fresh,
            None => {
                warn!(fetched_at = %latest.fetched_at(), origin = ?latest.origin(), "upstream refresh failed, serving stale snapshot");
                latest
            }
        }
    }

    fn cold_start(&self, now: DateTime<Utc>) -> Result<Arc<Snapshot>, Unavailable> {
        let _guard = self.refresh.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(snapshot) = self.current.load_full() {
            return Ok(snapshot);
        }
        if let Some(fresh) = self.fetch_upstream(now) {
            return Ok(fresh);
        }
        if let Some(fallback) = self.load_fallback(now) {
            return Ok(fallback);
        }

        error!("no country dataset available from upstream or fallback");
        Err(Unavailable)
    }

    /// Must be called with `refresh` held.
    fn fetch_upstream(&self, now: DateTime<Utc>) -> Option<Arc<Snapshot>> {
        info!("refreshing country dataset from upstream");
        let listing = match self.source.fetch() {
            Ok(listing) => listing,
            Err(err) => {
                warn!(error = %err, "country listing fetch failed");
                return None;
            }
        };

        let snapshot = Snapshot::from_listing(&listing, now, SnapshotOrigin::Upstream);
        if snapshot.is_empty() {
            warn!(records = listing.len(), "upstream listing had no usable countries");
            return None;
        }

        let snapshot = Arc::new(snapshot);
        self.current.store(Some(Arc::clone(&snapshot)));
        info!(countries = snapshot.len(), "country dataset refreshed");

        self.persist_fallback(&listing);
        Some(snapshot)
    }

    fn persist_fallback(&self, listing: &[RawCountry]) {
        let due = self.fallback.age().is_none_or(|age| age >= self.settings.fallback_refresh);
        if !due {
            debug!("fallback copy is recent, not rewriting");
            return;
        }
        match self.fallback.save(listing) {
            Ok(()) => info!(records = listing.len(), "refreshed fallback country listing"),
            Err(err) => warn!(error = %err, "failed to refresh fallback country listing"),
        }
    }

    /// Must be called with `refresh` held.
    fn load_fallback(&self, now: DateTime<Utc>) -> Option<Arc<Snapshot>> {
        let listing = match self.fallback.load() {
            Ok(Some(listing)) => listing,
            Ok(None) => {
                warn!("no fallback country listing stored");
                return None;
            }
            Err(err) => {
                warn!(error = %err, "failed to load fallback country listing");
                return None;
            }
        };

        let snapshot = Snapshot::from_listing(&listing, now, SnapshotOrigin::Fallback);
        if snapshot.is_empty() {
            warn!("fallback country listing had no usable countries");
            return None;
        }

        let snapshot = Arc::new(snapshot);
        self.current.store(Some(Arc::clone(&snapshot)));
        warn!(countries = snapshot.len(), "loaded countries from fallback listing");
        Some(snapshot)
    }
}
