use std::{future::Future, marker::PhantomData, pin::Pin, sync::Arc, time::Duration};

use dashmap::DashMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::{task::JoinHandle, time::Instant};

use crate::{command::decode, config::Settings, error::AppError, query::QueryKey};

pub type FetchFuture = Pin<Box<dyn Future<Output = Result<Value, AppError>> + Send>>;
pub type Fetcher = Arc<dyn Fn() -> FetchFuture + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Fresh,
    Stale,
    Fetching,
}

/// What to do with matching queries after marking them stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refetch {
    None,
    /// Refetch queries that currently have an observer
    Active,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// `None` never goes stale on its own, only through invalidation
    pub stale_time: Option<Duration>,
    pub retry: u32,
}

impl QueryOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            stale_time: settings.stale_time,
            retry: settings.query_retry,
        }
    }

    pub fn never_stale(mut self) -> Self {
        self.stale_time = None;
        self
    }

    pub fn stale_after(mut self, stale_time: Duration) -> Self {
        self.stale_time = Some(stale_time);
        self
    }

    pub fn retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }
}

/// Everything needed to read one query: its key, its options and how to fetch it
pub struct QuerySpec<T> {
    pub(crate) key: QueryKey,
    pub(crate) options: QueryOptions,
    pub(crate) fetcher: Fetcher,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for QuerySpec<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            options: self.options.clone(),
            fetcher: self.fetcher.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> QuerySpec<T> {
    pub fn new<F, Fut>(key: QueryKey, options: QueryOptions, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, AppError>> + Send + 'static,
    {
        Self {
            key,
            options,
            fetcher: Arc::new(move || Box::pin(fetch()) as FetchFuture),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    pub fn with_options(mut self, f: impl FnOnce(QueryOptions) -> QueryOptions) -> Self {
        self.options = f(self.options);
        self
    }
}

struct QueryEntry {
    data: Option<Value>,
    error: Option<AppError>,
    invalidated: bool,
    fetching: bool,
    updated_at: Option<Instant>,
    last_used: Instant,
    observers: usize,
    options: QueryOptions,
    fetcher: Option<Fetcher>,
    /// Bumped by every invalidation; a fetch only clears `invalidated` if this
    /// has not moved since it started
    generation: u64,
    /// A mounted query was invalidated while fetching and needs one more round
    refetch_queued: bool,
}

impl QueryEntry {
    fn new(options: QueryOptions) -> Self {
        Self {
            data: None,
            error: None,
            invalidated: false,
            fetching: false,
            updated_at: None,
            last_used: Instant::now(),
            observers: 0,
            options,
            fetcher: None,
            generation: 0,
            refetch_queued: false,
        }
    }

    fn is_stale(&self, now: Instant) -> bool {
        if self.invalidated || self.data.is_none() {
            return true;
        }
        match (self.options.stale_time, self.updated_at) {
            (None, _) => false,
            (Some(stale_time), Some(updated_at)) => now.duration_since(updated_at) >= stale_time,
            (Some(_), None) => true,
        }
    }

    fn status(&self, now: Instant) -> QueryStatus {
        if self.fetching {
            QueryStatus::Fetching
        } else if self.is_stale(now) {
            QueryStatus::Stale
        } else {
            QueryStatus::Fresh
        }
    }
}

type Entries = Arc<DashMap<QueryKey, QueryEntry>>;

/// Owns the `fetching` flag of one entry for the duration of a fetch. Dropping
/// it before the fetch settles (a cancelled caller, a timeout) clears the flag.
struct FetchGuard {
    entries: Entries,
    key: QueryKey,
    armed: bool,
}

impl FetchGuard {
    fn new(entries: &Entries, key: &QueryKey) -> Self {
        Self {
            entries: entries.clone(),
            key: key.clone(),
            armed: true,
        }
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(mut entry) = self.entries.get_mut(&self.key) {
            entry.fetching = false;
            entry.refetch_queued = false;
        }
        tracing::debug!(key = %self.key, "fetch dropped before it settled");
    }
}

/// Shared store of query results.
///
/// Cloning is cheap and every clone sees the same entries.
#[derive(Clone)]
pub struct QueryClient {
    entries: Entries,
    defaults: QueryOptions,
    gc_time: Duration,
}

impl QueryClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            defaults: QueryOptions::from_settings(settings),
            gc_time: settings.gc_time,
        }
    }

    pub fn default_options(&self) -> QueryOptions {
        self.defaults.clone()
    }

    /// Cached data when it is still fresh, otherwise fetch and store it
    #[tracing::instrument(name = "query::fetch", skip_all, fields(key = %spec.key))]
    pub async fn fetch<T: DeserializeOwned>(&self, spec: &QuerySpec<T>) -> Result<T, AppError> {
        let generation = {
            let now = Instant::now();
            let mut entry = self
                .entries
                .entry(spec.key.clone())
                .or_insert_with(|| QueryEntry::new(spec.options.clone()));
            entry.last_used = now;
            entry.options = spec.options.clone();

            if !entry.is_stale(now) {
                if let Some(data) = &entry.data {
                    tracing::trace!("cache hit");
                    return decode(data.clone());
                }
            }
            entry.fetching = true;
            entry.generation
        };

        let guard = FetchGuard::new(&self.entries, &spec.key);
        let value = self
            .run_fetch(guard, generation, spec.options.retry, &spec.fetcher)
            .await?;
        decode(value)
    }

    /// Fetch regardless of staleness
    #[tracing::instrument(name = "query::refetch", skip_all, fields(key = %spec.key))]
    pub async fn refetch<T: DeserializeOwned>(&self, spec: &QuerySpec<T>) -> Result<T, AppError> {
        let generation = {
            let mut entry = self
                .entries
                .entry(spec.key.clone())
                .or_insert_with(|| QueryEntry::new(spec.options.clone()));
            entry.last_used = Instant::now();
            entry.fetching = true;
            entry.generation
        };

        let guard = FetchGuard::new(&self.entries, &spec.key);
        let value = self
            .run_fetch(guard, generation, spec.options.retry, &spec.fetcher)
            .await?;
        decode(value)
    }

    /// Run the fetcher with retries and store the outcome. Data fetched before
    /// an invalidation is stored but stays stale; a mounted query invalidated
    /// mid-fetch goes round once more and returns the newer result.
    async fn run_fetch(
        &self,
        mut guard: FetchGuard,
        mut generation: u64,
        retry: u32,
        fetcher: &Fetcher,
    ) -> Result<Value, AppError> {
        let key = guard.key.clone();
        loop {
            let mut attempt = 0;
            let result = loop {
                match fetcher().await {
                    Ok(value) => break Ok(value),
                    Err(e) if attempt < retry => {
                        attempt += 1;
                        tracing::warn!(key = %key, attempt, error = %e, "query failed, retrying");
                    }
                    Err(e) => break Err(e),
                }
            };

            // the entry may have been removed while the fetch was in flight
            let Some(mut entry) = self.entries.get_mut(&key) else {
                guard.armed = false;
                return result;
            };

            match &result {
                Ok(value) => {
                    let now = Instant::now();
                    entry.data = Some(value.clone());
                    entry.error = None;
                    entry.updated_at = Some(now);
                    entry.last_used = now;
                    if entry.generation == generation {
                        entry.invalidated = false;
                    } else {
                        tracing::debug!(key = %key, "invalidated while fetching, result kept stale");
                    }
                }
                Err(e) => {
                    tracing::error!(key = %key, error = %e, "query failed");
                    entry.error = Some(e.clone());
                }
            }

            if entry.refetch_queued && entry.observers > 0 {
                entry.refetch_queued = false;
                generation = entry.generation;
                tracing::debug!(key = %key, "running queued refetch");
                continue;
            }

            entry.refetch_queued = false;
            entry.fetching = false;
            guard.armed = false;
            return result;
        }
    }

    /// Mark every query under `prefix` stale. Mounted ones are refetched in the
    /// background when `refetch` is [`Refetch::Active`]; the refetch is
    /// dispatched, never awaited.
    #[tracing::instrument(name = "query::invalidate", skip_all, fields(prefix = %prefix, ?refetch))]
    pub fn invalidate(&self, prefix: &QueryKey, refetch: Refetch) -> Vec<QueryKey> {
        let mut matched = Vec::new();
        let mut dispatch = Vec::new();
        let can_spawn = tokio::runtime::Handle::try_current().is_ok();

        for mut entry in self.entries.iter_mut() {
            if !entry.key().starts_with(prefix) {
                continue;
            }
            let key = entry.key().clone();
            let entry = entry.value_mut();
            entry.invalidated = true;

            entry.generation += 1;

            if refetch == Refetch::Active && entry.observers > 0 && can_spawn {
                if entry.fetching {
                    // the running fetch picks this up when it lands
                    entry.refetch_queued = true;
                } else if let Some(fetcher) = entry.fetcher.clone() {
                    entry.fetching = true;
                    dispatch.push((
                        FetchGuard::new(&self.entries, &key),
                        entry.generation,
                        fetcher,
                        entry.options.retry,
                    ));
                }
            }
            matched.push(key);
        }

        if refetch == Refetch::Active && !can_spawn {
            tracing::debug!("no runtime available, active queries stay stale until next read");
        }

        for (guard, generation, fetcher, retry) in dispatch {
            let client = self.clone();
            tokio::spawn(async move {
                // failures are recorded on the entry by run_fetch
                let _ = client.run_fetch(guard, generation, retry, &fetcher).await;
            });
        }

        tracing::debug!(matched = matched.len(), "invalidated");
        matched
    }

    /// Write a value straight into a slot, as if it had just been fetched
    #[tracing::instrument(name = "query::set_query_data", skip_all, fields(key = %key))]
    pub fn set_query_data<T: Serialize>(&self, key: &QueryKey, value: &T) -> Result<(), AppError> {
        let value = serde_json::to_value(value)?;
        let now = Instant::now();
        let mut entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| QueryEntry::new(self.defaults.clone()));
        entry.data = Some(value);
        entry.error = None;
        entry.invalidated = false;
        entry.updated_at = Some(now);
        entry.last_used = now;
        Ok(())
    }

    /// Read whatever is cached without fetching
    pub fn get_query_data<T: DeserializeOwned>(&self, key: &QueryKey) -> Result<Option<T>, AppError> {
        let data = self.entries.get(key).and_then(|e| e.data.clone());
        data.map(decode).transpose()
    }

    pub fn status(&self, key: &QueryKey) -> Option<QueryStatus> {
        let now = Instant::now();
        self.entries.get(key).map(|e| e.status(now))
    }

    /// False for keys that were never fetched or written
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        let now = Instant::now();
        self.entries.get(key).is_some_and(|e| e.is_stale(now))
    }

    pub fn last_error(&self, key: &QueryKey) -> Option<AppError> {
        self.entries.get(key).and_then(|e| e.error.clone())
    }

    pub fn observer_count(&self, key: &QueryKey) -> usize {
        self.entries.get(key).map(|e| e.observers).unwrap_or(0)
    }

    /// Drop every entry under `prefix`
    pub fn remove(&self, prefix: &QueryKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        before.saturating_sub(self.entries.len())
    }

    /// Drop entries that have had no observer for longer than the gc time
    pub fn gc(&self) -> usize {
        let now = Instant::now();
        let gc_time = self.gc_time;
        let before = self.entries.len();
        self.entries.retain(|_, e| {
            e.observers > 0 || e.fetching || now.duration_since(e.last_used) < gc_time
        });
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::debug!(removed, "collected idle queries");
        }
        removed
    }

    /// Run [`QueryClient::gc`] periodically until the handle is aborted
    pub fn spawn_gc(&self, every: Duration) -> JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            let mut timer = tokio::time::interval(every);
            loop {
                timer.tick().await;
                client.gc();
            }
        })
    }

    pub fn keys(&self) -> Vec<QueryKey> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn mount(&self, key: &QueryKey, options: &QueryOptions, fetcher: &Fetcher) {
        let mut entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| QueryEntry::new(options.clone()));
        entry.observers += 1;
        entry.options = options.clone();
        entry.fetcher = Some(fetcher.clone());
        entry.last_used = Instant::now();
    }

    pub(crate) fn unmount(&self, key: &QueryKey) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.observers = entry.observers.saturating_sub(1);
            if entry.observers == 0 {
                entry.fetcher = None;
            }
            entry.last_used = Instant::now();
        }
    }
}
