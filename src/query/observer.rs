use serde::de::DeserializeOwned;

use crate::{
    error::AppError,
    query::{QueryClient, QueryKey, QuerySpec, QueryStatus},
};

/// A mounted query. While it lives the query counts as active, so
/// invalidations with [`crate::query::Refetch::Active`] refetch it right away.
/// Dropping it unmounts the query.
pub struct QueryObserver<T> {
    client: QueryClient,
    spec: QuerySpec<T>,
}

impl QueryClient {
    pub fn observe<T: DeserializeOwned>(&self, spec: QuerySpec<T>) -> QueryObserver<T> {
        self.mount(&spec.key, &spec.options, &spec.fetcher);
        tracing::debug!(key = %spec.key, "query mounted");

        QueryObserver {
            client: self.clone(),
            spec,
        }
    }
}

impl<T: DeserializeOwned> QueryObserver<T> {
    pub fn key(&self) -> &QueryKey {
        &self.spec.key
    }

    /// Last cached value, if any
    pub fn data(&self) -> Result<Option<T>, AppError> {
        self.client.get_query_data(&self.spec.key)
    }

    pub fn status(&self) -> Option<QueryStatus> {
        self.client.status(&self.spec.key)
    }

    pub fn is_stale(&self) -> bool {
        self.client.is_stale(&self.spec.key)
    }

    pub fn error(&self) -> Option<AppError> {
        self.client.last_error(&self.spec.key)
    }

    /// Read through the cache, fetching when stale
    pub async fn fetch(&self) -> Result<T, AppError> {
        self.client.fetch(&self.spec).await
    }

    pub async fn refetch(&self) -> Result<T, AppError> {
        self.client.refetch(&self.spec).await
    }
}

impl<T> Drop for QueryObserver<T> {
    fn drop(&mut self) {
        self.client.unmount(&self.spec.key);
        tracing::debug!(key = %self.spec.key, "query unmounted");
    }
}
