//! Named invalidation routines.
//!
//! Each routine maps a resource id to the cache scopes a successful write to
//! that resource leaves stale. They run synchronously inside a mutation's
//! success path, before any notification, so the next read after a dialog
//! closes already sees stale entries.

use crate::{
    domain::{AccountId, ProviderId},
    query::{QueryClient, QueryKey, Refetch, keys},
};

#[derive(Clone)]
pub struct Invalidator {
    queries: QueryClient,
    refetch: Refetch,
}

impl Invalidator {
    pub fn new(queries: QueryClient, refetch: Refetch) -> Self {
        Self { queries, refetch }
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    /// Invalidate arbitrary scopes with this invalidator's refetch policy
    pub fn keys(&self, prefixes: &[QueryKey]) -> Vec<QueryKey> {
        prefixes
            .iter()
            .flat_map(|prefix| self.queries.invalidate(prefix, self.refetch))
            .collect()
    }

    /// The account's detail scope, which covers its balance and tokens
    pub fn invalidate_account(&self, id: &AccountId) -> Vec<QueryKey> {
        self.queries.invalidate(&keys::accounts::detail(id), self.refetch)
    }

    /// Account lists and the balance aggregate. Mounted ones always refetch
    /// immediately so visible lists update without waiting for a remount.
    pub fn invalidate_all_accounts(&self) -> Vec<QueryKey> {
        let mut matched = self
            .queries
            .invalidate(&keys::accounts::lists(), Refetch::Active);
        matched.extend(
            self.queries
                .invalidate(&keys::balance_statistics(), Refetch::Active),
        );
        matched
    }

    /// A check-in moves balance, enabled/streak state and history together
    pub fn invalidate_after_check_in(&self, id: &AccountId) -> Vec<QueryKey> {
        let mut matched = self.invalidate_account(id);
        matched.extend(self.invalidate_all_accounts());
        matched.extend(self.queries.invalidate(&keys::check_in::all(), self.refetch));
        matched
    }

    pub fn invalidate_provider(&self, id: Option<&ProviderId>) -> Vec<QueryKey> {
        let mut matched = self
            .queries
            .invalidate(&keys::providers::list(), self.refetch);
        if let Some(id) = id {
            matched.extend(
                self.queries
                    .invalidate(&keys::providers::detail(id), self.refetch),
            );
        }
        matched
    }

    pub fn invalidate_provider_models(&self, id: &ProviderId) -> Vec<QueryKey> {
        self.queries
            .invalidate(&keys::provider_models(id), self.refetch)
    }

    pub fn invalidate_provider_nodes(&self, id: &ProviderId) -> Vec<QueryKey> {
        self.queries
            .invalidate(&keys::provider_nodes(id), self.refetch)
    }

    pub fn invalidate_notification_channels(&self) -> Vec<QueryKey> {
        self.queries
            .invalidate(&keys::notification_channels(), self.refetch)
    }

    pub fn invalidate_proxy_config(&self) -> Vec<QueryKey> {
        self.queries.invalidate(&keys::proxy_config(), self.refetch)
    }
}
