//! Client-side data layer for the account and token manager: a typed command
//! client, a query cache keyed by hierarchical keys, and mutations that keep
//! the cache consistent after every backend write.

pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod hub;
pub mod invalidate;
pub mod mutation;
pub mod notify;
pub mod query;
pub mod resources;

pub use command::CommandClient;
pub use config::Settings;
pub use error::{AppError, CommandError, Severity};
pub use hub::Hub;
pub use invalidate::Invalidator;
pub use mutation::{Mutation, MutationDescriptor, MutationStatus, mutation};
pub use notify::{LogNotifier, Notifier};
pub use query::{QueryClient, QueryKey, QueryObserver, QuerySpec, QueryStatus, Refetch};

/// Install the fmt subscriber. Fails if a global subscriber is already set.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
