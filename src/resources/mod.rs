//! Read and write operations per resource, composed from query specs and
//! mutation descriptors. Queries are returned as [`crate::query::QuerySpec`]s
//! so callers choose between a one-off `fetch` and a mounted `observe`.

pub mod accounts;
pub mod balances;
pub mod check_in;
pub mod cli_config;
pub mod notifications;
pub mod providers;
pub mod proxy;
