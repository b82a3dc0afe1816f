mod cache;
pub mod keys;
mod observer;

pub use cache::{FetchFuture, Fetcher, QueryClient, QueryOptions, QuerySpec, QueryStatus, Refetch};
pub use keys::{QueryKey, Segment};
pub use observer::QueryObserver;
