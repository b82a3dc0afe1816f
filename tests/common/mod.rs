#![allow(dead_code)]

use std::sync::Arc;

use account_hub::{Hub, Settings};

pub mod mock_backend;
pub mod mock_notifier;

pub use mock_backend::MockBackend;
pub use mock_notifier::{Notice, RecordingNotifier};

/// Settings under which seeded entries stay fresh until invalidated
pub fn never_stale() -> Settings {
    Settings {
        stale_time: None,
        ..Settings::default()
    }
}

pub fn hub_with(settings: Settings) -> (Hub, Arc<MockBackend>, Arc<RecordingNotifier>) {
    let backend = Arc::new(MockBackend::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let hub = Hub::new(backend.clone(), notifier.clone(), settings);
    (hub, backend, notifier)
}

pub fn hub() -> (Hub, Arc<MockBackend>, Arc<RecordingNotifier>) {
    hub_with(never_stale())
}

/// Give spawned refetches a chance to run on the current-thread runtime
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
