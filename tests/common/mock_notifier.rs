use std::sync::Mutex;

use account_hub::{AppError, Notifier, QueryClient, QueryKey};

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String, String),
}

/// Records every notification. When watching a key it also records whether
/// that key was stale at the moment of each notification.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
    watch: Mutex<Option<(QueryClient, QueryKey)>>,
    stale_at_notice: Mutex<Vec<bool>>,
}

impl RecordingNotifier {
    pub fn watch(&self, queries: QueryClient, key: QueryKey) {
        *self.watch.lock().unwrap() = Some((queries, key));
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Success(key) => Some(key),
                Notice::Error(..) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<(String, String)> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Error(key, message) => Some((key, message)),
                Notice::Success(_) => None,
            })
            .collect()
    }

    pub fn stale_at_notice(&self) -> Vec<bool> {
        self.stale_at_notice.lock().unwrap().clone()
    }

    fn record(&self, notice: Notice) {
        if let Some((queries, key)) = self.watch.lock().unwrap().as_ref() {
            self.stale_at_notice
                .lock()
                .unwrap()
                .push(queries.is_stale(key));
        }
        self.notices.lock().unwrap().push(notice);
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message_key: &str) {
        self.record(Notice::Success(message_key.to_string()));
    }

    fn error(&self, message_key: &str, error: &AppError) {
        self.record(Notice::Error(message_key.to_string(), error.message.clone()));
    }
}
