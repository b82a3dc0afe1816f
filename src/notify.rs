use crate::error::AppError;

/// User-visible message sink. Messages are translation keys; resolving them
/// is up to the implementation.
pub trait Notifier: Send + Sync {
    fn success(&self, message_key: &str);

    fn error(&self, message_key: &str, error: &AppError);
}

/// Notifier that only writes to the log
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message_key: &str) {
        tracing::info!(message_key, "notify success");
    }

    fn error(&self, message_key: &str, error: &AppError) {
        tracing::warn!(message_key, error = %error, code = ?error.code, "notify error");
    }
}

pub mod messages {
    pub const COMMON_ERROR: &str = "common.error";

    pub const ACCOUNT_CREATED: &str = "accounts.created";
    pub const ACCOUNT_UPDATED: &str = "accounts.updated";
    pub const ACCOUNT_DELETED: &str = "accounts.deleted";
    pub const ACCOUNT_TOGGLED: &str = "accounts.toggled";
    pub const ACCOUNT_IMPORTED: &str = "accounts.imported";
    pub const ACCOUNTS_EXPORTED: &str = "accounts.exported";
    pub const ACCOUNT_IMPORT_FAILED: &str = "accounts.importFailed";

    pub const BALANCE_REFRESHED: &str = "balance.refreshed";
    pub const BALANCE_REFRESH_FAILED: &str = "balance.refreshFailed";

    pub const CHECK_IN_DONE: &str = "checkIn.success";
    pub const CHECK_IN_FAILED: &str = "checkIn.failed";
    pub const BATCH_CHECK_IN_DONE: &str = "checkIn.batchSuccess";

    pub const PROVIDER_CREATED: &str = "providers.created";
    pub const PROVIDER_UPDATED: &str = "providers.updated";
    pub const PROVIDER_DELETED: &str = "providers.deleted";
    pub const MODELS_REFRESHED: &str = "providers.modelsRefreshed";
    pub const NODE_ADDED: &str = "providers.nodeAdded";
    pub const NODE_DELETED: &str = "providers.nodeDeleted";

    pub const CHANNEL_SAVED: &str = "notifications.channelSaved";
    pub const CHANNEL_DELETED: &str = "notifications.channelDeleted";
    pub const CHANNEL_TEST_SENT: &str = "notifications.testSent";
    pub const CHANNEL_TEST_FAILED: &str = "notifications.testFailed";

    pub const CLI_CONFIGURED: &str = "cli.configured";
    pub const PROXY_SAVED: &str = "proxy.saved";
}
