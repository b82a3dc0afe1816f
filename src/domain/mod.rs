mod account;
mod balance;
mod check_in;
mod cli;
mod ids;
mod notification;
mod provider;
mod proxy;

pub use account::{
    Account, AccountDetail, ApiToken, BatchImportResult, CreateAccountInput, ImportItemResult,
    UpdateAccountInput,
};
pub use balance::{Balance, BalanceStatistics, ProviderBalance};
pub use check_in::{
    AccountCheckIn, BatchCheckInResult, CheckInHistoryPage, CheckInRecord, CheckInResult,
    CheckInStreak,
};
pub use cli::{CliTool, ModelCompatibility};
pub use ids::{AccountId, ChannelId, ProviderId};
pub use notification::{
    ChannelConfig, ChannelConfigError, ChannelInput, DingTalkConfig, EmailConfig, FeishuConfig,
    NotificationChannel, RawNotificationChannel,
};
pub use provider::{
    NodeKind, NodeListError, Provider, ProviderInput, ProviderNode, ProviderNodes, RawProviderNode,
};
pub use proxy::{ProxyConfig, ProxyType};
