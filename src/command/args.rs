use serde::Serialize;

use crate::domain::{
    AccountId, ChannelId, ChannelInput, CliTool, CreateAccountInput, ProviderId, ProviderInput,
    ProxyConfig, UpdateAccountInput,
};

#[derive(Debug, Clone, Serialize)]
pub struct NoArgs {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountArgs {
    pub account_id: AccountId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsArgs {
    pub enabled_only: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAccountArgs {
    pub input: CreateAccountInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateAccountArgs {
    pub input: UpdateAccountInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleAccountArgs {
    pub account_id: AccountId,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportJsonArgs {
    pub json_data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportAccountsArgs {
    pub account_ids: Vec<AccountId>,
    pub include_credentials: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchAccountArgs {
    pub account_id: AccountId,
    pub force_refresh: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchAccountsArgs {
    pub account_ids: Vec<AccountId>,
    pub force_refresh: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCheckInArgs {
    pub account_ids: Vec<AccountId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInHistoryArgs {
    pub account_id: AccountId,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderArgs {
    pub provider_id: ProviderId,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateProviderArgs {
    pub input: ProviderInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProviderArgs {
    pub provider_id: ProviderId,
    pub input: ProviderInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshModelsArgs {
    pub provider_id: ProviderId,
    pub account_id: AccountId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCustomNodeArgs {
    pub provider_id: ProviderId,
    pub name: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCustomNodeArgs {
    pub provider_id: ProviderId,
    pub node_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelArgs {
    pub channel_id: ChannelId,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateChannelArgs {
    pub input: ChannelInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChannelArgs {
    pub channel_id: ChannelId,
    pub input: ChannelInput,
}

/// Arguments shared by the global and temporary CLI configuration commands
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfigArgs {
    pub token_id: i64,
    pub account_id: AccountId,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCompatibilityArgs {
    pub tool: CliTool,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProxyArgs {
    pub input: ProxyConfig,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn field_names_match_the_backend() {
        let args = FetchAccountArgs {
            account_id: AccountId::new("acct-1"),
            force_refresh: true,
        };
        assert_eq!(
            serde_json::to_value(args).unwrap(),
            json!({ "accountId": "acct-1", "forceRefresh": true })
        );

        let args = ChannelArgs {
            channel_id: ChannelId::new("ch-9"),
        };
        assert_eq!(
            serde_json::to_value(args).unwrap(),
            json!({ "channelId": "ch-9" })
        );

        assert_eq!(serde_json::to_value(NoArgs {}).unwrap(), json!({}));
    }
}
