// accounts
pub const GET_ALL_ACCOUNTS: &str = "get_all_accounts";
pub const GET_ACCOUNT_DETAIL: &str = "get_account_detail";
pub const CREATE_ACCOUNT: &str = "create_account";
pub const UPDATE_ACCOUNT: &str = "update_account";
pub const DELETE_ACCOUNT: &str = "delete_account";
pub const TOGGLE_ACCOUNT: &str = "toggle_account";
pub const IMPORT_ACCOUNT_FROM_JSON: &str = "import_account_from_json";
pub const IMPORT_ACCOUNTS_BATCH: &str = "import_accounts_batch";
pub const EXPORT_ACCOUNTS_TO_JSON: &str = "export_accounts_to_json";
pub const FETCH_ACCOUNT_TOKENS: &str = "fetch_account_tokens";

// balances
pub const FETCH_ACCOUNT_BALANCE: &str = "fetch_account_balance";
pub const FETCH_ACCOUNTS_BALANCES: &str = "fetch_accounts_balances";
pub const GET_BALANCE_STATISTICS: &str = "get_balance_statistics";

// check-in
pub const EXECUTE_CHECK_IN: &str = "execute_check_in";
pub const EXECUTE_BATCH_CHECK_IN: &str = "execute_batch_check_in";
pub const GET_CHECK_IN_HISTORY: &str = "get_check_in_history";
pub const GET_CHECK_IN_STREAK: &str = "get_check_in_streak";

// providers
pub const GET_ALL_PROVIDERS: &str = "get_all_providers";
pub const CREATE_PROVIDER: &str = "create_provider";
pub const UPDATE_PROVIDER: &str = "update_provider";
pub const DELETE_PROVIDER: &str = "delete_provider";
pub const GET_CACHED_PROVIDER_MODELS: &str = "get_cached_provider_models";
pub const REFRESH_PROVIDER_MODELS_WITH_WAF: &str = "refresh_provider_models_with_waf";
pub const GET_PROVIDER_NODES: &str = "get_provider_nodes";
pub const ADD_CUSTOM_NODE: &str = "add_custom_node";
pub const DELETE_CUSTOM_NODE: &str = "delete_custom_node";

// notification channels
pub const GET_ALL_NOTIFICATION_CHANNELS: &str = "get_all_notification_channels";
pub const CREATE_NOTIFICATION_CHANNEL: &str = "create_notification_channel";
pub const UPDATE_NOTIFICATION_CHANNEL: &str = "update_notification_channel";
pub const DELETE_NOTIFICATION_CHANNEL: &str = "delete_notification_channel";
pub const TEST_NOTIFICATION_CHANNEL: &str = "test_notification_channel";

// cli configuration
pub const CONFIGURE_CLAUDE_GLOBAL: &str = "configure_claude_global";
pub const CONFIGURE_CODEX_GLOBAL: &str = "configure_codex_global";
pub const GENERATE_CLAUDE_TEMP_COMMANDS: &str = "generate_claude_temp_commands";
pub const GENERATE_CODEX_TEMP_COMMANDS: &str = "generate_codex_temp_commands";
pub const CHECK_MODEL_COMPATIBILITY: &str = "check_model_compatibility";

// proxy
pub const GET_PROXY_CONFIG: &str = "get_proxy_config";
pub const UPDATE_PROXY_CONFIG: &str = "update_proxy_config";
