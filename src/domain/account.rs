use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, Balance, ProviderId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub provider_id: ProviderId,
    #[serde(default)]
    pub provider_name: String,
    pub enabled: bool,
    #[serde(default)]
    pub auto_checkin_enabled: bool,
    #[serde(default)]
    pub auto_checkin_hour: u8,
    #[serde(default)]
    pub auto_checkin_minute: u8,
    #[serde(default)]
    pub balance: Option<Balance>,
    #[serde(default)]
    pub last_check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_balance_check_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetail {
    #[serde(flatten)]
    pub account: Account,
    #[serde(default)]
    pub cookies_count: usize,
    #[serde(default)]
    pub session_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_online: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountInput {
    pub name: String,
    pub provider_id: ProviderId,
    pub cookies: HashMap<String, String>,
    pub api_user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_checkin_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_checkin_hour: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_checkin_minute: Option<u8>,
}

/// Partial update, absent fields are left untouched by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAccountInput {
    pub account_id: AccountId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_checkin_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_checkin_hour: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_checkin_minute: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchImportResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    #[serde(default)]
    pub results: Vec<ImportItemResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportItemResult {
    pub success: bool,
    #[serde(default)]
    pub account_id: Option<AccountId>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BatchImportResult {
    pub fn imported_ids(&self) -> impl Iterator<Item = &AccountId> {
        self.results
            .iter()
            .filter(|r| r.success)
            .filter_map(|r| r.account_id.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiToken {
    pub id: i64,
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub used_quota: i64,
    #[serde(default)]
    pub remain_quota: i64,
    #[serde(default)]
    pub unlimited_quota: bool,
    #[serde(default)]
    pub expired_time: Option<i64>,
    #[serde(default)]
    pub model_limits: Vec<String>,
}
