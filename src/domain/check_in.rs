use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, Balance};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInResult {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub balance: Option<Balance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCheckInResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    #[serde(default)]
    pub results: Vec<AccountCheckIn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountCheckIn {
    pub account_id: AccountId,
    #[serde(default)]
    pub account_name: String,
    #[serde(flatten)]
    pub result: CheckInResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRecord {
    pub account_id: AccountId,
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub balance_delta: Option<f64>,
    pub executed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInHistoryPage {
    pub items: Vec<CheckInRecord>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInStreak {
    pub account_id: AccountId,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_check_in_days: u32,
    #[serde(default)]
    pub last_check_in_date: Option<NaiveDate>,
}
