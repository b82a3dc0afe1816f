use serde::{Deserialize, Serialize};

use super::ProviderId;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Balance {
    pub current_balance: f64,
    pub total_consumed: f64,
    pub total_income: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BalanceStatistics {
    #[serde(default)]
    pub providers: Vec<ProviderBalance>,
    pub total_current_balance: f64,
    pub total_consumed: f64,
    pub total_income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderBalance {
    pub provider_id: ProviderId,
    pub provider_name: String,
    pub current_balance: f64,
    pub total_consumed: f64,
    pub total_income: f64,
    pub account_count: usize,
}
