//! Structured cache keys.
//!
//! A key is an ordered list of segments. Every resource has its own root
//! segment, narrower scopes append to it, so prefix comparison groups a
//! resource with everything nested under it.

use std::{borrow::Cow, fmt};

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Str(Cow<'static, str>),
    Int(i64),
    /// Canonical JSON of a parameter object
    Params(String),
}

impl From<&'static str> for Segment {
    fn from(s: &'static str) -> Self {
        Self::Str(Cow::Borrowed(s))
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Self::Str(Cow::Owned(s))
    }
}

impl From<i64> for Segment {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u32> for Segment {
    fn from(n: u32) -> Self {
        Self::Int(n as i64)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{}", Value::String(s.to_string())),
            Self::Int(n) => write!(f, "{n}"),
            Self::Params(p) => f.write_str(p),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<Segment>);

impl QueryKey {
    pub fn root(name: &'static str) -> Self {
        Self(vec![Segment::from(name)])
    }

    /// New key one level below this one
    pub fn segment(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// New key carrying a parameter object. Object members are sorted so equal
    /// parameters always produce equal keys.
    pub fn with_params(&self, params: Value) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Params(canonical_json(&params)));
        Self(segments)
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{segment}")?;
        }
        f.write_str("]")
    }
}

fn canonical_json(value: &Value) -> String {
    fn sorted(value: &Value) -> Value {
        match value {
            Value::Object(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                Value::Object(entries.into_iter().map(|(k, v)| (k.clone(), sorted(v))).collect())
            }
            Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
            other => other.clone(),
        }
    }
    sorted(value).to_string()
}

const ACCOUNTS: &str = "accounts";
const BALANCE_STATISTICS: &str = "balance-statistics";
const CHECK_IN: &str = "check-in";
const PROVIDERS: &str = "providers";
const PROVIDER_MODELS: &str = "provider-models";
const PROVIDER_NODES: &str = "provider-nodes";
const NOTIFICATION_CHANNELS: &str = "notification-channels";
const PROXY_CONFIG: &str = "proxy-config";
const MODEL_COMPATIBILITY: &str = "model-compatibility";

pub mod accounts {
    use serde_json::json;

    use super::{ACCOUNTS, QueryKey};
    use crate::domain::AccountId;

    pub fn all() -> QueryKey {
        QueryKey::root(ACCOUNTS)
    }

    pub fn lists() -> QueryKey {
        all().segment("list")
    }

    pub fn list(enabled_only: bool) -> QueryKey {
        lists().with_params(json!({ "enabledOnly": enabled_only }))
    }

    pub fn details() -> QueryKey {
        all().segment("detail")
    }

    pub fn detail(id: &AccountId) -> QueryKey {
        details().segment(id.to_string())
    }

    pub fn balance(id: &AccountId) -> QueryKey {
        detail(id).segment("balance")
    }

    pub fn tokens(id: &AccountId) -> QueryKey {
        detail(id).segment("tokens")
    }

    /// One slot per refresh mode, so a forced read never answers from the
    /// cached slot of a plain read or the other way round
    pub fn token_list(id: &AccountId, force_refresh: bool) -> QueryKey {
        tokens(id).with_params(json!({ "forceRefresh": force_refresh }))
    }
}

pub fn balance_statistics() -> QueryKey {
    QueryKey::root(BALANCE_STATISTICS)
}

pub mod check_in {
    use serde_json::json;

    use super::{CHECK_IN, QueryKey};
    use crate::domain::AccountId;

    pub fn all() -> QueryKey {
        QueryKey::root(CHECK_IN)
    }

    pub fn histories() -> QueryKey {
        all().segment("history")
    }

    pub fn account_history(id: &AccountId) -> QueryKey {
        histories().segment(id.to_string())
    }

    pub fn history(id: &AccountId, page: u32, page_size: u32) -> QueryKey {
        account_history(id).with_params(json!({ "page": page, "pageSize": page_size }))
    }

    pub fn streaks() -> QueryKey {
        all().segment("streak")
    }

    pub fn streak(id: &AccountId) -> QueryKey {
        streaks().segment(id.to_string())
    }
}

pub mod providers {
    use super::{PROVIDERS, QueryKey};
    use crate::domain::ProviderId;

    pub fn all() -> QueryKey {
        QueryKey::root(PROVIDERS)
    }

    pub fn list() -> QueryKey {
        all().segment("list")
    }

    pub fn detail(id: &ProviderId) -> QueryKey {
        all().segment("detail").segment(id.to_string())
    }
}

pub fn provider_models(id: &crate::domain::ProviderId) -> QueryKey {
    QueryKey::root(PROVIDER_MODELS).segment(id.to_string())
}

pub fn provider_nodes(id: &crate::domain::ProviderId) -> QueryKey {
    QueryKey::root(PROVIDER_NODES).segment(id.to_string())
}

pub fn notification_channels() -> QueryKey {
    QueryKey::root(NOTIFICATION_CHANNELS)
}

pub fn proxy_config() -> QueryKey {
    QueryKey::root(PROXY_CONFIG)
}

pub fn model_compatibility(tool: crate::domain::CliTool, base_url: &str, model: &str) -> QueryKey {
    QueryKey::root(MODEL_COMPATIBILITY)
        .segment(tool.as_str())
        .with_params(serde_json::json!({ "baseUrl": base_url, "model": model }))
}
