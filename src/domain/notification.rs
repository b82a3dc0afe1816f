use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ChannelId;

const FEISHU: &str = "feishu";
const DINGTALK: &str = "dingtalk";
const EMAIL: &str = "email";

/// Channel row as the backend returns it, with its settings packed in a JSON string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNotificationChannel {
    pub id: ChannelId,
    pub channel_type: String,
    pub config: String,
    pub enabled: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationChannel {
    pub id: ChannelId,
    pub config: ChannelConfig,
    pub enabled: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeishuConfig {
    pub webhook_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DingTalkConfig {
    pub webhook_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelConfig {
    Feishu(FeishuConfig),
    DingTalk(DingTalkConfig),
    Email(EmailConfig),
}

#[derive(Error, Debug)]
pub enum ChannelConfigError {
    #[error("unknown channel type `{0}`")]
    UnknownType(String),
    #[error("malformed {channel_type} config")]
    Malformed {
        channel_type: &'static str,
        source: serde_json::Error,
    },
}

/// Channel payload for create and update commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelInput {
    pub channel_type: String,
    pub config: String,
    pub enabled: bool,
}

impl ChannelConfig {
    pub fn channel_type(&self) -> &'static str {
        match self {
            Self::Feishu(_) => FEISHU,
            Self::DingTalk(_) => DINGTALK,
            Self::Email(_) => EMAIL,
        }
    }

    pub fn parse(channel_type: &str, raw: &str) -> Result<Self, ChannelConfigError> {
        fn malformed(channel_type: &'static str) -> impl FnOnce(serde_json::Error) -> ChannelConfigError {
            move |source| ChannelConfigError::Malformed {
                channel_type,
                source,
            }
        }

        match channel_type {
            FEISHU => serde_json::from_str(raw)
                .map(Self::Feishu)
                .map_err(malformed(FEISHU)),
            DINGTALK => serde_json::from_str(raw)
                .map(Self::DingTalk)
                .map_err(malformed(DINGTALK)),
            EMAIL => serde_json::from_str(raw)
                .map(Self::Email)
                .map_err(malformed(EMAIL)),
            other => Err(ChannelConfigError::UnknownType(other.to_string())),
        }
    }

    /// Encode back into the string form the backend stores
    pub fn to_json_string(&self) -> String {
        let encoded = match self {
            Self::Feishu(c) => serde_json::to_string(c),
            Self::DingTalk(c) => serde_json::to_string(c),
            Self::Email(c) => serde_json::to_string(c),
        };
        // plain structs of strings and integers always serialize
        encoded.unwrap_or_default()
    }

    pub fn to_input(&self, enabled: bool) -> ChannelInput {
        ChannelInput {
            channel_type: self.channel_type().to_string(),
            config: self.to_json_string(),
            enabled,
        }
    }
}

impl TryFrom<RawNotificationChannel> for NotificationChannel {
    type Error = ChannelConfigError;

    fn try_from(raw: RawNotificationChannel) -> Result<Self, Self::Error> {
        Ok(Self {
            config: ChannelConfig::parse(&raw.channel_type, &raw.config)?,
            id: raw.id,
            enabled: raw.enabled,
            created_at: raw.created_at,
        })
    }
}
