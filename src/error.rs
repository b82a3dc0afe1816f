use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

/// Failure of a single backend command, classified by the shape of its payload
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// The backend returned its structured error object
    #[error("{message} (code {code})")]
    Structured {
        code: i64,
        message: String,
        severity: Option<Severity>,
        recoverable: Option<bool>,
        details: Option<Value>,
    },
    /// An error object that only carries a message
    #[error("{0}")]
    Message(String),
    /// A bare string
    #[error("{0}")]
    Plain(String),
    /// The call never reached the backend
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Deserialize)]
struct StructuredPayload {
    code: i64,
    message: String,
    #[serde(default)]
    severity: Option<Severity>,
    #[serde(default)]
    recoverable: Option<bool>,
    #[serde(default)]
    details: Option<Value>,
}

impl CommandError {
    /// Classify whatever the backend rejected a command with
    pub fn from_payload(payload: Value) -> Self {
        match payload {
            Value::String(s) => Self::Plain(s),
            Value::Object(ref map) if map.contains_key("code") && map.contains_key("message") => {
                match serde_json::from_value::<StructuredPayload>(payload.clone()) {
                    Ok(p) => Self::Structured {
                        code: p.code,
                        message: p.message,
                        severity: p.severity,
                        recoverable: p.recoverable,
                        details: p.details,
                    },
                    Err(_) => Self::Plain(payload.to_string()),
                }
            }
            Value::Object(ref map) => match map.get("message").and_then(Value::as_str) {
                Some(message) => Self::Message(message.to_string()),
                None => Self::Plain(payload.to_string()),
            },
            other => Self::Plain(other.to_string()),
        }
    }
}

/// The one error shape surfaced to callers and notifications
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message}")]
pub struct AppError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recoverable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            severity: None,
            recoverable: None,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Structured errors say so explicitly, everything else is assumed retryable by the user
    pub fn is_recoverable(&self) -> bool {
        self.recoverable.unwrap_or(true)
    }
}

impl From<CommandError> for AppError {
    fn from(error: CommandError) -> Self {
        match error {
            CommandError::Structured {
                code,
                message,
                severity,
                recoverable,
                details,
            } => Self {
                message,
                code: Some(code),
                severity,
                recoverable,
                details,
            },
            CommandError::Message(message) | CommandError::Plain(message) => Self::new(message),
            CommandError::Transport(message) => Self {
                severity: Some(Severity::Error),
                ..Self::new(message)
            },
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(format!("malformed command payload: {error}"))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(format!("{error:#}"))
    }
}

impl From<String> for AppError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for AppError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
