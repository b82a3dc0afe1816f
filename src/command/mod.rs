//! The invoke boundary to the command backend.
//!
//! Every remote operation is a named command taking one JSON object of
//! arguments. Argument field names are matched by the backend, so the
//! structs in [`args`] must keep their camelCase names exactly.

pub mod args;
pub mod names;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{AppError, CommandError};

/// Generic "invoke" entry point into the backend
#[async_trait]
pub trait CommandClient: Send + Sync {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, CommandError>;
}

/// Typed call through any [`CommandClient`]
#[tracing::instrument(name = "command::call", skip(client, args))]
pub async fn call<A, R>(client: &dyn CommandClient, command: &str, args: &A) -> Result<R, AppError>
where
    A: Serialize + Sync + ?Sized,
    R: DeserializeOwned,
{
    decode(call_raw(client, command, args).await?)
}

/// Like [`call`] but hands back the undecoded result
pub async fn call_raw<A>(client: &dyn CommandClient, command: &str, args: &A) -> Result<Value, AppError>
where
    A: Serialize + Sync + ?Sized,
{
    let args = serde_json::to_value(args)?;
    client.invoke(command, args).await.map_err(|e| {
        tracing::debug!(command, error = %e, "command rejected");
        AppError::from(e)
    })
}

pub(crate) fn decode<R: DeserializeOwned>(value: Value) -> Result<R, AppError> {
    serde_json::from_value(value).map_err(AppError::from)
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    struct Echo;

    #[async_trait]
    impl CommandClient for Echo {
        async fn invoke(&self, command: &str, args: Value) -> Result<Value, CommandError> {
            match command {
                "echo" => Ok(args),
                _ => Err(CommandError::from_payload(json!({
                    "code": 404,
                    "message": format!("unknown command {command}"),
                }))),
            }
        }
    }

    #[tokio::test]
    async fn call_round_trips_arguments() {
        let out: Value = call(&Echo, "echo", &json!({ "accountId": "a" }))
            .await
            .unwrap();
        assert_eq!(out, json!({ "accountId": "a" }));
    }

    #[tokio::test]
    async fn call_normalizes_rejections() {
        let err = call::<_, Value>(&Echo, "nope", &json!({})).await.unwrap_err();
        assert_eq!(err.code, Some(404));
        assert_eq!(err.message, "unknown command nope");
    }

    #[tokio::test]
    async fn call_reports_decode_failures() {
        let err = call::<_, u32>(&Echo, "echo", &json!({ "a": 1 })).await.unwrap_err();
        assert!(err.message.starts_with("malformed command payload"));
    }
}
