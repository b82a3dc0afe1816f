use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use account_hub::{CommandClient, CommandError};
use async_trait::async_trait;
use serde_json::Value;

/// Scripted command backend. Every call is recorded; commands without a
/// scripted response fail with a message error.
#[derive(Default)]
pub struct MockBackend {
    responses: Mutex<HashMap<String, Result<Value, CommandError>>>,
    calls: Mutex<Vec<(String, Value)>>,
    hanging: Mutex<HashSet<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, command: &str, value: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_string(), Ok(value));
    }

    pub fn fail(&self, command: &str, error: CommandError) {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_string(), Err(error));
    }

    /// Calls to `command` never resolve
    pub fn hang(&self, command: &str) {
        self.hanging.lock().unwrap().insert(command.to_string());
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, command: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == command)
            .count()
    }

    pub fn last_args(&self, command: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(c, _)| c == command)
            .map(|(_, args)| args.clone())
    }
}

#[async_trait]
impl CommandClient for MockBackend {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, CommandError> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), args));

        let hangs = self.hanging.lock().unwrap().contains(command);
        if hangs {
            std::future::pending::<()>().await;
        }

        self.responses
            .lock()
            .unwrap()
            .get(command)
            .cloned()
            .unwrap_or_else(|| Err(CommandError::Message(format!("no response for {command}"))))
    }
}
