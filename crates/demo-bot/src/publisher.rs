//! Publisher that writes command bodies to stdout instead of the platform.

use am_04_registry_handle::{CommandPublisher, CommandRoute, PublishError};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

pub struct StdoutPublisher {
    out: Mutex<Stdout>,
}

impl Default for StdoutPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl StdoutPublisher {
    pub fn new() -> Self {
        Self {
            out: Mutex::new(tokio::io::stdout()),
        }
    }
}

#[async_trait]
impl CommandPublisher for StdoutPublisher {
    async fn post_commands(
        &self,
        route: &CommandRoute,
        bodies: &[Value],
    ) -> Result<Vec<Value>, PublishError> {
        let line = json!({ "route": route.path(), "bodies": bodies }).to_string();

        let mut out = self.out.lock().await;
        out.write_all(line.as_bytes())
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;
        out.write_all(b"\n")
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;
        out.flush()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        // Echo the bodies back as the "created" records.
        Ok(bodies.to_vec())
    }
}
