//! Outbound Ports (Driven Ports)

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::CommandRoute;
use crate::error::PublishError;

/// Posts command bodies to the platform (Driven Port)
///
/// Implementations perform one bulk overwrite per call and return the
/// platform's created-command records. No retries are expected here.
#[async_trait]
pub trait CommandPublisher: Send + Sync {
    async fn post_commands(
        &self,
        route: &CommandRoute,
        bodies: &[Value],
    ) -> Result<Vec<Value>, PublishError>;
}
