//! Command publication
//!
//! Decides which bodies go to which platform route. Posting itself is the
//! job of a `CommandPublisher`.

use am_02_command_registry::PublishedCommandBody;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Where command bodies are registered on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum CommandRoute {
    /// Visible in every guild and in direct messages.
    Global { client_id: String },
    /// Visible in one guild only.
    Guild { client_id: String, guild_id: String },
}

impl CommandRoute {
    /// Platform API path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Global { client_id } => format!("/applications/{client_id}/commands"),
            Self::Guild {
                client_id,
                guild_id,
            } => format!("/applications/{client_id}/guilds/{guild_id}/commands"),
        }
    }
}

impl fmt::Display for CommandRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Guild publication request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildCommandsTarget {
    pub client_id: String,
    pub guild_id: String,
    /// Also publish commands gated above the default level.
    #[serde(default)]
    pub include_admin: bool,
}

impl GuildCommandsTarget {
    pub fn new(client_id: impl Into<String>, guild_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            guild_id: guild_id.into(),
            include_admin: false,
        }
    }

    pub fn with_admin(mut self) -> Self {
        self.include_admin = true;
        self
    }

    pub fn route(&self) -> CommandRoute {
        CommandRoute::Guild {
            client_id: self.client_id.clone(),
            guild_id: self.guild_id.clone(),
        }
    }
}

/// Bodies to post, in registration order. Admin bodies only when asked for.
pub fn select_bodies(published: &[PublishedCommandBody], include_admin: bool) -> Vec<Value> {
    published
        .iter()
        .filter(|entry| include_admin || !entry.admin)
        .map(|entry| entry.body.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(name: &str, admin: bool) -> PublishedCommandBody {
        PublishedCommandBody {
            body: json!({ "name": name }),
            admin,
        }
    }

    #[test]
    fn test_select_bodies() {
        let published = vec![body("ping", false), body("ban", true), body("help", false)];
        assert_eq!(
            select_bodies(&published, false),
            vec![json!({ "name": "ping" }), json!({ "name": "help" })]
        );
        assert_eq!(select_bodies(&published, true).len(), 3);
    }

    #[test]
    fn test_route_paths() {
        let global = CommandRoute::Global {
            client_id: "app".to_string(),
        };
        assert_eq!(global.path(), "/applications/app/commands");

        let guild = GuildCommandsTarget::new("app", "g1").route();
        assert_eq!(guild.to_string(), "/applications/app/guilds/g1/commands");
    }
}
