//! Chat platform seam
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: Login, guild listing, per-guild registration and event subscription

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::registry::Router;
use crate::commands::{CommandRecord, Snowflake};
use crate::core::error::Result;

/// Guild the client currently belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuildRef {
    pub id: Snowflake,
    pub name: String,
}

/// Inbound interaction as seen by the router
pub trait InteractionEvent: Send + 'static {
    /// Invoked command name, or `None` when the interaction is not a command
    fn command_name(&self) -> Option<&str>;
}

/// Minimal surface the dispatcher needs from a chat platform client
///
/// Swapping platforms only requires another implementation of this trait.
#[async_trait]
pub trait Platform: Send + Sync + 'static {
    type Interaction: InteractionEvent;

    /// Authenticate and connect; resolves once the client is usable
    async fn login(&self, token: &str) -> Result<()>;

    /// Enumerate every guild the client currently belongs to
    async fn guilds(&self) -> Result<Vec<GuildRef>>;

    /// Replace the guild's command set with `commands`
    async fn register_guild_commands(&self, guild: Snowflake, commands: &[CommandRecord])
        -> Result<()>;

    /// Start routing inbound interactions through `router`
    async fn subscribe(&self, router: Arc<Router<Self::Interaction>>);

    /// Stop routing events and release the connection
    async fn shutdown(&self);
}

/// Serialize built commands into the bulk-overwrite request body
pub fn build_schema_list(commands: &[CommandRecord]) -> serde_json::Result<Value> {
    serde_json::to_value(commands)
}
