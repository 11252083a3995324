//! Serenity-backed platform adapter
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Paginated guild listing, shard shutdown on teardown
//! - 1.0.0: Login, per-guild bulk overwrite and interaction routing

use async_trait::async_trait;
use log::{debug, error, info, warn};
use serenity::client::bridge::gateway::ShardManager;
use serenity::http::{GuildPagination, Http};
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::interaction::SlashInteraction;
use crate::commands::{CommandRecord, Snowflake};
use crate::core::error::{BotError, Result};
use crate::dispatch::{build_schema_list, GuildRef, Platform, Router};

/// Maximum page size accepted by `GET /users/@me/guilds`
const GUILD_PAGE_SIZE: u64 = 200;

type SharedRouter = Arc<RwLock<Option<Arc<Router<SlashInteraction>>>>>;

/// Intents the sample bot connects with
pub fn default_intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_BANS
}

struct Connection {
    http: Arc<Http>,
    shard_manager: Arc<Mutex<ShardManager>>,
    gateway: JoinHandle<()>,
}

/// Discord platform client built on serenity
pub struct SerenityPlatform {
    intents: GatewayIntents,
    router: SharedRouter,
    connection: Mutex<Option<Connection>>,
}

impl SerenityPlatform {
    pub fn new(intents: GatewayIntents) -> Self {
        Self {
            intents,
            router: Arc::new(RwLock::new(None)),
            connection: Mutex::new(None),
        }
    }

    pub fn intents(&self) -> GatewayIntents {
        self.intents
    }

    async fn http(&self) -> Result<Arc<Http>> {
        self.connection
            .lock()
            .await
            .as_ref()
            .map(|conn| Arc::clone(&conn.http))
            .ok_or(BotError::NotConnected)
    }
}

impl Default for SerenityPlatform {
    fn default() -> Self {
        Self::new(default_intents())
    }
}

struct Gateway {
    ready: Mutex<Option<oneshot::Sender<()>>>,
    router: SharedRouter,
}

#[async_trait]
impl EventHandler for Gateway {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());

        ctx.http.set_application_id(ready.application.id.0);

        // Only the first ready resolves login; later ones are reconnects
        if let Some(tx) = self.ready.lock().await.take() {
            let _ = tx.send(());
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::ApplicationCommand(command) = interaction else {
            debug!("Ignoring non-command interaction");
            return;
        };

        let router = self.router.read().await.clone();
        match router {
            Some(router) => {
                router.dispatch(SlashInteraction::new(ctx, command)).await;
            }
            None => debug!(
                "Dropping /{} received before subscription",
                command.data.name
            ),
        }
    }
}

#[async_trait]
impl Platform for SerenityPlatform {
    type Interaction = SlashInteraction;

    async fn login(&self, token: &str) -> Result<()> {
        let (ready_tx, ready_rx) = oneshot::channel();
        let handler = Gateway {
            ready: Mutex::new(Some(ready_tx)),
            router: Arc::clone(&self.router),
        };

        let mut client = Client::builder(token, self.intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                error!("Failed to create Discord client: {e}");
                BotError::Login(e.to_string())
            })?;

        let http = Arc::clone(&client.cache_and_http.http);
        let shard_manager = Arc::clone(&client.shard_manager);

        info!("Establishing WebSocket connection to Discord gateway...");
        info!("Gateway intents: {:?}", self.intents);

        let (exit_tx, exit_rx) = oneshot::channel::<String>();
        let gateway = tokio::spawn(async move {
            let reason = match client.start().await {
                Ok(()) => "gateway closed".to_string(),
                Err(why) => {
                    error!("Gateway connection failed: {why:?}");
                    why.to_string()
                }
            };
            let _ = exit_tx.send(reason);
        });

        *self.connection.lock().await = Some(Connection {
            http,
            shard_manager,
            gateway,
        });

        tokio::select! {
            ready = ready_rx => ready
                .map_err(|_| BotError::Login("gateway closed before ready".to_string())),
            exited = exit_rx => Err(BotError::Login(
                exited.unwrap_or_else(|_| "gateway task ended".to_string()),
            )),
        }
    }

    async fn guilds(&self) -> Result<Vec<GuildRef>> {
        let http = self.http().await?;
        let mut guilds = Vec::new();
        let mut after: Option<GuildPagination> = None;

        loop {
            let page = http
                .get_guilds(after.as_ref(), Some(GUILD_PAGE_SIZE))
                .await
                .map_err(|e| BotError::GuildEnumeration(e.to_string()))?;
            let count = page.len() as u64;
            after = page.last().map(|g| GuildPagination::After(g.id));

            guilds.extend(page.into_iter().map(|g| GuildRef {
                id: Snowflake(g.id.0),
                name: g.name,
            }));

            if count < GUILD_PAGE_SIZE {
                break;
            }
        }

        Ok(guilds)
    }

    async fn register_guild_commands(
        &self,
        guild: Snowflake,
        commands: &[CommandRecord],
    ) -> Result<()> {
        let registration_error = |reason: String| BotError::Registration {
            guild: guild.0,
            reason,
        };

        let http = self.http().await?;
        let body = build_schema_list(commands).map_err(|e| registration_error(e.to_string()))?;

        // Confirm the guild is still reachable before overwriting its commands
        let partial = http
            .get_guild(guild.0)
            .await
            .map_err(|e| registration_error(e.to_string()))?;
        debug!("Registering in server \"{}\" ({})", partial.name, guild);

        let created = http
            .create_guild_application_commands(guild.0, &body)
            .await
            .map_err(|e| registration_error(e.to_string()))?;

        info!(
            "Guild slash commands registered for guild {} ({} commands)",
            guild,
            created.len()
        );
        Ok(())
    }

    async fn subscribe(&self, router: Arc<Router<SlashInteraction>>) {
        *self.router.write().await = Some(router);
        debug!("Interaction routing enabled");
    }

    async fn shutdown(&self) {
        self.router.write().await.take();

        let Some(conn) = self.connection.lock().await.take() else {
            return;
        };
        conn.shard_manager.lock().await.shutdown_all().await;
        if let Err(e) = conn.gateway.await {
            warn!("Gateway task ended abnormally: {e}");
        }
        info!("Disconnected from Discord gateway");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intents() {
        let intents = default_intents();
        assert!(intents.contains(GatewayIntents::GUILDS));
        assert!(intents.contains(GatewayIntents::DIRECT_MESSAGES));
        assert!(intents.contains(GatewayIntents::GUILD_MEMBERS));
        assert!(!intents.contains(GatewayIntents::MESSAGE_CONTENT));
    }

    #[tokio::test]
    async fn test_calls_before_login_are_not_connected() {
        let platform = SerenityPlatform::default();
        assert!(matches!(platform.guilds().await, Err(BotError::NotConnected)));
        assert!(matches!(
            platform.register_guild_commands(Snowflake(1), &[]).await,
            Err(BotError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_shutdown_before_login_is_harmless() {
        let platform = SerenityPlatform::default();
        platform.shutdown().await;
        assert!(platform.router.read().await.is_none());
    }
}
