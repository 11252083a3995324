//! # Bot Dispatcher
//!
//! Owns the platform client and the command table, pushes schemas to every
//! guild on startup and routes inbound interactions by command name.
//!
//! - **Version**: 1.3.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.3.0: Registration runs in the background; report is opt-in via `RegistrationHandle`
//! - 1.2.0: `stop()` performs full teardown (unsubscribe + disconnect)
//! - 1.1.0: Per-guild registration report
//! - 1.0.0: Initial lifecycle (add, start, dispatch)

use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::handler::CommandCallback;
use super::platform::{GuildRef, Platform};
use super::registry::{CommandTable, Router};
use crate::commands::{Command, CommandRecord};
use crate::core::error::{BotError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Unstarted,
    Starting,
    Running,
    Stopped,
}

/// Outcome of registering the schema list in one guild
#[derive(Debug, Clone, PartialEq)]
pub struct GuildRegistration {
    pub guild: GuildRef,
    pub error: Option<String>,
}

/// Per-guild results of the startup registration push, ordered by guild id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationReport {
    pub guilds: Vec<GuildRegistration>,
}

impl RegistrationReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &GuildRef> {
        self.guilds
            .iter()
            .filter(|g| g.error.is_none())
            .map(|g| &g.guild)
    }

    pub fn failed(&self) -> impl Iterator<Item = &GuildRegistration> {
        self.guilds.iter().filter(|g| g.error.is_some())
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Registration tasks spawned by [`Dispatcher::start`], one per guild
///
/// Dropping the handle detaches the tasks; each still logs its own outcome.
#[derive(Debug)]
pub struct RegistrationHandle {
    tasks: Vec<(GuildRef, JoinHandle<Result<()>>)>,
}

impl RegistrationHandle {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn guilds(&self) -> impl Iterator<Item = &GuildRef> {
        self.tasks.iter().map(|(guild, _)| guild)
    }

    /// Whether every guild has finished, successfully or not
    pub fn is_finished(&self) -> bool {
        self.tasks.iter().all(|(_, task)| task.is_finished())
    }

    /// Wait for every guild and collect the outcomes
    ///
    /// A task that panicked or was cancelled counts as a failure for its guild.
    pub async fn report(self) -> RegistrationReport {
        let mut report = RegistrationReport::default();
        for (guild, task) in self.tasks {
            let error = match task.await {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e.to_string()),
                Err(e) => {
                    error!("❌ Registration task for guild {} did not complete: {e}", guild.id);
                    Some(format!("registration task did not complete: {e}"))
                }
            };
            report.guilds.push(GuildRegistration { guild, error });
        }
        report.guilds.sort_by_key(|g| g.guild.id);

        let failed = report.failed().count();
        if failed == 0 {
            info!("✅ All commands registered!");
        } else {
            warn!(
                "⚠️ Commands registered in {} guilds, {failed} failed",
                report.guilds.len() - failed
            );
        }

        report
    }
}

pub struct Dispatcher<P: Platform> {
    platform: Arc<P>,
    token: String,
    table: CommandTable<P::Interaction>,
    router: Option<Arc<Router<P::Interaction>>>,
    state: DispatcherState,
}

impl<P: Platform> Dispatcher<P> {
    pub fn new(platform: P, token: impl Into<String>) -> Self {
        Self {
            platform: Arc::new(platform),
            token: token.into(),
            table: CommandTable::new(),
            router: None,
            state: DispatcherState::Unstarted,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    /// Register `callback` for `command.name()`
    ///
    /// A second command with the same name replaces the first. Only valid
    /// before `start()`.
    pub fn add_command<C>(&mut self, command: Command, callback: C) -> Result<()>
    where
        C: CommandCallback<P::Interaction> + 'static,
    {
        if self.state != DispatcherState::Unstarted {
            return Err(BotError::DispatcherAlreadyStarted);
        }

        let name = command.name().to_string();
        if self.table.insert(command, Arc::new(callback)).is_some() {
            warn!("Command /{name} registered twice; keeping the latest handler");
        } else {
            debug!("Added command /{name}");
        }
        Ok(())
    }

    fn table(&self) -> &CommandTable<P::Interaction> {
        match &self.router {
            Some(router) => router.table(),
            None => &self.table,
        }
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.table().command_names().collect()
    }

    pub fn commands(&self) -> Vec<&Command> {
        self.table().commands().collect()
    }

    /// Log in, push every command to every guild, then start routing
    ///
    /// The command table is frozen on entry. A login or guild listing failure
    /// aborts startup and leaves the dispatcher in `Starting`. Per-guild
    /// registration runs in background tasks: the dispatcher subscribes and
    /// enters `Running` as soon as they are spawned, so a slow or stuck guild
    /// never holds up routing. Await [`RegistrationHandle::report`] to collect
    /// the outcomes, or drop the handle and let the tasks finish on their own.
    pub async fn start(&mut self) -> Result<RegistrationHandle> {
        if self.state != DispatcherState::Unstarted {
            return Err(BotError::DispatcherAlreadyStarted);
        }
        self.state = DispatcherState::Starting;

        let router = Arc::new(Router::new(std::mem::take(&mut self.table)));
        self.router = Some(Arc::clone(&router));

        info!("🔑 Logging in...");
        self.platform.login(&self.token).await?;

        info!("🔨 Prebuilding {} commands...", router.table().len());
        let schemas = Arc::new(router.table().build_schemas());

        let guilds = self.platform.guilds().await?;
        info!("📡 Registering commands in {} guilds", guilds.len());
        let registration = self.spawn_registrations(guilds, schemas);

        self.platform.subscribe(router).await;
        self.state = DispatcherState::Running;
        info!("🎉 Dispatcher running");

        Ok(registration)
    }

    fn spawn_registrations(
        &self,
        guilds: Vec<GuildRef>,
        schemas: Arc<Vec<CommandRecord>>,
    ) -> RegistrationHandle {
        let tasks = guilds
            .into_iter()
            .map(|guild| {
                let platform = Arc::clone(&self.platform);
                let schemas = Arc::clone(&schemas);
                let id = guild.id;
                let name = guild.name.clone();
                let task = tokio::spawn(async move {
                    info!("Registering in server \"{name}\" ({id})...");
                    let result = platform.register_guild_commands(id, &schemas).await;
                    match &result {
                        Ok(()) => debug!("Registered commands in guild {id}"),
                        Err(e) => warn!("⚠️ Failed to register commands in guild {id}: {e}"),
                    }
                    result
                });
                (guild, task)
            })
            .collect();

        RegistrationHandle { tasks }
    }

    /// Route an interaction through the frozen table
    ///
    /// Routes nothing unless the dispatcher is running.
    pub async fn dispatch(&self, interaction: P::Interaction) -> bool {
        match &self.router {
            Some(router) if self.state == DispatcherState::Running => {
                router.dispatch(interaction).await
            }
            _ => {
                debug!("Dispatcher not running; dropping interaction");
                false
            }
        }
    }

    /// Unsubscribe from events and close the platform connection
    ///
    /// No-op unless the dispatcher has been started.
    pub async fn stop(&mut self) {
        match self.state {
            DispatcherState::Starting | DispatcherState::Running => {
                info!("🛑 Stopping dispatcher");
                self.platform.shutdown().await;
                self.state = DispatcherState::Stopped;
            }
            DispatcherState::Unstarted | DispatcherState::Stopped => {}
        }
    }
}
