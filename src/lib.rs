// Core layer - configuration and error handling
pub mod core;

// Schema layer - option tree and command model
pub mod commands;

// Application layer - command table, routing and startup registration
pub mod dispatch;

// Platform layer - serenity adapter
pub mod discord;

// Sample command used by the binaries
pub mod poke;

pub use crate::core::{BotError, Config};
pub use commands::{Command, CommandOption, OptionKind, Snowflake};
pub use discord::{DiscordBot, SerenityPlatform, SlashInteraction};
pub use dispatch::{
    CommandCallback, Dispatcher, DispatcherState, Platform, RegistrationHandle, RegistrationReport,
};
