//! Error types shared by the schema builder and the dispatcher
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial taxonomy (child kind, lifecycle, platform failures)

use thiserror::Error;

use crate::commands::OptionKind;

#[derive(Debug, Error)]
pub enum BotError {
    /// A container option was handed a child it cannot hold.
    #[error("{parent:?} option cannot hold a {child:?} child")]
    InvalidChildKind { parent: OptionKind, child: OptionKind },

    /// The command table is frozen once `start()` has been called.
    #[error("dispatcher has already been started")]
    DispatcherAlreadyStarted,

    #[error("login failed: {0}")]
    Login(String),

    /// Platform call made before a successful login
    #[error("not connected to the platform")]
    NotConnected,

    #[error("failed to enumerate guilds: {0}")]
    GuildEnumeration(String),

    #[error("command registration failed for guild {guild}: {reason}")]
    Registration { guild: u64, reason: String },

    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, BotError>;
