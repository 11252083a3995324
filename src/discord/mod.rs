//! # Discord Adapter
//!
//! Serenity implementation of the dispatcher's platform seam.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Typed option accessors on `SlashInteraction`
//! - 1.0.0: Initial serenity gateway adapter

pub mod gateway;
pub mod interaction;

pub use gateway::{default_intents, SerenityPlatform};
pub use interaction::{
    get_bool_option, get_id_option, get_integer_option, get_number_option, get_string_option,
    SlashInteraction,
};

/// Dispatcher wired to Discord
pub type DiscordBot = crate::dispatch::Dispatcher<SerenityPlatform>;
