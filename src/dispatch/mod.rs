//! # Command Dispatch
//!
//! Lookup table of (schema, handler) pairs, startup registration and
//! interaction routing.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: `RegistrationHandle` for opt-in startup reports
//! - 1.1.0: Platform trait so adapters other than serenity can be plugged in
//! - 1.0.0: Dispatcher, handler trait and registry

pub mod dispatcher;
pub mod handler;
pub mod platform;
pub mod registry;

pub use dispatcher::{
    Dispatcher, DispatcherState, GuildRegistration, RegistrationHandle, RegistrationReport,
};
pub use handler::CommandCallback;
pub use platform::{build_schema_list, GuildRef, InteractionEvent, Platform};
pub use registry::{CommandTable, RegistrationEntry, Router};
