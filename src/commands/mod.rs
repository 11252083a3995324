//! # Command Schemas
//!
//! Slash command and option descriptors for the registration API.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Split choices into their own module
//! - 1.0.0: Option tree and command model

pub mod choice;
pub mod command;
pub mod option;

pub use choice::{ChoiceRecord, ChoiceValue, Choices, Snowflake};
pub use command::{Command, CommandRecord};
pub use option::{
    BooleanOption, ChannelOption, CommandOption, IntegerOption, LeafKind, LeafOption,
    MentionableOption, NumberOption, OptionEntry, OptionKind, OptionRecord, RoleOption,
    StringOption, SubCommandGroupOption, SubCommandOption, UserOption,
};
