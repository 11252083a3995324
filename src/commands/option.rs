//! # Command Options
//!
//! One node of a slash command's parameter tree and its wire record.
//!
//! - **Version**: 1.1.1
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.1: Debug assertion against non-finite number choices
//! - 1.1.0: Runtime-checked `add_option` on subcommand groups
//! - 1.0.0: Closed option enum with typed leaf choices

use serde::Serialize;
use std::fmt::Debug;
use std::marker::PhantomData;

use super::choice::{ChoiceRecord, ChoiceValue, Choices, Snowflake};
use crate::core::error::{BotError, Result};

/// The ten option kinds understood by the registration API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    SubCommand,
    SubCommandGroup,
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Number,
}

impl OptionKind {
    /// Integer tag used in the `type` field
    ///
    /// Both subcommand kinds share tag 1 and are told apart by nesting only.
    pub const fn wire_type(self) -> u8 {
        match self {
            OptionKind::SubCommand | OptionKind::SubCommandGroup => 1,
            OptionKind::String => 3,
            OptionKind::Integer => 4,
            OptionKind::Boolean => 5,
            OptionKind::User => 6,
            OptionKind::Channel => 7,
            OptionKind::Role => 8,
            OptionKind::Mentionable => 9,
            OptionKind::Number => 10,
        }
    }
}

/// Built option: `{type, name, description, required, options}`
///
/// Unset names and descriptions serialize as `null`; the platform rejects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionRecord {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub options: Vec<OptionEntry>,
}

/// Entry of a built `options` list: choices for leaves, children for containers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionEntry {
    Choice(ChoiceRecord),
    Option(OptionRecord),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct OptionFields {
    name: Option<String>,
    description: Option<String>,
    required: bool,
}

impl OptionFields {
    fn new(name: &str, required: bool, description: Option<&str>) -> Self {
        Self {
            name: Some(name.to_string()),
            description: description.map(str::to_string),
            required,
        }
    }

    fn record(&self, kind: OptionKind, options: Vec<OptionEntry>) -> OptionRecord {
        OptionRecord {
            kind: kind.wire_type(),
            name: self.name.clone(),
            description: self.description.clone(),
            required: self.required,
            options,
        }
    }
}

/// Marker for a leaf option kind and its choice value type
pub trait LeafKind: Sized + Debug + Clone + PartialEq {
    type Value: Clone + Debug + PartialEq + Into<ChoiceValue>;
    const KIND: OptionKind;

    fn wrap(option: LeafOption<Self>) -> CommandOption;
}

macro_rules! leaf_kind {
    ($marker:ident, $value:ty, $variant:ident, $alias:ident) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $marker;

        impl LeafKind for $marker {
            type Value = $value;
            const KIND: OptionKind = OptionKind::$variant;

            fn wrap(option: LeafOption<Self>) -> CommandOption {
                CommandOption::$variant(option)
            }
        }

        pub type $alias = LeafOption<$marker>;
    };
}

leaf_kind!(NumberKind, f64, Number, NumberOption);
leaf_kind!(IntegerKind, i64, Integer, IntegerOption);
leaf_kind!(StringKind, String, String, StringOption);
leaf_kind!(BooleanKind, bool, Boolean, BooleanOption);
leaf_kind!(UserKind, Snowflake, User, UserOption);
leaf_kind!(RoleKind, Snowflake, Role, RoleOption);
leaf_kind!(ChannelKind, Snowflake, Channel, ChannelOption);
leaf_kind!(MentionableKind, Snowflake, Mentionable, MentionableOption);

/// A non-container option with a typed choice set
#[derive(Debug, Clone, PartialEq)]
pub struct LeafOption<K: LeafKind> {
    fields: OptionFields,
    choices: Choices<K::Value>,
    kind: PhantomData<K>,
}

impl<K: LeafKind> LeafOption<K> {
    pub fn new(name: &str, required: bool, description: Option<&str>) -> Self {
        Self {
            fields: OptionFields::new(name, required, description),
            choices: Choices::new(),
            kind: PhantomData,
        }
    }

    /// Insert or overwrite a named choice
    /// Add or replace the choice shown as `key`
    ///
    /// Number choices must be finite; debug builds panic on NaN or infinity.
    pub fn add_choice(&mut self, key: impl Into<String>, value: K::Value) -> &mut Self {
        let key = key.into();
        debug_assert!(
            Into::<ChoiceValue>::into(value.clone()).is_representable(),
            "choice {key:?} has no JSON representation: {value:?}"
        );
        self.choices.insert(key, value);
        self
    }

    pub fn with_choice(mut self, key: impl Into<String>, value: K::Value) -> Self {
        self.add_choice(key, value);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.fields.description.as_deref()
    }

    pub fn required(&self) -> bool {
        self.fields.required
    }

    pub fn choices(&self) -> &Choices<K::Value> {
        &self.choices
    }

    pub fn build(&self) -> OptionRecord {
        let choices = self
            .choices
            .build()
            .into_iter()
            .map(OptionEntry::Choice)
            .collect();
        self.fields.record(K::KIND, choices)
    }
}

impl<K: LeafKind> Default for LeafOption<K> {
    fn default() -> Self {
        Self {
            fields: OptionFields::default(),
            choices: Choices::new(),
            kind: PhantomData,
        }
    }
}

/// Subcommand: holds an ordered list of child options of any kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubCommandOption {
    fields: OptionFields,
    options: Vec<CommandOption>,
}

impl SubCommandOption {
    pub fn new(name: &str, required: bool, description: Option<&str>) -> Self {
        Self {
            fields: OptionFields::new(name, required, description),
            options: Vec::new(),
        }
    }

    pub fn add_option(&mut self, option: impl Into<CommandOption>) -> &mut Self {
        self.options.push(option.into());
        self
    }

    pub fn with_option(mut self, option: impl Into<CommandOption>) -> Self {
        self.add_option(option);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.fields.description.as_deref()
    }

    pub fn required(&self) -> bool {
        self.fields.required
    }

    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    pub fn build(&self) -> OptionRecord {
        let children = self
            .options
            .iter()
            .map(|child| OptionEntry::Option(child.build()))
            .collect();
        self.fields.record(OptionKind::SubCommand, children)
    }
}

/// Subcommand group: children are restricted to subcommands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubCommandGroupOption {
    fields: OptionFields,
    subcommands: Vec<SubCommandOption>,
}

impl SubCommandGroupOption {
    pub fn new(name: &str, required: bool, description: Option<&str>) -> Self {
        Self {
            fields: OptionFields::new(name, required, description),
            subcommands: Vec::new(),
        }
    }

    pub fn add_subcommand(&mut self, subcommand: SubCommandOption) -> &mut Self {
        self.subcommands.push(subcommand);
        self
    }

    pub fn with_subcommand(mut self, subcommand: SubCommandOption) -> Self {
        self.add_subcommand(subcommand);
        self
    }

    /// Append an erased option, rejecting anything but a subcommand
    pub fn add_option(&mut self, option: CommandOption) -> Result<&mut Self> {
        match option {
            CommandOption::SubCommand(subcommand) => Ok(self.add_subcommand(subcommand)),
            other => Err(BotError::InvalidChildKind {
                parent: OptionKind::SubCommandGroup,
                child: other.kind(),
            }),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.fields.description.as_deref()
    }

    pub fn required(&self) -> bool {
        self.fields.required
    }

    pub fn subcommands(&self) -> &[SubCommandOption] {
        &self.subcommands
    }

    pub fn build(&self) -> OptionRecord {
        let children = self
            .subcommands
            .iter()
            .map(|child| OptionEntry::Option(child.build()))
            .collect();
        self.fields.record(OptionKind::SubCommandGroup, children)
    }
}

/// Any option node
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOption {
    Number(NumberOption),
    Integer(IntegerOption),
    String(StringOption),
    Boolean(BooleanOption),
    User(UserOption),
    Role(RoleOption),
    Channel(ChannelOption),
    Mentionable(MentionableOption),
    SubCommand(SubCommandOption),
    SubCommandGroup(SubCommandGroupOption),
}

impl CommandOption {
    pub fn number(name: &str, required: bool, description: Option<&str>) -> Self {
        NumberOption::new(name, required, description).into()
    }

    pub fn integer(name: &str, required: bool, description: Option<&str>) -> Self {
        IntegerOption::new(name, required, description).into()
    }

    pub fn string(name: &str, required: bool, description: Option<&str>) -> Self {
        StringOption::new(name, required, description).into()
    }

    pub fn boolean(name: &str, required: bool, description: Option<&str>) -> Self {
        BooleanOption::new(name, required, description).into()
    }

    pub fn user(name: &str, required: bool, description: Option<&str>) -> Self {
        UserOption::new(name, required, description).into()
    }

    pub fn role(name: &str, required: bool, description: Option<&str>) -> Self {
        RoleOption::new(name, required, description).into()
    }

    pub fn channel(name: &str, required: bool, description: Option<&str>) -> Self {
        ChannelOption::new(name, required, description).into()
    }

    pub fn mentionable(name: &str, required: bool, description: Option<&str>) -> Self {
        MentionableOption::new(name, required, description).into()
    }

    pub fn kind(&self) -> OptionKind {
        match self {
            CommandOption::Number(_) => OptionKind::Number,
            CommandOption::Integer(_) => OptionKind::Integer,
            CommandOption::String(_) => OptionKind::String,
            CommandOption::Boolean(_) => OptionKind::Boolean,
            CommandOption::User(_) => OptionKind::User,
            CommandOption::Role(_) => OptionKind::Role,
            CommandOption::Channel(_) => OptionKind::Channel,
            CommandOption::Mentionable(_) => OptionKind::Mentionable,
            CommandOption::SubCommand(_) => OptionKind::SubCommand,
            CommandOption::SubCommandGroup(_) => OptionKind::SubCommandGroup,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CommandOption::Number(o) => o.name(),
            CommandOption::Integer(o) => o.name(),
            CommandOption::String(o) => o.name(),
            CommandOption::Boolean(o) => o.name(),
            CommandOption::User(o) => o.name(),
            CommandOption::Role(o) => o.name(),
            CommandOption::Channel(o) => o.name(),
            CommandOption::Mentionable(o) => o.name(),
            CommandOption::SubCommand(o) => o.name(),
            CommandOption::SubCommandGroup(o) => o.name(),
        }
    }

    /// Produce the wire record; pure and repeatable
    pub fn build(&self) -> OptionRecord {
        match self {
            CommandOption::Number(o) => o.build(),
            CommandOption::Integer(o) => o.build(),
            CommandOption::String(o) => o.build(),
            CommandOption::Boolean(o) => o.build(),
            CommandOption::User(o) => o.build(),
            CommandOption::Role(o) => o.build(),
            CommandOption::Channel(o) => o.build(),
            CommandOption::Mentionable(o) => o.build(),
            CommandOption::SubCommand(o) => o.build(),
            CommandOption::SubCommandGroup(o) => o.build(),
        }
    }
}

impl<K: LeafKind> From<LeafOption<K>> for CommandOption {
    fn from(option: LeafOption<K>) -> Self {
        K::wrap(option)
    }
}

impl From<SubCommandOption> for CommandOption {
    fn from(option: SubCommandOption) -> Self {
        CommandOption::SubCommand(option)
    }
}

impl From<SubCommandGroupOption> for CommandOption {
    fn from(option: SubCommandGroupOption) -> Self {
        CommandOption::SubCommandGroup(option)
    }
}
