//! Root schema for one slash command

use serde::Serialize;
use serde_json::Value;

use super::option::{CommandOption, OptionRecord};

/// Built command: `{name, description, options}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandRecord {
    pub name: String,
    pub description: Option<String>,
    pub options: Vec<OptionRecord>,
}

/// A named command and its ordered top-level options
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: String,
    description: Option<String>,
    options: Vec<CommandOption>,
}

impl Command {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
            options: Vec::new(),
        }
    }

    /// Append a top-level option. No deduplication, no reordering.
    pub fn add_option(&mut self, option: impl Into<CommandOption>) -> &mut Self {
        self.options.push(option.into());
        self
    }

    pub fn with_option(mut self, option: impl Into<CommandOption>) -> Self {
        self.add_option(option);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    pub fn build(&self) -> CommandRecord {
        CommandRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            options: self.options.iter().map(CommandOption::build).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::option::{SubCommandGroupOption, SubCommandOption};
    use serde_json::json;

    fn poke() -> Command {
        let mut command = Command::new("poke", Some("Poke somebody"));
        command.add_option(CommandOption::user("target", true, Some("Who to poke")));
        command.add_option(CommandOption::string("message", false, Some("What to say")));
        command
    }

    #[test]
    fn test_poke_command_wire_shape() {
        assert_eq!(
            poke().to_json().unwrap(),
            json!({
                "name": "poke",
                "description": "Poke somebody",
                "options": [
                    {
                        "type": 6,
                        "name": "target",
                        "description": "Who to poke",
                        "required": true,
                        "options": []
                    },
                    {
                        "type": 3,
                        "name": "message",
                        "description": "What to say",
                        "required": false,
                        "options": []
                    }
                ]
            })
        );
    }

    #[test]
    fn test_empty_command_has_empty_options() {
        let command = Command::new("ping", None);
        let json = command.to_json().unwrap();
        assert_eq!(json["options"], json!([]));
        assert_eq!(json["description"], Value::Null);
    }

    #[test]
    fn test_build_is_idempotent() {
        let command = poke();
        assert_eq!(command.build(), command.build());
        assert_eq!(command.to_json().unwrap(), command.to_json().unwrap());
    }

    #[test]
    fn test_add_option_keeps_duplicates() {
        let command = Command::new("echo", None)
            .with_option(CommandOption::string("text", true, None))
            .with_option(CommandOption::string("text", true, None));
        assert_eq!(command.build().options.len(), 2);
    }

    #[test]
    fn test_nested_subcommands_in_command() {
        let command = Command::new("admin", Some("Admin tools")).with_option(
            SubCommandGroupOption::new("user", false, Some("User actions")).with_subcommand(
                SubCommandOption::new("kick", false, Some("Kick a user"))
                    .with_option(CommandOption::user("who", true, Some("Target"))),
            ),
        );

        let json = command.to_json().unwrap();
        assert_eq!(json["options"][0]["type"], json!(1));
        assert_eq!(json["options"][0]["options"][0]["name"], json!("kick"));
        assert_eq!(json["options"][0]["options"][0]["options"][0]["type"], json!(6));
    }
}
