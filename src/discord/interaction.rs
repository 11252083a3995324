//! Slash command interactions received from Discord

use anyhow::Result;
use serde_json::Value;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;

use crate::commands::Snowflake;
use crate::dispatch::InteractionEvent;

/// A command invocation together with the serenity context it arrived on
#[derive(Clone)]
pub struct SlashInteraction {
    ctx: Context,
    command: ApplicationCommandInteraction,
}

impl SlashInteraction {
    pub fn new(ctx: Context, command: ApplicationCommandInteraction) -> Self {
        Self { ctx, command }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn command(&self) -> &ApplicationCommandInteraction {
        &self.command
    }

    pub fn user_id(&self) -> Snowflake {
        Snowflake(self.command.user.id.0)
    }

    pub fn channel_id(&self) -> Snowflake {
        Snowflake(self.command.channel_id.0)
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.command.guild_id.map(|id| Snowflake(id.0))
    }

    /// Respond to the interaction with a plain message
    pub async fn reply(&self, content: &str) -> Result<()> {
        self.command
            .create_interaction_response(&self.ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(content))
            })
            .await?;
        Ok(())
    }

    /// Post a follow-up message to the channel the command was used in
    pub async fn send_to_channel(&self, content: &str) -> Result<()> {
        self.command.channel_id.say(&self.ctx.http, content).await?;
        Ok(())
    }

    pub fn get_string(&self, name: &str) -> Option<String> {
        get_string_option(&self.command.data.options, name)
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        get_integer_option(&self.command.data.options, name)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        get_number_option(&self.command.data.options, name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        get_bool_option(&self.command.data.options, name)
    }

    pub fn get_user(&self, name: &str) -> Option<Snowflake> {
        get_id_option(&self.command.data.options, name)
    }

    pub fn get_role(&self, name: &str) -> Option<Snowflake> {
        get_id_option(&self.command.data.options, name)
    }

    pub fn get_channel(&self, name: &str) -> Option<Snowflake> {
        get_id_option(&self.command.data.options, name)
    }

    pub fn get_mentionable(&self, name: &str) -> Option<Snowflake> {
        get_id_option(&self.command.data.options, name)
    }
}

impl InteractionEvent for SlashInteraction {
    fn command_name(&self) -> Option<&str> {
        Some(self.command.data.name.as_str())
    }
}

fn option_value<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a Value> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
}

/// Utility function to get string option from slash command
pub fn get_string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    option_value(options, name).and_then(value_to_string)
}

/// Utility function to get integer option from slash command
pub fn get_integer_option(options: &[CommandDataOption], name: &str) -> Option<i64> {
    option_value(options, name).and_then(Value::as_i64)
}

/// Utility function to get number option from slash command
pub fn get_number_option(options: &[CommandDataOption], name: &str) -> Option<f64> {
    option_value(options, name).and_then(Value::as_f64)
}

/// Utility function to get boolean option from slash command
pub fn get_bool_option(options: &[CommandDataOption], name: &str) -> Option<bool> {
    option_value(options, name).and_then(Value::as_bool)
}

/// Utility function to get a user, role, channel or mentionable id
pub fn get_id_option(options: &[CommandDataOption], name: &str) -> Option<Snowflake> {
    option_value(options, name).and_then(value_to_snowflake)
}

fn value_to_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Ids arrive as strings; tolerate plain integers as well
fn value_to_snowflake(value: &Value) -> Option<Snowflake> {
    match value {
        Value::String(s) => s.parse().ok().map(Snowflake),
        Value::Number(n) => n.as_u64().map(Snowflake),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_snowflake_from_string() {
        assert_eq!(
            value_to_snowflake(&json!("80351110224678912")),
            Some(Snowflake(80351110224678912))
        );
    }

    #[test]
    fn test_value_to_snowflake_from_number() {
        assert_eq!(value_to_snowflake(&json!(42)), Some(Snowflake(42)));
    }

    #[test]
    fn test_value_to_snowflake_rejects_garbage() {
        assert_eq!(value_to_snowflake(&json!("not-an-id")), None);
        assert_eq!(value_to_snowflake(&json!(-1)), None);
        assert_eq!(value_to_snowflake(&json!(true)), None);
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("hello")), Some("hello".to_string()));
        assert_eq!(value_to_string(&json!(3)), None);
    }
}
