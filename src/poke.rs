//! Sample `/poke` command
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context as AnyhowContext, Result};
use log::info;

use crate::commands::{Command, CommandOption, Snowflake};
use crate::discord::SlashInteraction;

pub const POKE: &str = "poke";

/// Creates the poke command
pub fn poke_command() -> Command {
    let mut command = Command::new(POKE, Some("Poke somebody"));
    command.add_option(CommandOption::user("target", true, Some("Who to poke")));
    command.add_option(CommandOption::string("message", false, Some("What to say")));
    command
}

/// Handle /poke command
pub async fn handle_poke(interaction: SlashInteraction) -> Result<()> {
    let target = interaction
        .get_user("target")
        .context("no target specified")?;
    let message = interaction.get_string("message");

    interaction.reply("THE POKE STARTS!").await?;
    interaction
        .send_to_channel(&poke_text(target, message.as_deref()))
        .await?;

    info!("Poke command completed for user {}", interaction.user_id());
    Ok(())
}

fn poke_text(target: Snowflake, message: Option<&str>) -> String {
    match message {
        Some(message) if !message.trim().is_empty() => {
            format!("Hey <@{target}> you were poked!\n> {message}")
        }
        _ => format!("Hey <@{target}> you were poked!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poke_command_options() {
        let record = poke_command().build();
        assert_eq!(record.name, "poke");
        assert_eq!(record.options.len(), 2);
        assert_eq!(record.options[0].name.as_deref(), Some("target"));
        assert!(record.options[0].required);
        assert_eq!(record.options[1].name.as_deref(), Some("message"));
        assert!(!record.options[1].required);
    }

    #[test]
    fn test_poke_text_mentions_target() {
        assert_eq!(
            poke_text(Snowflake(42), None),
            "Hey <@42> you were poked!"
        );
    }

    #[test]
    fn test_poke_text_quotes_message() {
        assert_eq!(
            poke_text(Snowflake(42), Some("wake up")),
            "Hey <@42> you were poked!\n> wake up"
        );
        assert_eq!(poke_text(Snowflake(42), Some("  ")), "Hey <@42> you were poked!");
    }
}
