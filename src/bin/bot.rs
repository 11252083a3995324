use anyhow::Result;
use dotenvy::dotenv;
use log::{info, warn};

use guildcmd::core::Config;
use guildcmd::discord::{default_intents, DiscordBot, SerenityPlatform};
use guildcmd::poke::{handle_poke, poke_command};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Building bot...");
    let platform = SerenityPlatform::new(default_intents());
    let mut bot = DiscordBot::new(platform, config.discord_token.clone());

    info!("Adding command!");
    bot.add_command(poke_command(), handle_poke)?;

    info!("Starting bot...");
    let registration = bot.start().await.map_err(|e| {
        warn!("Startup aborted: {e}");
        e
    })?;
    info!("Done :D (press Ctrl+C to stop)");

    // Summarize registration without holding up event routing
    tokio::spawn(async move {
        let report = registration.report().await;
        for failure in report.failed() {
            warn!(
                "Commands unavailable in \"{}\" ({}): {}",
                failure.guild.name,
                failure.guild.id,
                failure.error.as_deref().unwrap_or("unknown error")
            );
        }
        info!("{} guilds ready", report.succeeded().count());
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    bot.stop().await;

    Ok(())
}
