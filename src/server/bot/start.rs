use serenity::all::{Client, GatewayIntents};

use crate::server::{bot::handler::Handler, config::Config, error::AppError};

/// Builds the Discord client without connecting.
///
/// The returned client's `http` and `cache` can be cloned for use outside the bot
/// before `start_bot` takes ownership of it.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `handler` - Event handler with the bot's dependencies
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError::DiscordErr)` - Client construction failed
pub async fn init_bot(config: &Config, handler: Handler) -> Result<Client, AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Connects the bot and processes gateway events until shutdown.
///
/// Should be called from within a `tokio::spawn` task since it blocks until the
/// connection closes.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
