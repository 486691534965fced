//! Ready event handler for bot initialization.
//!
//! This module handles the `ready` event which is fired when the bot successfully
//! connects to Discord's gateway and completes the initial handshake. The handler
//! logs the connection and registers the bot's slash commands on the managed guild.

use serenity::all::{Context, GuildId, Ready};

use crate::server::bot::{command, handler::Handler};

/// Handles the ready event when the bot connects to Discord.
///
/// Command registration replaces the guild's command set, so it is safe to repeat on
/// every reconnect. A registration failure is logged and the bot keeps running.
///
/// # Arguments
/// - `handler` - Bot handler holding the configured guild
/// - `ctx` - Discord context for the HTTP client
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(handler: &Handler, ctx: Context, ready: Ready) {
    tracing::info!("Bot logged in as {}", ready.user.tag());

    let guild_id = GuildId::new(handler.config.discord_guild_id);

    match guild_id.set_commands(&ctx.http, command::all()).await {
        Ok(commands) => tracing::info!(
            "Registered {} slash commands in guild {}",
            commands.len(),
            guild_id
        ),
        Err(e) => tracing::error!("Failed to register slash commands: {:?}", e),
    }
}
