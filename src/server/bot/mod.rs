//! Discord bot integration for membership role sync and the DM campaign.
//!
//! The bot verifies members as they join, serves the `/link-account`, `/verify`, and
//! `/start-campaign` slash commands, and owns the campaign run guard. It is
//! initialized during startup and runs in a separate tokio task so it does not block
//! the webhook server. Its HTTP client and cache are shared with the webhook handlers.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild availability, needed to register commands and answer
//!   "guild not found" correctly
//! - `GUILD_MEMBERS` - Receive member join events (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
