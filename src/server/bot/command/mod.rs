//! Slash commands registered on the managed guild.
//!
//! Each command module exposes its `NAME`, a `register` builder, and a `run` function
//! returning the text of the (ephemeral) reply.

use serenity::all::CreateCommand;

pub mod campaign;
pub mod link_account;
pub mod verify;

/// Every command the bot registers.
pub fn all() -> Vec<CreateCommand> {
    vec![
        link_account::register(),
        verify::register(),
        campaign::register(),
    ]
}
