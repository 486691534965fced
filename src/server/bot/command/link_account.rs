use serenity::all::{CommandInteraction, CreateCommand};

use crate::server::{bot::handler::Handler, service::link::LinkService};

pub const NAME: &str = "link-account";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Get a code to link your community account")
}

pub async fn run(handler: &Handler, command: &CommandInteraction) -> String {
    LinkService::new(
        &handler.community,
        &handler.config.community_name,
        &handler.config.community_url,
    )
    .link_account(&command.user.id.to_string())
    .await
}
