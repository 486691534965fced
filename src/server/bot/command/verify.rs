use serenity::all::{CommandInteraction, Context, CreateCommand};

use crate::server::{
    bot::handler::Handler,
    model::member::GuildMember,
    service::membership::{MembershipService, VERIFY_FAILED},
};

pub const NAME: &str = "verify";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Manually verify your account status and update roles")
}

pub async fn run(handler: &Handler, ctx: &Context, command: &CommandInteraction) -> String {
    // Only present when the command is used inside a guild
    let Some(member) = command.member.as_deref() else {
        tracing::warn!("/verify used outside the guild by {}", command.user.tag());
        return VERIFY_FAILED.to_string();
    };

    let guild = handler.guild_gateway(ctx);
    let messenger = handler.messenger(ctx);

    MembershipService::new(
        &handler.community,
        &guild,
        &messenger,
        &handler.config.tier_roles,
        &handler.config.community_name,
    )
    .verify(&GuildMember::from(member))
    .await
}
