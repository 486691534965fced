use serenity::all::{Context, Member};

use crate::server::{
    bot::handler::Handler, model::member::GuildMember, service::membership::MembershipService,
};

/// Handles the guild_member_addition event when a member joins a guild
///
/// Joins to guilds other than the configured one are ignored.
pub async fn handle_guild_member_addition(handler: &Handler, ctx: Context, new_member: Member) {
    if new_member.guild_id.get() != handler.config.discord_guild_id {
        return;
    }

    let member = GuildMember::from(&new_member);
    tracing::info!("New member joined: {}", member.tag);

    let guild = handler.guild_gateway(&ctx);
    let messenger = handler.messenger(&ctx);

    MembershipService::new(
        &handler.community,
        &guild,
        &messenger,
        &handler.config.tier_roles,
        &handler.config.community_name,
    )
    .handle_member_join(&member)
    .await;
}
