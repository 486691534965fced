use std::sync::Arc;

use serenity::all::{Context, EventHandler, Interaction, Member, Ready};
use serenity::async_trait;

use crate::server::{
    config::Config,
    data::{
        community::CommunityApiClient,
        discord::{SerenityGuildGateway, SerenityMessenger},
        ledger::RecipientLedger,
    },
    service::campaign::guard::CampaignGuard,
};

pub mod interaction;
pub mod member;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub config: Arc<Config>,
    pub community: CommunityApiClient,
    pub guard: CampaignGuard,
    pub ledger: RecipientLedger,
}

impl Handler {
    pub fn new(
        config: Arc<Config>,
        community: CommunityApiClient,
        guard: CampaignGuard,
        ledger: RecipientLedger,
    ) -> Self {
        Self {
            config,
            community,
            guard,
            ledger,
        }
    }

    /// Guild gateway over this event's HTTP client and cache.
    pub fn guild_gateway(&self, ctx: &Context) -> SerenityGuildGateway {
        SerenityGuildGateway::new(
            ctx.http.clone(),
            ctx.cache.clone(),
            self.config.discord_guild_id,
        )
    }

    pub fn messenger(&self, ctx: &Context) -> SerenityMessenger {
        SerenityMessenger::new(ctx.http.clone())
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(self, ctx, ready).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(self, ctx, new_member).await;
    }

    /// Called for slash commands and other interactions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(self, ctx, interaction).await;
    }
}
