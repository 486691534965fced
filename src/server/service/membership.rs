//! Membership flows: member joins, `/verify`, and link notifications from the site.
//!
//! Each flow resolves the member's tier, reconciles their tier roles, and for joins
//! and links sends a direct message confirming the tier. DM failures never fail the
//! flow; members with DMs closed are common.

use crate::server::{
    data::{
        community::StatusResolver,
        discord::{DirectMessenger, DmTarget, GuildGateway},
    },
    error::AppError,
    model::{
        member::GuildMember,
        tier::{MembershipTier, TierRoles},
    },
    service::role_sync::RoleSyncService,
};

/// Reply for `/verify` when the member cannot be read from the interaction.
pub const VERIFY_FAILED: &str = "❌ An error occurred while verifying your account.";

pub struct MembershipService<'a> {
    status: &'a dyn StatusResolver,
    guild: &'a dyn GuildGateway,
    messenger: &'a dyn DirectMessenger,
    roles: &'a TierRoles,
    community_name: &'a str,
}

impl<'a> MembershipService<'a> {
    pub fn new(
        status: &'a dyn StatusResolver,
        guild: &'a dyn GuildGateway,
        messenger: &'a dyn DirectMessenger,
        roles: &'a TierRoles,
        community_name: &'a str,
    ) -> Self {
        Self {
            status,
            guild,
            messenger,
            roles,
            community_name,
        }
    }

    /// Verifies a member who just joined the guild.
    ///
    /// Linked members get their tier role and a welcome DM; unlinked members are
    /// left alone.
    pub async fn handle_member_join(&self, member: &GuildMember) -> MembershipTier {
        let tier = self.status.check_status(&member.user_id.to_string()).await;
        if !tier.is_linked() {
            tracing::debug!("{} joined without a linked account", member.tag);
            return tier;
        }

        self.sync_roles(member, tier).await;

        let welcome = format!(
            "🎉 Welcome to {} Discord!\n\n\
             Your account has been automatically verified as a **{}**.\n\
             Enjoy your exclusive perks!",
            self.community_name,
            tier.label()
        );
        self.notify(member, &welcome).await;

        tier
    }

    /// Handles `/verify` for the invoking member and returns the reply text.
    pub async fn verify(&self, member: &GuildMember) -> String {
        let tier = self.status.check_status(&member.user_id.to_string()).await;
        if !tier.is_linked() {
            return "❌ No linked account found. Use `/link-account` to get started!".to_string();
        }

        self.sync_roles(member, tier).await;

        format!(
            "✅ {} Your roles have been updated! You are a **{}**.",
            tier.emoji(),
            tier.display_name()
        )
    }

    /// Handles the site's notification that `discord_id` just linked an account.
    ///
    /// # Returns
    /// - `Ok(MembershipTier)` - Roles reconciled for a paid or free member
    /// - `Err(AppError::NotFound)` - Guild unavailable, member not in the guild, or
    ///   the site has no linked account for the user
    pub async fn link_notification(&self, discord_id: u64) -> Result<MembershipTier, AppError> {
        tracing::info!("Received link notification for Discord ID {}", discord_id);

        let member = self.guild.fetch_member(discord_id).await?;

        let tier = self.status.check_status(&discord_id.to_string()).await;
        if !tier.is_linked() {
            tracing::warn!("Link notification for {} but the user was not found", member.tag);
            return Err(AppError::NotFound("User not found in database".to_string()));
        }

        self.sync_roles(&member, tier).await;

        let confirmation = format!(
            "✅ Your {} account has been linked!\n\n\
             You've been verified as a **{}**.\n\
             Your roles have been automatically assigned. Enjoy your perks!",
            self.community_name,
            tier.label()
        );
        self.notify(&member, &confirmation).await;

        tracing::info!("Roles assigned to {} ({})", member.tag, tier.as_str());

        Ok(tier)
    }

    async fn sync_roles(&self, member: &GuildMember, tier: MembershipTier) {
        RoleSyncService::new(self.guild, self.roles)
            .reconcile(member, tier)
            .await;
    }

    async fn notify(&self, member: &GuildMember, content: &str) {
        if let Err(e) = self.messenger.send(&DmTarget::from(member), content).await {
            tracing::warn!("Could not send DM to {}: {}", member.tag, e);
        }
    }
}
