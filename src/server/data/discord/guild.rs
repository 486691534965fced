//! Guild member lookup and role mutation.
//!
//! This module provides the `GuildGateway` seam used by role reconciliation and the
//! link webhook, and `SerenityGuildGateway`, its implementation over serenity's HTTP
//! client and cache for the single guild the bot manages.

use serenity::{
    all::{GuildId, RoleId, UserId},
    async_trait,
    cache::Cache,
    http::Http,
};
use std::sync::Arc;

use crate::server::{error::AppError, model::member::GuildMember};

/// Audit log reason attached to every role change the bot makes.
const ROLE_SYNC_REASON: &str = "Membership tier sync";

/// Access to members and roles of the managed guild.
#[async_trait]
pub trait GuildGateway: Send + Sync {
    /// Fetches a member with their current roles.
    ///
    /// # Returns
    /// - `Ok(GuildMember)` - The member
    /// - `Err(AppError::NotFound("Guild not found"))` - The bot cannot see the guild
    /// - `Err(AppError::NotFound("Member not found in server"))` - No such member
    async fn fetch_member(&self, user_id: u64) -> Result<GuildMember, AppError>;

    async fn add_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError>;

    async fn remove_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError>;
}

/// Serenity-backed gateway for one guild.
pub struct SerenityGuildGateway {
    http: Arc<Http>,
    cache: Arc<Cache>,
    guild_id: GuildId,
}

impl SerenityGuildGateway {
    /// Creates a gateway for `guild_id`.
    ///
    /// # Arguments
    /// - `http` - Discord HTTP client shared with the bot
    /// - `cache` - Gateway cache, used to tell whether the guild is available yet
    /// - `guild_id` - The managed guild
    pub fn new(http: Arc<Http>, cache: Arc<Cache>, guild_id: u64) -> Self {
        Self {
            http,
            cache,
            guild_id: GuildId::new(guild_id),
        }
    }
}

#[async_trait]
impl GuildGateway for SerenityGuildGateway {
    async fn fetch_member(&self, user_id: u64) -> Result<GuildMember, AppError> {
        // The guild only appears in the cache once the gateway has delivered it
        if self.cache.guild(self.guild_id).is_none() {
            tracing::error!("Guild {} not found in cache", self.guild_id);
            return Err(AppError::NotFound("Guild not found".to_string()));
        }

        match self.guild_id.member(&*self.http, UserId::new(user_id)).await {
            Ok(member) => Ok(GuildMember::from(&member)),
            Err(e) => {
                tracing::debug!(
                    "Failed to fetch member {} in guild {}: {}",
                    user_id,
                    self.guild_id,
                    e
                );
                Err(AppError::NotFound("Member not found in server".to_string()))
            }
        }
    }

    async fn add_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.http
            .add_member_role(
                self.guild_id,
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(ROLE_SYNC_REASON),
            )
            .await?;

        Ok(())
    }

    async fn remove_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                self.guild_id,
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(ROLE_SYNC_REASON),
            )
            .await?;

        Ok(())
    }
}
