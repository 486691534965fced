//! Direct message transport.
//!
//! This module provides the `DirectMessenger` seam used by the campaign dispatcher and
//! the welcome and link notifications, and `SerenityMessenger`, which opens a DM
//! channel and posts a plain text message through serenity's HTTP client.

use serenity::{
    all::{CreateMessage, User, UserId},
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    error::delivery::DeliveryError,
    model::{campaign::RecipientId, member::GuildMember},
    util::parse::parse_snowflake,
};

/// A Discord user that a DM can be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmTarget {
    pub user_id: u64,
    /// Display tag used in log lines
    pub tag: String,
}

impl From<&GuildMember> for DmTarget {
    fn from(member: &GuildMember) -> Self {
        Self {
            user_id: member.user_id,
            tag: member.tag.clone(),
        }
    }
}

impl From<&User> for DmTarget {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.get(),
            tag: user.tag(),
        }
    }
}

/// Sends direct messages to Discord users.
#[async_trait]
pub trait DirectMessenger: Send + Sync {
    /// Turns a ledger ID into a user the transport can reach.
    ///
    /// # Returns
    /// - `Ok(DmTarget)` - The user exists
    /// - `Err(DeliveryError::Unresolvable)` - The ID is malformed or unknown to Discord
    async fn resolve(&self, recipient: &RecipientId) -> Result<DmTarget, DeliveryError>;

    /// Delivers `content` to `target`.
    ///
    /// # Returns
    /// - `Ok(())` - Discord accepted the message
    /// - `Err(DeliveryError::MessagingDisabled)` - The user does not accept DMs
    /// - `Err(DeliveryError::Transient)` - Any other failure
    async fn send(&self, target: &DmTarget, content: &str) -> Result<(), DeliveryError>;
}

/// Serenity-backed messenger.
pub struct SerenityMessenger {
    http: Arc<Http>,
}

impl SerenityMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl DirectMessenger for SerenityMessenger {
    async fn resolve(&self, recipient: &RecipientId) -> Result<DmTarget, DeliveryError> {
        let user_id =
            parse_snowflake(recipient.as_str()).map_err(|e| DeliveryError::Unresolvable {
                recipient: recipient.to_string(),
                reason: e.to_string(),
            })?;

        let user = self
            .http
            .get_user(UserId::new(user_id))
            .await
            .map_err(|e| DeliveryError::Unresolvable {
                recipient: recipient.to_string(),
                reason: e.to_string(),
            })?;

        Ok(DmTarget::from(&user))
    }

    async fn send(&self, target: &DmTarget, content: &str) -> Result<(), DeliveryError> {
        let channel = UserId::new(target.user_id)
            .create_dm_channel(&*self.http)
            .await?;

        channel
            .id
            .send_message(&*self.http, CreateMessage::new().content(content))
            .await?;

        Ok(())
    }
}
