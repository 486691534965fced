//! `/link-account` flow: request a linking code and word the reply.

use chrono::{DateTime, Utc};

use crate::server::{data::community::CommunityApiClient, model::link::LinkInitiation};

const GENERIC_FAILURE: &str = "❌ An error occurred. Please try again later.";

pub struct LinkService<'a> {
    community: &'a CommunityApiClient,
    community_name: &'a str,
    community_url: &'a str,
}

impl<'a> LinkService<'a> {
    pub fn new(
        community: &'a CommunityApiClient,
        community_name: &'a str,
        community_url: &'a str,
    ) -> Self {
        Self {
            community,
            community_name,
            community_url,
        }
    }

    /// Requests a linking code for `discord_id` and returns the reply to show the user.
    ///
    /// Never fails; transport errors are logged and answered with a generic message.
    pub async fn link_account(&self, discord_id: &str) -> String {
        match self.community.initiate_link(discord_id).await {
            Ok(initiation) => self.reply(&initiation, Utc::now()),
            Err(e) => {
                tracing::error!("Error in /link-account for {}: {}", discord_id, e);
                GENERIC_FAILURE.to_string()
            }
        }
    }

    /// Words a link initiation result as of `now`.
    pub fn reply(&self, initiation: &LinkInitiation, now: DateTime<Utc>) -> String {
        match initiation {
            LinkInitiation::Code { code, expires_at } => {
                let minutes = minutes_until(*expires_at, now);
                format!(
                    "🔗 **Your Linking Code:** `{code}`\n\n\
                     📝 **Instructions:**\n\
                     1. Go to {} and log in\n\
                     2. Navigate to Profile → Connect Accounts\n\
                     3. Enter the code above\n\n\
                     ⏰ This code expires in {minutes} minutes.",
                    self.community_url
                )
            }
            LinkInitiation::AlreadyLinked => format!(
                "✅ Your Discord account is already linked to an {} account!",
                self.community_name
            ),
            LinkInitiation::Rejected(error) => format!(
                "❌ Error: {}",
                error
                    .as_deref()
                    .unwrap_or("Failed to generate code. Please try again.")
            ),
            LinkInitiation::InvalidResponse(_) => {
                "❌ Server returned an invalid response. Please contact support.".to_string()
            }
        }
    }
}

/// Whole minutes from `now` to `expires_at`, rounded to nearest.
fn minutes_until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expires_at - now).num_milliseconds();
    (millis as f64 / 60_000.0).round() as i64
}
