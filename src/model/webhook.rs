use serde::{Deserialize, Serialize};

/// Body of the link notification sent by the community site once an account is linked.
///
/// `discord_id` is optional at the type level so a missing field reaches the controller
/// and produces the documented 400 instead of a generic extractor rejection.
#[derive(Serialize, Deserialize, Default)]
pub struct LinkWebhookDto {
    #[serde(default)]
    pub discord_id: Option<DiscordIdDto>,
}

/// A Discord user ID sent either as a JSON string or as a JSON number.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum DiscordIdDto {
    Number(u64),
    Text(String),
}

impl DiscordIdDto {
    pub fn into_string(self) -> String {
        match self {
            Self::Number(id) => id.to_string(),
            Self::Text(id) => id,
        }
    }
}

/// Successful link notification response.
#[derive(Serialize, Deserialize)]
pub struct LinkWebhookResponseDto {
    pub success: bool,
    /// Resolved membership tier, `"paid"` or `"free"`.
    pub status: String,
}
