use serenity::http::HttpError;
use thiserror::Error;

/// Discord JSON error code for "Cannot send messages to this user".
///
/// Returned when the recipient has closed DMs from server members or blocked the bot.
const CANNOT_MESSAGE_USER: isize = 50007;

/// Failure to deliver a direct message.
///
/// Only `MessagingDisabled` is permanent; the campaign records those recipients as
/// processed. Every other variant leaves the recipient pending for a later run.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The recipient does not accept direct messages from the bot.
    #[error("Recipient has direct messages disabled")]
    MessagingDisabled,

    /// The recipient ID could not be turned into a Discord user.
    #[error("Could not resolve recipient '{recipient}': {reason}")]
    Unresolvable {
        /// The recipient ID as it appears in the ledger
        recipient: String,
        /// Why resolution failed
        reason: String,
    },

    /// Network errors, rate limits, and any other transport failure.
    #[error("Failed to deliver direct message: {0}")]
    Transient(String),
}

impl DeliveryError {
    /// Whether retrying this recipient can never succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::MessagingDisabled)
    }

    /// Classifies a Discord JSON error code returned by a rejected request.
    pub fn from_discord_code(code: isize, message: &str) -> Self {
        if code == CANNOT_MESSAGE_USER {
            Self::MessagingDisabled
        } else {
            Self::Transient(format!("Discord error {code}: {message}"))
        }
    }
}

impl From<serenity::Error> for DeliveryError {
    fn from(err: serenity::Error) -> Self {
        match &err {
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
                Self::from_discord_code(response.error.code, &response.error.message)
            }
            _ => Self::Transient(err.to_string()),
        }
    }
}
