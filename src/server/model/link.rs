//! Account linking models.
//!
//! `/link-account` asks the community site for a short-lived code the user enters on
//! the site. The site's reply is interpreted into a `LinkInitiation`.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;

/// Result of asking the community site for a linking code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkInitiation {
    /// A fresh code and the instant it stops being accepted.
    Code {
        code: String,
        expires_at: DateTime<Utc>,
    },
    /// The Discord account is already linked to a site account.
    AlreadyLinked,
    /// The site refused, with its `error` text when it sent one.
    Rejected(Option<String>),
    /// The site answered with something that is not the expected JSON.
    InvalidResponse(String),
}

#[derive(Deserialize)]
struct LinkCodeBody {
    code: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize, Default)]
struct LinkErrorBody {
    #[serde(default)]
    already_linked: bool,
    #[serde(default)]
    error: Option<String>,
}

impl LinkInitiation {
    /// Interprets a status code and raw body from the initiate-link endpoint.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
            return Self::InvalidResponse(body.to_string());
        };

        if status.is_success() {
            return match serde_json::from_value::<LinkCodeBody>(json) {
                Ok(parsed) => Self::Code {
                    code: parsed.code,
                    expires_at: parsed.expires_at,
                },
                Err(_) => Self::InvalidResponse(body.to_string()),
            };
        }

        let parsed: LinkErrorBody = serde_json::from_value(json).unwrap_or_default();

        if status == StatusCode::CONFLICT && parsed.already_linked {
            Self::AlreadyLinked
        } else {
            Self::Rejected(parsed.error)
        }
    }
}
