//! Membership tier models.
//!
//! The community site reports each Discord user as paid, free, or not linked. The
//! tier drives which of the two configured guild roles a member should hold.

use serde::{Deserialize, Serialize};

/// Membership status reported by the community site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    Paid,
    Free,
    /// No linked account. Any status string the bot does not recognise also lands here.
    #[serde(other)]
    NotFound,
}

impl MembershipTier {
    /// Wire name used by the community API and the webhook response.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Free => "free",
            Self::NotFound => "not_found",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Paid => "👑",
            Self::Free => "🆓",
            Self::NotFound => "❔",
        }
    }

    /// Human-readable tier name, e.g. "Paid Member".
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Paid => "Paid Member",
            Self::Free => "Free Member",
            Self::NotFound => "Unlinked",
        }
    }

    /// Name with its emoji, as shown in DMs.
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji(), self.display_name())
    }

    pub fn is_linked(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Guild roles mirroring the paid and free tiers.
///
/// Either role may be unconfigured, in which case it is never added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierRoles {
    pub paid: Option<u64>,
    pub free: Option<u64>,
}

impl TierRoles {
    pub fn new(paid: Option<u64>, free: Option<u64>) -> Self {
        Self { paid, free }
    }
}
