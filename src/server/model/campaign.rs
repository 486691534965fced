//! Campaign domain models.
//!
//! Recipients are opaque IDs read from the candidate ledger. Each send attempt ends
//! in exactly one `SendOutcome`, and a run's outcomes are tallied in a
//! `CampaignReport`.

use std::fmt;

use crate::server::error::delivery::DeliveryError;

/// Opaque identifier of a campaign recipient, one per ledger line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipientId(String);

impl RecipientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipientId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for RecipientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Classification of a single send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The transport accepted the message.
    Delivered,
    /// The recipient can never be reached; recorded so it is not retried.
    Undeliverable,
    /// Anything else; the recipient stays pending for the next run.
    Failed,
}

impl SendOutcome {
    pub fn classify(result: &Result<(), DeliveryError>) -> Self {
        match result {
            Ok(()) => Self::Delivered,
            Err(e) if e.is_permanent() => Self::Undeliverable,
            Err(_) => Self::Failed,
        }
    }

    /// Whether the recipient should be appended to the sent ledger.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Undeliverable)
    }
}

/// Counters for one campaign run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignReport {
    pub delivered: usize,
    /// Recipients with DMs closed
    pub closed: usize,
    pub errors: usize,
}

impl CampaignReport {
    pub fn record(&mut self, outcome: SendOutcome) {
        match outcome {
            SendOutcome::Delivered => self.delivered += 1,
            SendOutcome::Undeliverable => self.closed += 1,
            SendOutcome::Failed => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.delivered + self.closed + self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that each delivery result maps to one outcome and counter.
    ///
    /// Verifies that closed DMs are terminal like deliveries but get their own
    /// counter, and that transient errors are neither.
    ///
    /// Expected: one increment per outcome kind, terminal only for delivered and closed
    #[test]
    fn test_classifies_and_counts_outcomes() {
        let delivered = SendOutcome::classify(&Ok(()));
        let closed = SendOutcome::classify(&Err(DeliveryError::MessagingDisabled));
        let failed = SendOutcome::classify(&Err(DeliveryError::Transient("timeout".into())));

        assert!(delivered.is_terminal());
        assert!(closed.is_terminal());
        assert!(!failed.is_terminal());

        let mut report = CampaignReport::default();
        report.record(delivered);
        report.record(closed);
        report.record(failed);
        report.record(failed);

        assert_eq!(
            report,
            CampaignReport {
                delivered: 1,
                closed: 1,
                errors: 2,
            }
        );
        assert_eq!(report.total(), 4);
    }
}
