//! Sequential, rate-limited delivery of the campaign message.

use std::{sync::Arc, time::Duration};

use crate::server::{
    data::{discord::DirectMessenger, ledger::RecipientLedger},
    error::delivery::DeliveryError,
    model::campaign::{CampaignReport, RecipientId, SendOutcome},
};

/// Sends the campaign message to each pending recipient in turn.
///
/// Recipients with a terminal outcome are appended to the sent ledger as soon as the
/// outcome is known, so an interrupted run picks up where it stopped.
pub struct CampaignDispatcher {
    messenger: Arc<dyn DirectMessenger>,
    ledger: RecipientLedger,
    message: String,
    delay: Duration,
}

impl CampaignDispatcher {
    pub fn new(
        messenger: Arc<dyn DirectMessenger>,
        ledger: RecipientLedger,
        message: String,
        delay: Duration,
    ) -> Self {
        Self {
            messenger,
            ledger,
            message,
            delay,
        }
    }

    /// Processes `pending` in order, sleeping `delay` between recipients.
    ///
    /// Never fails: per-recipient errors are counted and ledger write failures are
    /// logged without stopping the loop.
    pub async fn run(&self, pending: Vec<RecipientId>) -> CampaignReport {
        let mut report = CampaignReport::default();
        let total = pending.len();

        tracing::info!("Campaign run starting for {} recipients", total);

        for (index, recipient) in pending.iter().enumerate() {
            let result = self.deliver(recipient).await;
            let outcome = SendOutcome::classify(&result);

            match (&outcome, &result) {
                (SendOutcome::Delivered, _) => {
                    tracing::info!("[{}/{}] Sent campaign DM to {}", index + 1, total, recipient)
                }
                (SendOutcome::Undeliverable, Err(e)) => {
                    tracing::warn!("[{}/{}] {} is unreachable: {}", index + 1, total, recipient, e)
                }
                (_, Err(e)) => {
                    tracing::error!("[{}/{}] Failed to message {}: {}", index + 1, total, recipient, e)
                }
                _ => {}
            }

            report.record(outcome);

            if outcome.is_terminal() {
                if let Err(e) = self.ledger.append_processed(recipient).await {
                    tracing::error!(
                        "Failed to record {} in {}: {}",
                        recipient,
                        self.ledger.sent_path().display(),
                        e
                    );
                }
            }

            if index + 1 < total {
                tokio::time::sleep(self.delay).await;
            }
        }

        tracing::info!(
            "Campaign run finished: {} delivered, {} closed, {} errors",
            report.delivered,
            report.closed,
            report.errors
        );

        report
    }

    async fn deliver(&self, recipient: &RecipientId) -> Result<(), DeliveryError> {
        let target = match self.messenger.resolve(recipient).await {
            Ok(target) => target,
            // Unknown or malformed IDs stay pending rather than being marked done.
            Err(DeliveryError::Unresolvable { recipient, reason }) => {
                return Err(DeliveryError::Transient(format!(
                    "could not resolve {recipient}: {reason}"
                )))
            }
            Err(e) => return Err(e),
        };

        self.messenger.send(&target, &self.message).await
    }
}
