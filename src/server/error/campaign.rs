use thiserror::Error;

/// Precondition failures when starting a campaign.
///
/// These are reported synchronously to whoever triggered the campaign and never
/// mutate the guard or the ledgers. The `Display` text is shown to that user as-is.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CampaignError {
    /// Another run holds the campaign guard.
    #[error("A campaign is already running.")]
    AlreadyRunning,

    /// The candidate ledger is missing or holds no IDs.
    #[error("No candidates configured.")]
    NoCandidates,
}
