//! DM campaign: planning, the run guard, and the rate-limited dispatcher.
//!
//! `CampaignService::start` applies the start rules in order and, when there is work,
//! hands the pending recipients to a detached task. The task owns the guard's permit,
//! so the slot is freed when the run ends however it ends.

pub mod dispatcher;
pub mod guard;
pub mod planner;

use std::{panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::server::{
    config::CampaignConfig,
    data::{discord::DirectMessenger, ledger::RecipientLedger},
    error::campaign::CampaignError,
    model::campaign::CampaignReport,
};

use self::{dispatcher::CampaignDispatcher, guard::CampaignGuard, planner::compute_pending};

/// Result of a successful start request.
#[derive(Debug)]
pub enum CampaignStart {
    /// Every candidate is already in the sent ledger; the guard was not taken.
    NothingToDo,
    /// A run was spawned for `pending` recipients.
    Started {
        pending: usize,
        /// Resolves to `None` if the run panicked.
        handle: JoinHandle<Option<CampaignReport>>,
    },
}

impl CampaignStart {
    /// Text shown to the user who started the campaign.
    pub fn reply(&self) -> String {
        match self {
            Self::NothingToDo => {
                "✅ Nothing to do: every candidate has already been processed.".to_string()
            }
            Self::Started { pending, .. } => {
                format!("🚀 Campaign started, processing {pending} users.")
            }
        }
    }
}

pub struct CampaignService<'a> {
    guard: &'a CampaignGuard,
    ledger: &'a RecipientLedger,
    messenger: Arc<dyn DirectMessenger>,
    config: &'a CampaignConfig,
}

impl<'a> CampaignService<'a> {
    pub fn new(
        guard: &'a CampaignGuard,
        ledger: &'a RecipientLedger,
        messenger: Arc<dyn DirectMessenger>,
        config: &'a CampaignConfig,
    ) -> Self {
        Self {
            guard,
            ledger,
            messenger,
            config,
        }
    }

    /// Starts a campaign run if one is warranted.
    ///
    /// Rules are checked in order and the first failure returns without touching the
    /// guard or the ledgers:
    ///
    /// 1. no run in progress
    /// 2. at least one candidate
    /// 3. at least one candidate not yet processed, else `NothingToDo`
    ///
    /// # Returns
    /// - `Ok(CampaignStart::Started)` - Guard acquired and run spawned
    /// - `Ok(CampaignStart::NothingToDo)` - All candidates already processed
    /// - `Err(CampaignError::AlreadyRunning)` - Another run holds the guard
    /// - `Err(CampaignError::NoCandidates)` - Candidate ledger missing or empty
    pub async fn start(&self) -> Result<CampaignStart, CampaignError> {
        if self.guard.is_running() {
            return Err(CampaignError::AlreadyRunning);
        }

        let candidates = self.ledger.load_candidates().await;
        if candidates.is_empty() {
            return Err(CampaignError::NoCandidates);
        }

        let sent = self.ledger.load_sent().await;
        let pending = compute_pending(&candidates, &sent);
        if pending.is_empty() {
            return Ok(CampaignStart::NothingToDo);
        }

        // Lost a race with another start between the check above and here.
        let permit = self
            .guard
            .try_acquire()
            .ok_or(CampaignError::AlreadyRunning)?;

        if let Err(e) = self.ledger.ensure_storage_ready().await {
            tracing::error!("Failed to prepare campaign storage: {}", e);
        }

        tracing::info!(
            "Starting campaign: {} candidates, {} already processed, {} pending",
            candidates.len(),
            candidates.len() - pending.len(),
            pending.len()
        );

        let count = pending.len();
        let dispatcher = CampaignDispatcher::new(
            self.messenger.clone(),
            self.ledger.clone(),
            self.config.message.clone(),
            self.config.delay,
        );

        let handle = tokio::spawn(async move {
            let _permit = permit;

            match AssertUnwindSafe(dispatcher.run(pending)).catch_unwind().await {
                Ok(report) => Some(report),
                Err(_) => {
                    tracing::error!("Campaign run panicked; progress so far is kept");
                    None
                }
            }
        });

        Ok(CampaignStart::Started {
            pending: count,
            handle,
        })
    }
}
