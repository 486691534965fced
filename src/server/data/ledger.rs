//! Durable recipient ledger for the DM campaign.
//!
//! This module provides the `RecipientLedger`, a pair of line-delimited text files in
//! the campaign data directory:
//!
//! - the **candidate** file, written by an external process, listing every recipient
//!   the campaign should ever contact in send order
//! - the **sent** file, appended to by the dispatcher, listing every recipient with a
//!   terminal outcome
//!
//! Reads fail open: a missing or unreadable file is logged and treated as empty, so a
//! bad ledger under-counts pending work rather than crashing the bot. Each append is
//! flushed to disk before returning, which is what makes a crashed run resumable.

use std::{
    collections::HashSet,
    io::{ErrorKind, SeekFrom},
    path::{Path, PathBuf},
};

use tokio::{
    fs::{self, File, OpenOptions},
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};

use crate::server::{config::CampaignConfig, error::AppError, model::campaign::RecipientId};

/// File-backed candidate and sent ledgers.
///
/// Cheap to clone; holds only paths. The dispatcher is the sole writer of the sent
/// file, anything else may read it between runs.
#[derive(Debug, Clone)]
pub struct RecipientLedger {
    data_dir: PathBuf,
    candidates_path: PathBuf,
    sent_path: PathBuf,
}

impl RecipientLedger {
    /// Creates a ledger rooted at `data_dir`.
    ///
    /// # Arguments
    /// - `data_dir` - Directory holding both files
    /// - `candidates_file` - File name of the candidate list
    /// - `sent_file` - File name of the processed list
    pub fn new(data_dir: impl Into<PathBuf>, candidates_file: &str, sent_file: &str) -> Self {
        let data_dir = data_dir.into();
        Self {
            candidates_path: data_dir.join(candidates_file),
            sent_path: data_dir.join(sent_file),
            data_dir,
        }
    }

    pub fn from_config(config: &CampaignConfig) -> Self {
        Self::new(
            config.data_dir.clone(),
            &config.candidates_file,
            &config.sent_file,
        )
    }

    pub fn sent_path(&self) -> &Path {
        &self.sent_path
    }

    /// Creates the data directory and an empty sent file if either is missing.
    ///
    /// Safe to call repeatedly. Existing contents are never truncated.
    ///
    /// # Returns
    /// - `Ok(())` - Directory and sent file exist
    /// - `Err(AppError::IoErr)` - Directory or file could not be created
    pub async fn ensure_storage_ready(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.data_dir).await?;

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.sent_path)
            .await?;

        Ok(())
    }

    /// Loads the candidate list in file order with duplicates removed.
    ///
    /// The first occurrence of a repeated ID keeps its position; later copies are
    /// dropped so a recipient is never messaged twice within one run.
    pub async fn load_candidates(&self) -> Vec<RecipientId> {
        let ids = load_ids(&self.candidates_path).await;
        let total = ids.len();

        let mut seen = HashSet::with_capacity(total);
        let unique: Vec<RecipientId> = ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        if unique.len() < total {
            tracing::warn!(
                "Dropped {} duplicate candidate IDs from {}",
                total - unique.len(),
                self.candidates_path.display()
            );
        }

        unique
    }

    /// Replays the sent file into a set for membership checks.
    pub async fn load_sent(&self) -> HashSet<RecipientId> {
        load_ids(&self.sent_path).await.into_iter().collect()
    }

    /// Appends one recipient to the sent file and flushes it to disk.
    ///
    /// Opens, writes, and syncs per call so the record survives a crash that happens
    /// immediately afterwards. If the file does not end in a newline (a torn write, or
    /// a hand-edited file) a newline is written first so the previous ID stays intact.
    ///
    /// # Returns
    /// - `Ok(())` - The line is durable
    /// - `Err(AppError::IoErr)` - Open, write, or sync failed
    pub async fn append_processed(&self, id: &RecipientId) -> Result<(), AppError> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.sent_path)
            .await?;

        let mut line = format!("{id}\n");
        if ends_without_newline(&mut file).await? {
            line.insert(0, '\n');
        }

        file.write_all(line.as_bytes()).await?;
        file.sync_data().await?;

        Ok(())
    }
}

/// Whether a non-empty file's last byte is something other than `\n`.
async fn ends_without_newline(file: &mut File) -> Result<bool, AppError> {
    let len = file.metadata().await?.len();
    if len == 0 {
        return Ok(false);
    }

    file.seek(SeekFrom::Start(len - 1)).await?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).await?;

    Ok(last[0] != b'\n')
}

/// Reads a line-delimited ID file.
///
/// Lines are trimmed and blank lines skipped; order is preserved. A missing file is
/// logged at warn and any other read error at error; both return an empty list.
pub async fn load_ids(path: &Path) -> Vec<RecipientId> {
    match fs::read_to_string(path).await {
        Ok(contents) => contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(RecipientId::from)
            .collect(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Ledger file {} not found, treating as empty", path.display());
            Vec::new()
        }
        Err(e) => {
            tracing::error!(
                "Failed to read ledger file {}, treating as empty: {}",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}
