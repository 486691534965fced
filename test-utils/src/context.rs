use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::PathBuf,
};

use tempfile::TempDir;

use crate::{error::TestError, CANDIDATES_FILE, SENT_FILE};

/// Test context owning a temporary campaign data directory.
///
/// The directory is deleted when the context is dropped, so keep the context alive
/// for as long as the code under test touches the ledger files.
pub struct TestContext {
    /// Temporary root, held for its drop side effect.
    _dir: TempDir,

    /// Data directory inside the temporary root. Exists only if a ledger was seeded.
    pub data_dir: PathBuf,

    /// Path of the candidate ledger.
    pub candidates_file: PathBuf,

    /// Path of the sent ledger.
    pub sent_file: PathBuf,
}

impl TestContext {
    pub(crate) fn new(dir: TempDir, data_dir: PathBuf) -> Self {
        Self {
            _dir: dir,
            candidates_file: data_dir.join(CANDIDATES_FILE),
            sent_file: data_dir.join(SENT_FILE),
            data_dir,
        }
    }

    /// Reads the sent ledger back as a list of non-empty lines.
    ///
    /// A missing file reads as an empty list so tests can assert "nothing written"
    /// without first checking for existence.
    pub fn read_sent(&self) -> Result<Vec<String>, TestError> {
        match fs::read_to_string(&self.sent_file) {
            Ok(contents) => Ok(contents
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the raw bytes of the sent ledger, for byte-exact assertions.
    pub fn read_sent_raw(&self) -> Result<String, TestError> {
        Ok(fs::read_to_string(&self.sent_file)?)
    }

    /// Appends an ID to the sent ledger as an external writer would.
    pub fn append_sent(&self, id: &str) -> Result<(), TestError> {
        fs::create_dir_all(&self.data_dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.sent_file)?;
        writeln!(file, "{id}")?;
        Ok(())
    }
}
