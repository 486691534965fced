use std::fs;

use tempfile::TempDir;

use crate::{context::TestContext, error::TestError, CANDIDATES_FILE, SENT_FILE};

/// Builder for creating test contexts with seeded campaign ledgers.
///
/// Provides a fluent interface for configuring a temporary data directory. Files are
/// only written for the ledgers that were configured, so a builder with nothing added
/// produces a context whose data directory does not exist yet.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_candidates(["111", "222"])
///     .with_sent(["111"])
///     .build()?;
/// ```
pub struct TestBuilder {
    /// Candidate lines to write, or `None` to leave the file absent.
    candidates: Option<Vec<String>>,
    /// Sent lines to write, or `None` to leave the file absent.
    sent: Option<Vec<String>>,
}

impl TestBuilder {
    /// Creates a new test builder with no ledger files configured.
    pub fn new() -> Self {
        Self {
            candidates: None,
            sent: None,
        }
    }

    /// Seeds the candidate ledger with one line per entry.
    ///
    /// Entries are written verbatim, so whitespace and blank lines can be used to
    /// exercise the loader's trimming.
    pub fn with_candidates<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Seeds the sent ledger with one line per entry.
    pub fn with_sent<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sent = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Creates the temporary directory and writes the configured ledger files.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context owning the temporary directory
    /// - `Err(TestError::Io)` - Failed to create the directory or write a file
    pub fn build(self) -> Result<TestContext, TestError> {
        let dir = TempDir::new()?;
        let data_dir = dir.path().join("data");

        if self.candidates.is_some() || self.sent.is_some() {
            fs::create_dir_all(&data_dir)?;
        }

        if let Some(lines) = &self.candidates {
            fs::write(data_dir.join(CANDIDATES_FILE), render_lines(lines))?;
        }

        if let Some(lines) = &self.sent {
            fs::write(data_dir.join(SENT_FILE), render_lines(lines))?;
        }

        Ok(TestContext::new(dir, data_dir))
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn render_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}
