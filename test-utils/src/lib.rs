//! Tiersync Test Utils
//!
//! Provides shared testing utilities for the tiersync bot. This crate offers a builder
//! pattern for creating test contexts backed by a temporary campaign data directory, plus
//! factories for the serenity models the bot receives from Discord.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for seeding candidate and sent ledger files
//! - **TestContext**: Test environment owning the temporary directory and file paths
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn resumes_from_sent_ledger() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_candidates(["A", "B", "C"])
//!         .with_sent(["A"])
//!         .build()?;
//!
//!     // Point the ledger at test.data_dir and run...
//!
//!     assert_eq!(test.read_sent()?, vec!["A", "B", "C"]);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod serenity;

/// File name used for the candidate ledger inside the test data directory.
pub const CANDIDATES_FILE: &str = "campaign_candidates.txt";

/// File name used for the sent ledger inside the test data directory.
pub const SENT_FILE: &str = "campaign_sent.txt";
