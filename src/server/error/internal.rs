use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with identifiers indicating malformed input or possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a Discord snowflake from a String
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// The value parsed but is zero, which Discord never assigns
    #[error("ID '{0}' is not a valid Discord snowflake")]
    ZeroId(String),
}
