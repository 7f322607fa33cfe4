use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a Discord snowflake from a stored String.
    ///
    /// Stored ids are written from live Discord objects, so a parse failure
    /// here points at corrupted data rather than user input.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A stored panel mode is neither `SINGLE` nor `MULTI`.
    #[error("Unknown panel mode '{value}' in database")]
    UnknownPanelMode {
        /// The stored mode value
        value: String,
    },
}
