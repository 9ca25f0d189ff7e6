//! Error types for the Rankwell library.
//!
//! All fallible operations return [`RankwellError`] through the crate-wide
//! [`Result`] alias. Soft conditions such as a missing stemmer or an empty
//! payload are not errors; they resolve to "contribute nothing" inside the
//! scorers and expanders.
//!
//! # Examples
//!
//! ```
//! use rankwell::error::{RankwellError, Result};
//!
//! fn validate() -> Result<()> {
//!     Err(RankwellError::query("field does not support phonetics"))
//! }
//!
//! match validate() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Rankwell operations.
#[derive(Error, Debug)]
pub enum RankwellError {
    /// I/O errors (config and dictionary files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Query construction errors, such as invalid phonetic requests
    #[error("Query error: {0}")]
    Query(String),

    /// Analysis-related errors (stemming, synonym dictionary building)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Extension registration and lookup errors
    #[error("Extension error: {0}")]
    Extension(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with RankwellError.
pub type Result<T> = std::result::Result<T, RankwellError>;

impl RankwellError {
    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        RankwellError::Query(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        RankwellError::Analysis(msg.into())
    }

    /// Create a new extension error.
    pub fn extension<S: Into<String>>(msg: S) -> Self {
        RankwellError::Extension(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        RankwellError::Config(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        RankwellError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RankwellError::Other(msg.into())
    }
}
