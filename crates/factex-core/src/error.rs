//! Error types for the factex-core library.
//!
//! The extraction engine itself is total and never returns these: every
//! sub-extractor degrades to a documented default. Errors only arise at the
//! configuration boundary (loading a config file, compiling custom tables)
//! and in callers doing I/O.

use thiserror::Error;

/// Main error type for the factex library.
#[derive(Error, Debug)]
pub enum FactexError {
    /// A user-supplied extraction pattern failed to compile.
    #[error("invalid pattern for {field}: {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the factex library.
pub type Result<T> = std::result::Result<T, FactexError>;
