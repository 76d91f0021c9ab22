//! Error types for ipfilter.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for ipfilter operations.
///
/// Only fatal conditions are represented here. A malformed filter or input
/// line is a [`RangeError`] that gets logged and skipped.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error on the live stream or output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Filter file could not be opened
    #[error("cannot open {}: {source}", .path.display())]
    FilterFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Range collection could not grow
    #[error("out of memory")]
    OutOfMemory,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,
            Error::FilterFile { .. } => 10,
            Error::OutOfMemory => 100,
            Error::Io(_) => 1,
        }
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

/// Result type alias for ipfilter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for range and address parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Empty line
    #[error("empty entry")]
    Empty,

    /// Address does not parse in the selected family
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// Prefix length is not a number or exceeds the address width
    #[error("invalid prefix length: {0}")]
    InvalidPrefix(String),

    /// Range end is below its start
    #[error("inverted range: {high} is below {low}")]
    Inverted { low: String, high: String },

    /// Input record carries a prefix other than the host length
    #[error("only /{bits} is supported, got /{prefix}")]
    NotHostPrefix { bits: u8, prefix: String },

    /// Text after the entry that is not separated by whitespace
    #[error("unexpected trailing text: {0}")]
    TrailingText(String),

    /// Line longer than the reader accepts
    #[error("line longer than {0} bytes")]
    TooLong(usize),
}
