//! Error type shared by the code area core
//!
//! Every fallible operation in the library returns [`Result`]. The variants
//! map onto the failure classes a host has to tell apart: bad setter input,
//! mutation of read-only data, unparsable paste-as-code input, clipboard
//! access and data-source failures.

use std::fmt;

pub type Result<T> = std::result::Result<T, CodeAreaError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeAreaError {
    /// A setter received a value outside its domain. No state was changed.
    InvalidArgument(String),
    /// A mutation was attempted on data that has no editable view.
    UnsupportedOperation(&'static str),
    /// Input could not be converted to bytes (e.g. a bad paste-as-code token).
    EncodingFailure(String),
    /// The platform clipboard could not be reached.
    ClipboardUnavailable(String),
    /// The data source failed on read or write.
    BrokenDataSource(String),
}

impl CodeAreaError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn broken_data(message: impl Into<String>) -> Self {
        Self::BrokenDataSource(message.into())
    }

    /// Errors the command handler logs and swallows instead of returning
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ClipboardUnavailable(_))
    }
}

impl fmt::Display for CodeAreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Self::UnsupportedOperation(op) => write!(f, "unsupported operation: {}", op),
            Self::EncodingFailure(msg) => write!(f, "encoding failure: {}", msg),
            Self::ClipboardUnavailable(msg) => write!(f, "clipboard unavailable: {}", msg),
            Self::BrokenDataSource(msg) => write!(f, "broken data source: {}", msg),
        }
    }
}

impl std::error::Error for CodeAreaError {}
