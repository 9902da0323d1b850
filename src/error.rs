//! Error type shared by the import stages.
//!
//! Errors fall into two tiers. Setup failures ([`ImportError::InputNotFound`],
//! [`ImportError::InputMalformed`], [`ImportError::SessionUnavailable`],
//! [`ImportError::Config`]) abort the run. [`ImportError::WriteFailed`] is raised per record;
//! the import driver counts it and moves on to the next group.

use crate::io::store::StoreError;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ImportError {
    /// The input path does not resolve to a readable file.
    InputNotFound(PathBuf),
    /// The input could not be read as a table, or required columns are missing.
    InputMalformed(String),
    /// The document store session could not be established.
    SessionUnavailable(StoreError),
    /// A single record could not be written.
    WriteFailed { text: String, cause: StoreError },
    /// Invalid or incomplete configuration.
    Config(String),
}

impl ImportError {
    /// True for errors that must abort the whole run.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::WriteFailed { .. })
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputNotFound(path) => write!(f, "input file not found: {}", path.display()),
            Self::InputMalformed(reason) => write!(f, "malformed input: {reason}"),
            Self::SessionUnavailable(cause) => write!(f, "document store unavailable: {cause}"),
            Self::WriteFailed { text, cause } => {
                write!(f, "failed to add document for recitation '{text}': {cause}")
            }
            Self::Config(reason) => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SessionUnavailable(cause) | Self::WriteFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
