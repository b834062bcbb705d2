//! Error types for scgview.
//!
//! All fallible operations return [`ScgError`]. Only [`ScgError::Validation`] is
//! recoverable: the caller reports it inline and carries on. Everything else aborts
//! the current request (or startup, when a vocabulary cannot be loaded).
//!
//! # Examples
//!
//! ```
//! use scgview::error::{ScgError, Result};
//!
//! fn check(count: usize) -> Result<()> {
//!     if count == 0 {
//!         return Err(ScgError::validation("count must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(0).unwrap_err().is_recoverable());
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for scgview operations.
#[derive(Error, Debug)]
pub enum ScgError {
    /// I/O errors other than a missing file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required vocabulary or table file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A malformed line in a vocabulary file
    #[error("Parse error in {} at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// User input rejected before any lookup happens
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed generation table
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with ScgError.
pub type Result<T> = std::result::Result<T, ScgError>;

impl ScgError {
    /// Create a new parse error.
    pub fn parse<P: Into<PathBuf>, S: Into<String>>(path: P, line: usize, msg: S) -> Self {
        ScgError::Parse {
            path: path.into(),
            line,
            message: msg.into(),
        }
    }

    /// Create a new validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        ScgError::Validation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ScgError::Other(msg.into())
    }

    /// Map an I/O error from opening `path`, keeping a missing file distinct.
    pub fn open<P: Into<PathBuf>>(path: P, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            ScgError::FileNotFound(path.into())
        } else {
            ScgError::Io(err)
        }
    }

    /// Whether the error can be reported inline without aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScgError::Validation(_))
    }
}
