//! Persistence error type.

use thiserror::Error;

/// Errors produced by `nav-io`.
///
/// A missing or unparseable mesh is NOT an error: `load_mesh` reports it
/// as `Ok(None)` and leaves the decision to the caller.  `IoError` covers
/// the genuinely exceptional cases.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type IoResult<T> = Result<T, IoError>;
