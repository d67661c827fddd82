//! Engine error type.
//!
//! Deliberately small.  Geometric and topological failures (unreachable
//! targets, empty inputs, missing lookups) are NOT errors in this engine:
//! they degrade to `Option`/empty results by design, and out-of-bounds
//! cell access is a programming error that panics.  What remains for a
//! typed error is rejecting configurations no build pass can work with;
//! sub-crates with richer failure surfaces (persistence) define their own
//! enums.

use thiserror::Error;

/// The top-level error type for `nav-core`.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `nav-*` crates.
pub type NavResult<T> = Result<T, NavError>;
