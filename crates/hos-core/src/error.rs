//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers only what
//! the data model itself can reject.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `hos-core`.
pub type CoreResult<T> = Result<T, CoreError>;
