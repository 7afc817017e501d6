use std::result::Result as StdResult;

use thiserror::Error;

/// Result type for bower-core operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Most invalid usage in this crate is logged and degrades to a no-op (see
/// the crate docs); errors are returned only where a genuine caller contract
/// exists, such as widget composition seams.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// Invalid input error.
    #[error("invalid: {0}")]
    Invalid(String),
    /// Internal invariant broken.
    #[error("internal: {0}")]
    Internal(String),
}
