//! Error types for digest and distance operations.

use thiserror::Error;

/// Result type for hexmix operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the digest and distance functions.
///
/// Every failure is detected before any work begins, so a caller that fixes
/// the argument and retries gets a normal result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument violated one of the documented constraints.
    #[error("invalid parameter: {0}")]
    InvalidParameter(Constraint),
}

/// The constraint an argument failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Constraint {
    #[error("output hex length must be even, got {0}")]
    OddLength(usize),
    #[error("output hex length must be at least 2, got {0}")]
    TooShort(usize),
    #[error("output hex length must be at most {max}, got {0}", max = crate::MAX_HEX_LEN)]
    TooLong(usize),
    #[error("malformed hex: {0}")]
    MalformedHex(String),
}

impl From<Constraint> for Error {
    fn from(constraint: Constraint) -> Self {
        Error::InvalidParameter(constraint)
    }
}
