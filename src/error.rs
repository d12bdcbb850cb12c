use std::error::Error;
use std::fmt;

/// Errors surfaced by vector and matrix operations.
///
/// Every fallible operation in the crate reports one of these variants;
/// infallible paths (operator sugar, raw indexing) panic instead and say so
/// in their documentation.
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// An operand or result buffer disagrees with the receiver's length.
    LengthMismatch {
        /// Name of the offending parameter.
        param: &'static str,
        expected: usize,
        got: usize,
    },
    /// An index or subrange lies outside the valid bounds.
    OutOfRange {
        /// What the index addresses, for the message.
        what: &'static str,
        index: usize,
        len: usize,
    },
    /// A size, norm order, or similar argument is outside its domain.
    InvalidArgument { reason: &'static str },
    /// Malformed textual input.
    Format { reason: String },
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinalgError::LengthMismatch {
                param,
                expected,
                got,
            } => write!(
                f,
                "length mismatch for `{}`: expected {}, got {}",
                param, expected, got
            ),
            LinalgError::OutOfRange { what, index, len } => {
                write!(f, "{} {} out of range for length {}", what, index, len)
            }
            LinalgError::InvalidArgument { reason } => {
                write!(f, "invalid argument: {}", reason)
            }
            LinalgError::Format { reason } => {
                write!(f, "malformed vector text: {}", reason)
            }
        }
    }
}

impl Error for LinalgError {}

/// Shorthand result used throughout the crate.
pub type Result<T> = std::result::Result<T, LinalgError>;
