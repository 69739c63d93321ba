//! Error types returned by the integer conversions and the bit operations.

use thiserror::Error;

/// A value could not be coerced into an [`Integer`](crate::Integer).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("cannot convert an empty string to an integer")]
    Empty,

    #[error("invalid digit at position {position}")]
    InvalidDigit { position: usize },

    #[error("integer out of range for the target type")]
    OutOfRange,
}

/// Failure of a single bit operation.
///
/// Operations are atomic: on error no value has been produced and the operands are unchanged.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BitOpError {
    /// The receiver is negative, for which bit pattern operations are not defined.
    #[error("{op} is not defined for negative integers")]
    Domain { op: &'static str },

    /// The receiver or a distance argument could not be converted to an integer.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}
