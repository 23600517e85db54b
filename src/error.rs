//! Error types for the fallible arithmetic operations.

use thiserror::Error;

/// Errors surfaced by the fallible `BigUint` operations.
///
/// Internal design invariants (normal-form inputs, bounded correction loops)
/// are debug assertions, not variants of this enum.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    /// Division or modulo with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// Subtraction would produce a negative value.
    #[error("subtraction underflow: subtrahend exceeds minuend")]
    Underflow,

    /// `pow` exponent at or above 10⁹.
    #[error("exponent {0} out of range: must be below 1000000000")]
    ExponentOutOfRange(u32),

    /// A value outside 0..=9 (or a non-digit byte) in a decimal digit stream.
    #[error("invalid decimal digit at position {0}")]
    InvalidDigit(usize),

    /// An empty digit sequence where a number was expected.
    #[error("empty digit sequence")]
    EmptyDigits,
}

/// Type alias for Result with ArithmeticError
pub type Result<T> = std::result::Result<T, ArithmeticError>;
