//! Error types for the array-text codec.

use thiserror::Error;

/// Error type for array-text parsing and emission.
#[derive(Debug, Error)]
pub enum DataError {
    /// More distinct separator characters than the declared dimensionality.
    #[error("too many dimensions in the data: found {found} separators, declared {declared}")]
    TooManyDimensions {
        /// Declared dimensionality.
        declared: usize,
        /// Number of distinct separators present.
        found: usize,
    },

    /// Single-comma 2-D input cannot be told apart as a row or a column.
    #[error("ambiguous data: {text:?}")]
    Ambiguous {
        /// The offending input.
        text: String,
    },

    /// A token that is neither an integer nor a floating-point value.
    #[error("not numeric data: {token:?}")]
    NotNumeric {
        /// The offending token.
        token: String,
    },

    /// Value tree depth does not match the delimiter sequence length.
    #[error("array depth {found} does not match {expected} delimiters")]
    DepthMismatch {
        /// Delimiter sequence length.
        expected: usize,
        /// Actual depth of the value tree.
        found: usize,
    },

    /// A delimiter character outside the recognized separator set.
    #[error("unknown delimiter {delimiter:?}, expected one of ';', ',' or ':'")]
    UnknownDelimiter {
        /// The offending character.
        delimiter: char,
    },

    /// A delimiter character declared more than once.
    #[error("duplicate delimiter {delimiter:?} in delimiter sequence")]
    DuplicateDelimiter {
        /// The offending character.
        delimiter: char,
    },
}
