use std::num::{ParseFloatError, ParseIntError};

/// Failures that abort a scan. Structural problems in a row never end up
/// here; those rows are skipped.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("line {lno}: {field} is not a number: {text:?}")]
    InvalidFloat {
        lno: usize,
        field: String,
        text: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {lno}: {field} is not an integer: {text:?}")]
    InvalidInteger {
        lno: usize,
        field: String,
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("duration pattern failed to compile")]
    Pattern(#[from] regex::Error),
}
