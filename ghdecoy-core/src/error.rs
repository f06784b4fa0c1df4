//! Error types for the ghdecoy-core crate.

/// Error returned when a timeframe specification cannot be parsed.
///
/// Parsing is all-or-nothing: the first bad token aborts the whole
/// specification.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeframeError {
    /// A token between commas was empty.
    #[error("empty token in timeframe `{input}`")]
    EmptyToken {
        /// The full specification that was being parsed.
        input: String,
    },

    /// An interval token did not split into exactly two dates.
    #[error("invalid interval `{token}` (expected YYYYMMDD-YYYYMMDD)")]
    InvalidInterval {
        /// The offending token.
        token: String,
    },

    /// A date component was not an 8-digit `YYYYMMDD` calendar date.
    #[error("invalid date `{token}` (expected YYYYMMDD)")]
    InvalidDate {
        /// The offending date component.
        token: String,
    },
}
