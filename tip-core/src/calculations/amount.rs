use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Plain decimal syntax: optional sign, digits with an optional fraction (or a
/// bare fraction such as `.5`), and an optional exponent.
static DECIMAL_SYNTAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("decimal syntax pattern is a valid regex")
});

/// Reason a piece of text could not be read as a cost.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    /// The text was empty or contained only whitespace.
    #[error("amount is empty")]
    Empty,

    /// The text is not a plain decimal number.
    #[error("'{0}' is not a decimal number")]
    Malformed(String),
}

/// Parses text into a cost amount, reporting why it failed.
///
/// Surrounding whitespace is ignored. Exponents are accepted (`"1e3"`), words
/// such as `inf` or `NaN` and thousands separators are not. A number too large
/// for `f64` parses to infinity with the matching sign.
///
/// # Examples
///
/// ```
/// use tip_core::calculations::{ParseAmountError, try_parse_amount};
///
/// assert_eq!(try_parse_amount(" 12.50 "), Ok(12.5));
/// assert_eq!(try_parse_amount("-5"), Ok(-5.0));
/// assert_eq!(try_parse_amount(""), Err(ParseAmountError::Empty));
/// assert!(try_parse_amount("1.2.3").is_err());
/// ```
pub fn try_parse_amount(text: &str) -> Result<f64, ParseAmountError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    if !DECIMAL_SYNTAX.is_match(trimmed) {
        return Err(ParseAmountError::Malformed(text.to_string()));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| ParseAmountError::Malformed(text.to_string()))
}

/// Parses text into a cost amount, treating anything unparsable as zero.
///
/// This never fails: empty input is silently zero, malformed input is zero
/// and logged at `warn`.
pub fn parse_amount(text: &str) -> f64 {
    match try_parse_amount(text) {
        Ok(amount) => amount,
        Err(ParseAmountError::Empty) => 0.0,
        Err(e) => {
            tracing::warn!(input = %text, "{e}; using zero cost");
            0.0
        }
    }
}
