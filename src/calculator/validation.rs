//! Character whitelist applied to canonical expressions before evaluation.
//!
//! This is a coarse filter, not a grammar check: structure is validated by
//! the parser afterwards.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::InvalidExpressionError;

lazy_static! {
    /// Rejected regardless of the surrounding content.
    static ref FORBIDDEN: Regex = Regex::new(r"[;`\\]").unwrap();

    /// Anything outside digits, ASCII letters, whitespace and `. + - * / ^ % ( ) , ! < > = [ ]`.
    static ref OUTSIDE_ALPHABET: Regex =
        Regex::new(r"[^0-9A-Za-z\s.+\-*/^%(),!<>=\[\]]").unwrap();
}

/// Check that `canonical` only uses characters the evaluator accepts.
pub fn validate(canonical: &str) -> Result<(), InvalidExpressionError> {
    let offending = FORBIDDEN
        .find(canonical)
        .or_else(|| OUTSIDE_ALPHABET.find(canonical));

    match offending {
        Some(m) => Err(InvalidExpressionError {
            character: m.as_str().chars().next().unwrap_or_default(),
            position: m.start(),
        }),
        None => Ok(()),
    }
}
