//! Error types for the calculator pipeline.
//!
//! Numeric-domain anomalies (division by zero, `log` of a negative number,
//! inverse trig out of range) are not errors: they travel as NaN or
//! infinity and are handled by the formatter.

use thiserror::Error;

/// The canonical expression contains a character the evaluator refuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid character {character:?} at byte {position}")]
pub struct InvalidExpressionError {
    /// The offending character.
    pub character: char,
    /// Byte offset of the character in the canonical expression.
    pub position: usize,
}

/// The expression passed the whitelist but could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character {character:?} at byte {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("malformed number {literal:?} at byte {position}")]
    MalformedNumber { literal: String, position: usize },

    #[error("unexpected {found} at byte {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown name {0:?}")]
    UnknownName(String),

    #[error("{0} is a constant and cannot be called")]
    NotCallable(String),

    #[error("{0} is a function and must be called")]
    NotAValue(String),

    #[error("{name} expects {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("unary operator before `**` must be parenthesized (byte {position})")]
    UnaryBeforePower { position: usize },

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("expression is {length} bytes long, limit is {limit}")]
    TooLong { length: usize, limit: usize },
}

/// Failure reported by the calculator facade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("nothing to evaluate")]
    EmptyInput,

    #[error(transparent)]
    InvalidExpression(#[from] InvalidExpressionError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
