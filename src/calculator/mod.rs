//! Expression pipeline of the calculator.
//!
//! This module provides functionality to:
//! - Rewrite calculator notation into canonical expressions
//! - Evaluate canonical expressions without executing code
//! - Format results for display

mod error;
mod evaluation;
mod format;
mod helpers;
mod lexer;
mod parser;
mod transform;
mod validation;
mod vocabulary;

pub use error::{EvalError, EvaluationError, InvalidExpressionError};
pub use evaluation::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_LEN, Evaluator, MAX_DEPTH_CEILING, MAX_INPUT_LEN_CEILING,
    Value, eval, evaluate,
};
pub use format::{NON_FINITE, format_number, format_result};
pub use helpers::{fact, log10};
pub use parser::{BinaryOp, Expr, UnaryOp, parse};
pub use transform::transform;
pub use validation::validate;
pub use vocabulary::{Arity, Constant, Function};
