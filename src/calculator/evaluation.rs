//! Safe evaluation of canonical expressions.
//!
//! The canonical string is checked against the character whitelist, parsed
//! into a tree and interpreted over the fixed vocabulary. No code is ever
//! executed: the only operations reachable are the ones the tree can name.

use std::fmt;

use super::error::{EvalError, EvaluationError};
use super::helpers;
use super::parser::{BinaryOp, Expr, UnaryOp, parse};
use super::validation::validate;
use super::vocabulary;

/// Default parser nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default limit on the canonical expression length, in bytes.
pub const DEFAULT_MAX_INPUT_LEN: usize = 1024;

/// Ceilings applied to configured limits. A left-associative chain such as
/// `1+1+...` yields a tree as deep as the chain, and the tree is walked
/// recursively, so the length ceiling also bounds the recursion.
pub const MAX_DEPTH_CEILING: usize = 256;
pub const MAX_INPUT_LEN_CEILING: usize = 4096;

/// Result of evaluating an expression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    /// Produced by comparisons (`<`, `==`, ...).
    Bool(bool),
}

impl Value {
    /// Numeric view of the value; booleans count as 1 and 0.
    pub fn as_number(self) -> f64 {
        match self {
            Value::Number(n) => n,
            Value::Bool(true) => 1.0,
            Value::Bool(false) => 0.0,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Evaluator with resource limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluator {
    max_depth: usize,
    max_input_len: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_LEN)
    }
}

impl Evaluator {
    /// Limits above [`MAX_DEPTH_CEILING`] and [`MAX_INPUT_LEN_CEILING`] are
    /// clamped.
    pub fn new(max_depth: usize, max_input_len: usize) -> Self {
        Self {
            max_depth: max_depth.min(MAX_DEPTH_CEILING),
            max_input_len: max_input_len.min(MAX_INPUT_LEN_CEILING),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn max_input_len(&self) -> usize {
        self.max_input_len
    }

    /// Validate, parse and evaluate a canonical expression.
    pub fn evaluate(&self, canonical: &str) -> Result<Value, EvalError> {
        validate(canonical)?;

        if canonical.len() > self.max_input_len {
            return Err(EvaluationError::TooLong {
                length: canonical.len(),
                limit: self.max_input_len,
            }
            .into());
        }

        let expr = parse(canonical, self.max_depth)?;
        Ok(eval(&expr))
    }
}

/// Evaluate a canonical expression with the default limits.
pub fn evaluate(canonical: &str) -> Result<Value, EvalError> {
    Evaluator::default().evaluate(canonical)
}

/// Interpret a parsed tree. Domain errors surface as NaN or infinity.
pub fn eval(expr: &Expr) -> Value {
    match expr {
        Expr::Number(n) => Value::Number(*n),
        Expr::Constant(c) => Value::Number(c.value()),
        Expr::Unary { op, operand } => {
            let x = eval(operand).as_number();
            match op {
                UnaryOp::Plus => Value::Number(x),
                UnaryOp::Neg => Value::Number(-x),
            }
        }
        Expr::Binary { op, lhs, rhs } => {
            let a = eval(lhs).as_number();
            let b = eval(rhs).as_number();
            match op {
                BinaryOp::Add => Value::Number(a + b),
                BinaryOp::Sub => Value::Number(a - b),
                BinaryOp::Mul => Value::Number(a * b),
                BinaryOp::Div => Value::Number(a / b),
                BinaryOp::Rem => Value::Number(a % b),
                BinaryOp::Pow => Value::Number(vocabulary::pow(a, b)),
                BinaryOp::Less => Value::Bool(a < b),
                BinaryOp::LessEq => Value::Bool(a <= b),
                BinaryOp::Greater => Value::Bool(a > b),
                BinaryOp::GreaterEq => Value::Bool(a >= b),
                BinaryOp::Eq => Value::Bool(a == b),
                BinaryOp::NotEq => Value::Bool(a != b),
            }
        }
        Expr::Call { function, args } => {
            let args: Vec<f64> = args.iter().map(|a| eval(a).as_number()).collect();
            Value::Number(function.apply(&args))
        }
        Expr::Factorial(arg) => Value::Number(helpers::fact(eval(arg).as_number())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::error::InvalidExpressionError;

    fn number(canonical: &str) -> f64 {
        match evaluate(canonical) {
            Ok(Value::Number(n)) => n,
            other => panic!("canonical={canonical:?} result={other:?}"),
        }
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(number("2 + 2"), 4.0);
        assert_eq!(number("2 + 3 * 4"), 14.0);
        assert_eq!(number("(2 + 3) * 4"), 20.0);
        assert_eq!(number("2**10"), 1024.0);
        assert_eq!(number("-7 % 3"), -1.0);
        assert_eq!(number("(50/100)"), 0.5);
    }

    #[test]
    fn test_math_vocabulary() {
        assert_eq!(number("Math.sqrt(16)"), 4.0);
        assert_eq!(number("Math.abs(-3)"), 3.0);
        assert_eq!(number("Math.pow(2, 3)"), 8.0);
        assert!((number("Math.log(Math.E)") - 1.0).abs() < 1e-15);
        assert_eq!(number("Math.sin(0)"), 0.0);
        assert_eq!(number("Math.max(1, 7, 3)"), 7.0);
        assert!((number("log10(1000)") - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(number("fact(5)"), 120.0);
        assert_eq!(number("fact(0)"), 1.0);
        assert_eq!(number("fact((2+1))"), 6.0);
        assert!(number("fact((-3))").is_nan());
    }

    #[test]
    fn test_degree_conversion_forms() {
        assert!((number("Math.sin((30) * Math.PI / 180)") - 0.5).abs() < 1e-12);
        assert!((number("(Math.asin(0.5) * 180 / Math.PI)") - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_domain_anomalies_are_not_errors() {
        assert_eq!(number("1/0"), f64::INFINITY);
        assert_eq!(number("-1/0"), f64::NEG_INFINITY);
        assert!(number("0/0").is_nan());
        assert!(number("Math.log(-1)").is_nan());
        assert!(number("Math.asin(2)").is_nan());
        assert_eq!(number("log10(0)"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_comparisons_yield_booleans() {
        assert_eq!(evaluate("1 < 2"), Ok(Value::Bool(true)));
        assert_eq!(evaluate("2 + 2 == 5"), Ok(Value::Bool(false)));
        assert_eq!(evaluate("0/0 != 0/0"), Ok(Value::Bool(true)));
        // booleans coerce in arithmetic
        assert_eq!(evaluate("(1 < 2) + 1"), Ok(Value::Number(2.0)));
    }

    #[test]
    fn test_whitelist_rejections() {
        for canonical in ["1;2", "Math.PI`", "1\\n", "2 + 3; fact(5)", "a_b"] {
            assert!(
                matches!(evaluate(canonical), Err(EvalError::InvalidExpression(_))),
                "canonical={canonical:?}"
            );
        }
        assert_eq!(
            evaluate("1 + {2}"),
            Err(EvalError::InvalidExpression(InvalidExpressionError {
                character: '{',
                position: 4
            }))
        );
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(
            evaluate("window"),
            Err(EvalError::Evaluation(EvaluationError::UnknownName(_)))
        ));
        assert!(matches!(
            evaluate("2 +"),
            Err(EvalError::Evaluation(EvaluationError::UnexpectedEnd))
        ));
        assert!(matches!(
            evaluate("[1]"),
            Err(EvalError::Evaluation(EvaluationError::UnexpectedCharacter { .. }))
        ));
    }

    #[test]
    fn test_length_limit() {
        let evaluator = Evaluator::new(DEFAULT_MAX_DEPTH, 8);
        assert_eq!(evaluator.evaluate("1+2+3"), Ok(Value::Number(6.0)));
        assert_eq!(
            evaluator.evaluate("1+2+3+4+5"),
            Err(EvalError::Evaluation(EvaluationError::TooLong {
                length: 9,
                limit: 8
            }))
        );
    }

    #[test]
    fn test_limits_are_clamped() {
        let evaluator = Evaluator::new(usize::MAX, usize::MAX);
        assert_eq!(evaluator.max_depth(), MAX_DEPTH_CEILING);
        assert_eq!(evaluator.max_input_len(), MAX_INPUT_LEN_CEILING);

        let chain = vec!["1"; MAX_INPUT_LEN_CEILING / 2].join("+");
        assert_eq!(evaluator.evaluate(&chain), Ok(Value::Number(2048.0)));

        let longer = format!("{chain}+1+1");
        assert!(matches!(
            evaluator.evaluate(&longer),
            Err(EvalError::Evaluation(EvaluationError::TooLong { .. }))
        ));
    }
}
