//! Scientific calculator core.
//!
//! Raw input such as `sin(30) + 5! * 50%` is rewritten into a canonical
//! expression, evaluated by a small interpreter over a fixed math vocabulary,
//! and formatted for display:
//!
//! ```
//! use scicalc::{AngleMode, Calculator};
//!
//! let mut calc = Calculator::default();
//! assert_eq!(calc.evaluate_expression("sin(30)", AngleMode::Degrees).unwrap(), "0.5");
//! assert_eq!(calc.evaluate("5! / 2").unwrap(), "60");
//! assert_eq!(calc.history().len(), 2);
//! ```

pub mod calculator;
pub mod config;
pub mod logging;
pub mod session;

pub use calculator::{
    EvalError, EvaluationError, Evaluator, InvalidExpressionError, Value, evaluate,
    format_number, format_result, transform,
};
pub use config::CalculatorConfig;
pub use logging::init_logging;
pub use session::{AngleMode, Calculator, History, HistoryEntry};
