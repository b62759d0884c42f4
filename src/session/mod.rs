//! Calculator facade.
//!
//! Runs an input through transform → evaluate → format and keeps the state
//! the UI needs around it: angle mode, last answer and history. The caller
//! owns the [`Calculator`]; nothing here is global.

mod angle;
mod history;

pub use angle::AngleMode;
pub use history::{DEFAULT_HISTORY_CAPACITY, History, HistoryEntry};

use tracing::{debug, warn};

use crate::calculator::{EvalError, Evaluator, format_result, transform};
use crate::config::CalculatorConfig;

#[derive(Clone, Debug)]
pub struct Calculator {
    evaluator: Evaluator,
    angle_mode: AngleMode,
    history: History,
    last_answer: Option<String>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

impl Calculator {
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            evaluator: config.evaluator(),
            angle_mode: config.angle_mode,
            history: History::with_capacity(config.history_capacity),
            last_answer: None,
        }
    }

    /// Evaluate `raw` in the calculator's current angle mode.
    pub fn evaluate(&mut self, raw: &str) -> Result<String, EvalError> {
        self.evaluate_expression(raw, self.angle_mode)
    }

    /// Evaluate `raw` and return the formatted result.
    ///
    /// On success the result becomes the last answer and is recorded in the
    /// history. On failure neither is touched. Blank input yields
    /// [`EvalError::EmptyInput`], which callers usually ignore.
    pub fn evaluate_expression(
        &mut self,
        raw: &str,
        angle_mode: AngleMode,
    ) -> Result<String, EvalError> {
        if raw.trim().is_empty() {
            return Err(EvalError::EmptyInput);
        }

        let canonical = transform(raw, angle_mode.is_degrees());
        let value = self.evaluator.evaluate(&canonical).inspect_err(|err| {
            warn!(expression = raw, canonical = %canonical, error = %err, "calculation failed");
        })?;
        let formatted = format_result(&value);

        debug!(expression = raw, canonical = %canonical, result = %formatted, "evaluated expression");

        self.last_answer = Some(formatted.clone());
        self.history.push(HistoryEntry::new(raw, formatted.clone()));
        Ok(formatted)
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn set_angle_mode(&mut self, angle_mode: AngleMode) {
        self.angle_mode = angle_mode;
    }

    /// Switch between degrees and radians, returning the new mode.
    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        self.angle_mode = self.angle_mode.toggled();
        self.angle_mode
    }

    /// The most recent formatted result, for "insert previous answer".
    pub fn last_answer(&self) -> Option<&str> {
        self.last_answer.as_deref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Expression of the history entry at `index` (0 = newest), to put back
    /// into the input.
    pub fn recall(&self, index: usize) -> Option<&str> {
        self.history.get(index).map(|entry| entry.expression.as_str())
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
