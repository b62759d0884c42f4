//! Calculator configuration, read from TOML.
//!
//! ```toml
//! angle_mode = "radians"
//! history_capacity = 100
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculator::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_LEN, Evaluator};
use crate::session::{AngleMode, DEFAULT_HISTORY_CAPACITY};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Angle mode a new calculator starts in.
    pub angle_mode: AngleMode,
    /// Number of history entries kept.
    pub history_capacity: usize,
    /// Maximum nesting depth of an expression, at most
    /// [`MAX_DEPTH_CEILING`](crate::calculator::MAX_DEPTH_CEILING).
    pub max_depth: usize,
    /// Maximum length of a canonical expression in bytes, at most
    /// [`MAX_INPUT_LEN_CEILING`](crate::calculator::MAX_INPUT_LEN_CEILING).
    pub max_input_len: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

impl CalculatorConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid calculator configuration")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// `<config dir>/scicalc/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scicalc").join("config.toml"))
    }

    /// Load the file at [`CalculatorConfig::default_path`], falling back to
    /// defaults when it is missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "ignoring configuration file");
                Self::default()
            }
        }
    }

    /// Evaluator honouring the configured limits.
    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.max_depth, self.max_input_len)
    }
}
