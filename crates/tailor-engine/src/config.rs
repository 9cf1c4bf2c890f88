//! Engine configuration
//!
//! ```yaml
//! parallel: true
//! max_alternatives: 3
//! data_dir: /srv/tailor/knowledge
//! rulebook:
//!   rules:
//!     PM001: { threshold: 3 }
//!   tuning:
//!     texture: { default_balance: 0.85 }
//! ```

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tailor_core::TailorError;
use tailor_rules::RuleBook;

/// Upper bound on alternatives per summary
pub const MAX_ALTERNATIVES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Evaluate categories on the rayon pool
    pub parallel: bool,

    /// Alternatives synthesized per summary, 1 to 3
    pub max_alternatives: usize,

    /// Warnings whose recommendations join `improvement_suggestions`
    pub max_warning_suggestions: usize,

    /// Load tables from `<data_dir>/<table>.json` instead of the built-in pack
    pub data_dir: Option<PathBuf>,

    #[serde(skip)]
    pub rules: RuleBook,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            max_alternatives: MAX_ALTERNATIVES,
            max_warning_suggestions: 3,
            data_dir: None,
            rules: RuleBook::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a config document. The optional `rulebook` section is overlaid
    /// on the default rule book.
    pub fn from_yaml(yaml: &str) -> Result<Self, TailorError> {
        let document: Value = serde_yaml::from_str(yaml).map_err(config_error)?;
        if document.is_null() {
            return Ok(Self::default());
        }
        let mut config: EngineConfig =
            serde_yaml::from_value(document.clone()).map_err(config_error)?;
        if let Some(rulebook) = document.get("rulebook") {
            config.rules = RuleBook::default().overlay(rulebook.clone())?;
        }
        config.check()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TailorError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| TailorError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&yaml)
    }

    /// Apply `TAILOR_DATA_DIR` and `TAILOR_PARALLEL` from the environment.
    pub fn with_env_overrides(self) -> Result<Self, TailorError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, TailorError> {
        if let Some(dir) = lookup("TAILOR_DATA_DIR").filter(|d| !d.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(flag) = lookup("TAILOR_PARALLEL") {
            self.parallel = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(TailorError::Config(format!(
                        "TAILOR_PARALLEL must be a boolean, got '{}'",
                        other
                    )))
                }
            };
        }
        Ok(self)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_rules(mut self, rules: RuleBook) -> Self {
        self.rules = rules;
        self
    }

    fn check(&self) -> Result<(), TailorError> {
        if self.max_alternatives == 0 || self.max_alternatives > MAX_ALTERNATIVES {
            return Err(TailorError::Config(format!(
                "max_alternatives must be between 1 and {}, got {}",
                MAX_ALTERNATIVES, self.max_alternatives
            )));
        }
        Ok(())
    }
}

fn config_error(e: serde_yaml::Error) -> TailorError {
    TailorError::Config(e.to_string())
}
