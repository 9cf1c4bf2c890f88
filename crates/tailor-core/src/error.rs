//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TailorError {
    /// A knowledge table could not be loaded or decoded.
    #[error("DATA/{table}: {cause}")]
    DataUnavailable { table: String, cause: String },

    /// `validate` was called without a loaded snapshot.
    #[error("ENGINE/not ready: call initialize() before validate()")]
    EngineNotReady,

    #[error("CONFIG/{0}")]
    Config(String),
}

impl TailorError {
    pub fn data_unavailable(table: impl Into<String>, cause: impl ToString) -> Self {
        TailorError::DataUnavailable {
            table: table.into(),
            cause: cause.to_string(),
        }
    }

    /// Setup errors require the caller to re-run `initialize()`.
    pub fn is_setup(&self) -> bool {
        matches!(self, TailorError::DataUnavailable { .. } | TailorError::EngineNotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = TailorError::data_unavailable("colors", "file missing");
        assert_eq!(err.to_string(), "DATA/colors: file missing");
        assert!(err.is_setup());
        assert!(TailorError::EngineNotReady.to_string().starts_with("ENGINE/"));
        assert!(!TailorError::Config("bad".into()).is_setup());
    }
}
