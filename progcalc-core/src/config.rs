//! Startup configuration loaded from JSON.
//!
//! ```json
//! { "mode": "programmer", "base": "HEX" }
//! ```
//!
//! Missing fields fall back to standard mode and DEC.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::base::Base;
use crate::error::CalcResult;
use crate::state::{CalculatorState, Mode};

/// Initial mode and base for a calculator session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub base: Base,
}

impl CalcConfig {
    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Zeroed state for this config.
    pub fn initial_state(&self) -> CalculatorState {
        CalculatorState::new(self.mode, self.base)
    }
}

/// Load a config file.
pub fn load_config(path: impl AsRef<Path>) -> CalcResult<CalcConfig> {
    let text = std::fs::read_to_string(path)?;
    CalcConfig::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    #[test]
    fn test_full_config() {
        let config = CalcConfig::from_json(r#"{"mode": "programmer", "base": "HEX"}"#).unwrap();
        assert_eq!(config.mode, Mode::Programmer);
        assert_eq!(config.base, Base::Hex);

        let state = config.initial_state();
        assert_eq!(state.display(), "0");
        assert_eq!(state.base(), Base::Hex);
    }

    #[test]
    fn test_defaults() {
        let config = CalcConfig::from_json("{}").unwrap();
        assert_eq!(config, CalcConfig::default());
        assert_eq!(config.mode, Mode::Standard);
        assert_eq!(config.base, Base::Dec);
    }

    #[test]
    fn test_bad_json() {
        let err = CalcConfig::from_json(r#"{"base": "TRI"}"#).unwrap_err();
        assert!(matches!(err, CalcError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("progcalc-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"base": "OCT"}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.base, Base::Oct);
        assert_eq!(config.mode, Mode::Standard);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = load_config("/nonexistent/progcalc.json").unwrap_err();
        assert!(matches!(err, CalcError::Io(_)));
    }
}
