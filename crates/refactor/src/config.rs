//! Refactoring configuration

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// User configuration, read from `<config dir>/foxkit/refactor.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefactorConfig {
    /// Refactoring ids never offered nor executed
    pub disabled: Vec<String>,
    /// Refactoring ids always marked preferred
    pub preferred: Vec<String>,
    pub log_level: LogLevel,
}

impl RefactorConfig {
    /// Load from the user config dir, falling back to defaults when absent
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("foxkit")
            .join("refactor.toml")
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        !self.disabled.iter().any(|disabled| disabled == id)
    }

    /// Preferred when configured so, else `default`
    pub fn is_preferred(&self, id: &str, default: bool) -> bool {
        default || self.preferred.iter().any(|preferred| preferred == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml() {
        let config = RefactorConfig::from_toml("disabled = [\"flip-if-else\"]\n").unwrap();

        assert!(!config.is_enabled("flip-if-else"));
        assert!(config.is_enabled("negate-expression"));
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_preferred() {
        let config = RefactorConfig::from_toml("preferred = [\"negate-expression\"]\nlog_level = \"debug\"\n").unwrap();

        assert!(config.is_preferred("negate-expression", false));
        assert!(!config.is_preferred("flip-if-else", false));
        assert!(config.is_preferred("flip-if-else", true));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RefactorConfig {
            disabled: vec!["a".into()],
            preferred: vec!["b".into()],
            log_level: LogLevel::Warn,
        };

        let parsed = RefactorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(RefactorConfig::from_toml("disabled = 3").is_err());
    }

    #[test]
    fn test_config_path() {
        assert!(RefactorConfig::config_path().ends_with("foxkit/refactor.toml"));
    }
}
