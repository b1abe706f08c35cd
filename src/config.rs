// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for a11yscan
//!
//! Loaded from TOML, then overridden by `A11YSCAN_*` environment
//! variables, then by command-line flags.

use crate::error::{Result, ScanError};
use crate::report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub scan: ScanConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout
    pub timeout_secs: u64,
    pub follow_redirects: bool,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Rule names to run; empty means all rules
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: OutputFormat,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            follow_redirects: true,
            user_agent: format!("a11yscan/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `A11YSCAN_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(raw) = lookup("A11YSCAN_TIMEOUT_SECS") {
            self.fetch.timeout_secs = raw.trim().parse().map_err(|_| {
                ScanError::Config(format!("A11YSCAN_TIMEOUT_SECS must be a whole number, got '{}'", raw))
            })?;
        }

        if let Some(agent) = lookup("A11YSCAN_USER_AGENT") {
            self.fetch.user_agent = agent;
        }

        if let Some(rules) = lookup("A11YSCAN_RULES") {
            self.scan.rules = rules
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("a11yscan")
        .join("config.toml")
}

/// Load configuration from `path`; a missing file yields the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    Config::from_toml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fetch.timeout_secs, 30);
        assert!(config.fetch.follow_redirects);
        assert!(config.fetch.user_agent.starts_with("a11yscan/"));
        assert!(config.scan.rules.is_empty());
        assert_eq!(config.report.format, OutputFormat::Text);
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            [fetch]
            timeout_secs = 5

            [scan]
            rules = ["img-alt", "focus"]

            [report]
            format = "json"
        "#,
        )
        .unwrap();
        assert_eq!(config.fetch.timeout_secs, 5);
        assert!(config.fetch.follow_redirects);
        assert_eq!(config.scan.rules, vec!["img-alt", "focus"]);
        assert_eq!(config.report.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(Config::from_toml_str("fetch = 3"), Err(ScanError::Toml(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fetch]\nfollow_redirects = false\n").unwrap();
        let config = load_config(&path).unwrap();
        assert!(!config.fetch.follow_redirects);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("A11YSCAN_TIMEOUT_SECS", "12"),
            ("A11YSCAN_RULES", "table, language ,"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.fetch.timeout_secs, 12);
        assert_eq!(config.scan.rules, vec!["table", "language"]);
    }

    #[test]
    fn test_bad_timeout_override() {
        let mut config = Config::default();
        let result = config.apply_overrides(|k| (k == "A11YSCAN_TIMEOUT_SECS").then(|| "soon".to_string()));
        assert!(matches!(result, Err(ScanError::Config(_))));
    }
}
