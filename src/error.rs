// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for a11yscan

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, ScanError>;

/// Scan-level failures.
///
/// Problems local to a single element (an unparseable color, a
/// non-numeric tabindex) are absorbed by the rule that met them and never
/// show up here.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Rule '{rule_id}' failed: {message}")]
    Rule { rule_id: String, message: String },
}
