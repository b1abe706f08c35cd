// SPDX-License-Identifier: PMPL-1.0-or-later
//! Violation types produced by rules and consumed by reports.

use serde::{Deserialize, Serialize};

/// Severity levels for violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks use of the page entirely
    Critical,
    /// Must be fixed
    Error,
    /// Should be addressed
    Warning,
    /// Informational
    Info,
    /// Any severity name we do not recognise when reading a report back
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// Severities rules report, most severe first
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ];

    /// Weight of one violation of this severity in the compliance score
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Critical => 1.0,
            Severity::Error => 0.7,
            Severity::Warning => 0.3,
            Severity::Info => 0.1,
            Severity::Unknown => 0.5,
        }
    }

    /// Whether this severity fails a strict scan
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Critical | Severity::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "unknown" => Ok(Severity::Unknown),
            other => Err(format!("Unknown severity: {}", other)),
        }
    }
}

/// Element sentinel for violations that concern the whole document
pub const DOCUMENT_ELEMENT: &str = "document";

/// A single accessibility defect reported by a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier of the rule that raised it (e.g. "img-alt-text")
    pub rule_id: String,
    /// Severity level
    pub severity: Severity,
    /// Serialized markup of the offending element, or [`DOCUMENT_ELEMENT`]
    pub element: String,
    /// Human-readable explanation
    pub description: String,
    /// WCAG success criterion (e.g. "1.1.1")
    pub wcag_criterion: Option<String>,
    /// Suggested remediation
    pub suggested_fix: Option<String>,
    /// Reference link
    pub help_url: Option<String>,
}

impl Violation {
    /// Create a new violation
    pub fn new(
        rule_id: &str,
        severity: Severity,
        element: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            element: element.into(),
            description: description.into(),
            wcag_criterion: None,
            suggested_fix: None,
            help_url: None,
        }
    }

    /// Set the WCAG criterion, and the matching "Understanding" page when known
    pub fn with_wcag(mut self, criterion: &str) -> Self {
        self.wcag_criterion = Some(criterion.to_string());
        if self.help_url.is_none() {
            self.help_url = understanding_url(criterion);
        }
        self
    }

    /// Set the suggested fix
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    /// Set an explicit help URL
    pub fn with_help_url(mut self, url: &str) -> Self {
        self.help_url = Some(url.to_string());
        self
    }

    /// Criterion used for grouping; "other" when none was set
    pub fn criterion_or_other(&self) -> &str {
        self.wcag_criterion.as_deref().unwrap_or("other")
    }
}

/// Slugs of the W3C "Understanding WCAG 2.1" pages for the criteria we report
const UNDERSTANDING_SLUGS: &[(&str, &str)] = &[
    ("1.1.1", "non-text-content"),
    ("1.3.1", "info-and-relationships"),
    ("1.4.3", "contrast-minimum"),
    ("2.1.1", "keyboard"),
    ("2.4.6", "headings-and-labels"),
    ("2.4.7", "focus-visible"),
    ("3.1.1", "language-of-page"),
    ("3.1.2", "language-of-parts"),
    ("4.1.2", "name-role-value"),
];

/// W3C reference page for a criterion, if we know it
pub fn understanding_url(criterion: &str) -> Option<String> {
    UNDERSTANDING_SLUGS
        .iter()
        .find(|(c, _)| *c == criterion)
        .map(|(_, slug)| format!("https://www.w3.org/WAI/WCAG21/Understanding/{}.html", slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_help_url() {
        let v = Violation::new("img-alt-text", Severity::Error, "<img>", "Image missing alt text")
            .with_wcag("1.1.1")
            .with_fix("Add alt");
        assert_eq!(v.wcag_criterion.as_deref(), Some("1.1.1"));
        assert_eq!(
            v.help_url.as_deref(),
            Some("https://www.w3.org/WAI/WCAG21/Understanding/non-text-content.html")
        );
        assert_eq!(v.suggested_fix.as_deref(), Some("Add alt"));
    }

    #[test]
    fn test_unknown_criterion_has_no_help_url() {
        let v = Violation::new("x", Severity::Info, "document", "d").with_wcag("9.9.9");
        assert!(v.help_url.is_none());
    }

    #[test]
    fn test_explicit_help_url_wins() {
        let v = Violation::new("x", Severity::Info, "document", "d")
            .with_help_url("https://example.com/help")
            .with_wcag("1.1.1");
        assert_eq!(v.help_url.as_deref(), Some("https://example.com/help"));
    }

    #[test]
    fn test_criterion_defaults_to_other() {
        let v = Violation::new("x", Severity::Warning, "document", "d");
        assert_eq!(v.criterion_or_other(), "other");
    }

    #[test]
    fn test_severity_serde_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_unrecognised_severity_reads_as_unknown() {
        let v: Violation = serde_json::from_str(
            r#"{"rule_id":"x","severity":"fatal","element":"document","description":"d",
                "wcag_criterion":null,"suggested_fix":null,"help_url":null}"#,
        )
        .unwrap();
        assert_eq!(v.severity, Severity::Unknown);
        assert_eq!(v.severity.weight(), 0.5);
        assert!(!v.severity.is_blocking());
    }
}
