// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for scan results.
//!
//! Supports multiple output formats:
//! - Text: human-readable listing with WCAG criterion references
//! - JSON: stats and violations for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration
//! - HTML: standalone page grouping violations by WCAG criterion

use crate::error::Result;
use crate::scanner::ScanResult;
use crate::violation::{Severity, Violation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
    /// Standalone HTML page
    Html,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Number of violations at each severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub error: usize,
    pub warning: usize,
    pub info: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub unknown: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl SeverityCounts {
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut counts = Self::default();
        for v in violations {
            match v.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Error => counts.error += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
                Severity::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
            Severity::Unknown => self.unknown,
        }
    }
}

/// Group violations by WCAG criterion, with "other" for those without one
pub fn group_by_criterion(violations: &[Violation]) -> BTreeMap<&str, Vec<&Violation>> {
    let mut groups: BTreeMap<&str, Vec<&Violation>> = BTreeMap::new();
    for v in violations {
        groups.entry(v.criterion_or_other()).or_default().push(v);
    }
    groups
}

/// Generate a report for `result`; `target` names the scanned file or URL
pub fn generate_report(result: &ScanResult, target: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generate_text_report(result, target)),
        OutputFormat::Json => generate_json_report(result, target),
        OutputFormat::Sarif => generate_sarif_report(result, target),
        OutputFormat::Html => Ok(generate_html_report(result, target)),
    }
}

fn display_target<'a>(result: &'a ScanResult, target: &'a str) -> &'a str {
    result.url.as_deref().unwrap_or(target)
}

/// Generate human-readable text report
fn generate_text_report(result: &ScanResult, target: &str) -> String {
    let mut output = String::new();

    output.push_str("=== Accessibility Scan Report ===\n\n");
    output.push_str(&format!("Target: {}\n", display_target(result, target)));
    output.push_str(&format!("Elements checked: {}\n", result.total_elements_checked));
    output.push_str(&format!("Scan duration: {:.2}ms\n", result.scan_duration_ms));
    output.push_str(&format!("Compliance score: {:.2}%\n\n", result.compliance_score()));

    if result.violations.is_empty() {
        output.push_str("No violations found!\n");
        return output;
    }

    let counts = SeverityCounts::from_violations(&result.violations);
    let mut summary: Vec<String> = Severity::ALL
        .iter()
        .map(|s| format!("{} {}", counts.get(*s), s))
        .collect();
    if counts.unknown > 0 {
        summary.push(format!("{} unknown", counts.unknown));
    }
    output.push_str(&format!(
        "Found {} violation(s): {}\n\n",
        result.violations.len(),
        summary.join(", ")
    ));

    for (i, v) in result.violations.iter().enumerate() {
        output.push_str(&format!("{}. [{}] {}\n", i + 1, v.severity, v.description));
        output.push_str(&format!("  Rule: {}\n", v.rule_id));
        if let Some(ref criterion) = v.wcag_criterion {
            output.push_str(&format!("  WCAG: {}\n", criterion));
        }
        output.push_str(&format!("  Element: {}\n", v.element));
        if let Some(ref fix) = v.suggested_fix {
            output.push_str(&format!("  Fix: {}\n", fix));
        }
        if let Some(ref url) = v.help_url {
            output.push_str(&format!("  Help: {}\n", url));
        }
        output.push('\n');
    }

    output
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    url: &'a str,
    stats: ReportStats,
    violations: &'a [Violation],
}

#[derive(Debug, Serialize)]
struct ReportStats {
    total_violations: usize,
    scan_duration_ms: f64,
    elements_checked: usize,
    timestamp: String,
    severity_counts: SeverityCounts,
    compliance_score: f64,
}

/// Generate JSON report
fn generate_json_report(result: &ScanResult, target: &str) -> Result<String> {
    let report = JsonReport {
        url: display_target(result, target),
        stats: ReportStats {
            total_violations: result.violations.len(),
            scan_duration_ms: result.scan_duration_ms,
            elements_checked: result.total_elements_checked,
            timestamp: chrono::Utc::now().to_rfc3339(),
            severity_counts: SeverityCounts::from_violations(&result.violations),
            compliance_score: result.compliance_score(),
        },
        violations: &result.violations,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
struct SarifRule {
    id: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<SarifProperties>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifProperties {
    #[serde(rename = "wcagCriterion")]
    wcag_criterion: String,
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::Error => "error",
        Severity::Warning | Severity::Unknown => "warning",
        Severity::Info => "note",
    }
}

/// Generate SARIF report
fn generate_sarif_report(result: &ScanResult, target: &str) -> Result<String> {
    let uri = display_target(result, target).to_string();

    let results: Vec<SarifResult> = result
        .violations
        .iter()
        .map(|v| SarifResult {
            rule_id: v.rule_id.clone(),
            level: sarif_level(v.severity).to_string(),
            message: SarifMessage {
                text: v.description.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation { uri: uri.clone() },
                },
            }],
            properties: v.wcag_criterion.as_ref().map(|c| SarifProperties {
                wcag_criterion: c.clone(),
            }),
        })
        .collect();

    let rules: Vec<SarifRule> = crate::rules::registry()
        .iter()
        .map(|entry| SarifRule {
            id: entry.rule_id.to_string(),
            short_description: SarifMessage {
                text: entry.description.to_string(),
            },
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "a11yscan".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const HTML_STYLE: &str = "body{font-family:sans-serif;margin:2em;color:#1a1a1a}\
table{border-collapse:collapse;width:100%;margin-bottom:2em}\
th,td{border:1px solid #999;padding:.4em;text-align:left;vertical-align:top}\
th{background:#eee}code{white-space:pre-wrap;word-break:break-all}\
.critical,.error{color:#a00000}.warning{color:#7a4b00}.info{color:#00467f}";

/// Generate standalone HTML report
fn generate_html_report(result: &ScanResult, target: &str) -> String {
    let target = escape_html(display_target(result, target));
    let counts = SeverityCounts::from_violations(&result.violations);
    let mut output = String::new();

    output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    output.push_str(&format!("<title>Accessibility report for {}</title>\n", target));
    output.push_str(&format!("<style>{}</style>\n</head>\n<body>\n<main>\n", HTML_STYLE));
    output.push_str(&format!("<h1>Accessibility report for {}</h1>\n", target));

    output.push_str("<table>\n<caption>Summary</caption>\n");
    let stats = [
        ("Total violations", result.violations.len().to_string()),
        ("Elements checked", result.total_elements_checked.to_string()),
        ("Scan duration", format!("{:.2}ms", result.scan_duration_ms)),
        ("Compliance score", format!("{:.2}%", result.compliance_score())),
    ];
    for (label, value) in stats {
        output.push_str(&format!("<tr><th scope=\"row\">{}</th><td>{}</td></tr>\n", label, value));
    }
    for severity in Severity::ALL.into_iter().chain((counts.unknown > 0).then_some(Severity::Unknown)) {
        output.push_str(&format!(
            "<tr><th scope=\"row\">{}</th><td>{}</td></tr>\n",
            severity,
            counts.get(severity)
        ));
    }
    output.push_str("</table>\n");

    if result.violations.is_empty() {
        output.push_str("<p>No violations found!</p>\n");
    }

    for (criterion, group) in group_by_criterion(&result.violations) {
        let heading = if criterion == "other" {
            "Other".to_string()
        } else {
            format!("WCAG {}", escape_html(criterion))
        };
        output.push_str(&format!("<h2>{}</h2>\n<table>\n", heading));
        output.push_str(&format!("<caption>{} violation(s)</caption>\n", group.len()));
        output.push_str(
            "<tr><th scope=\"col\">Severity</th><th scope=\"col\">Rule</th>\
             <th scope=\"col\">Description</th><th scope=\"col\">Element</th>\
             <th scope=\"col\">Fix</th></tr>\n",
        );
        for v in group {
            let description = match v.help_url {
                Some(ref url) => format!(
                    "<a href=\"{}\">{}</a>",
                    escape_html(url),
                    escape_html(&v.description)
                ),
                None => escape_html(&v.description),
            };
            output.push_str(&format!(
                "<tr><td class=\"{sev}\">{sev}</td><td>{}</td><td>{}</td><td><code>{}</code></td><td>{}</td></tr>\n",
                escape_html(&v.rule_id),
                description,
                escape_html(&v.element),
                escape_html(v.suggested_fix.as_deref().unwrap_or("")),
                sev = v.severity,
            ));
        }
        output.push_str("</table>\n");
    }

    output.push_str("</main>\n</body>\n</html>\n");
    output
}
