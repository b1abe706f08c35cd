// SPDX-License-Identifier: PMPL-1.0-or-later
//! Scanner that runs the registered rules over one document.
//!
//! Rules run one after another in registration order; each returns its own
//! violations, which are appended to the result. A rule failure aborts the
//! scan.

use crate::document::Document;
use crate::error::{Result, ScanError};
use crate::fetch::Fetch;
use crate::rules::{self, Rule};
use crate::score::compliance_score;
use crate::violation::Violation;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of scanning one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    /// Set only when the document was fetched over the network
    pub url: Option<String>,
    /// Violations in rule registration order
    pub violations: Vec<Violation>,
    pub scan_duration_ms: f64,
    /// Sum over all rules; an element may be counted by several rules
    pub total_elements_checked: usize,
}

impl ScanResult {
    pub fn compliance_score(&self) -> f64 {
        compliance_score(&self.violations, self.total_elements_checked)
    }

    /// Whether any critical or error violation was found
    pub fn has_blocking(&self) -> bool {
        self.violations.iter().any(|v| v.severity.is_blocking())
    }
}

/// Ordered set of rules applied to each document
pub struct Scanner {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::with_all_rules()
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("rules", &self.rule_ids())
            .finish()
    }
}

impl Scanner {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Scanner with every built-in rule
    pub fn with_all_rules() -> Self {
        Self::new(rules::all_rules())
    }

    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Remove every rule with the given id; unknown ids are ignored
    pub fn remove_rule(&mut self, rule_id: &str) {
        self.rules.retain(|rule| rule.rule_id() != rule_id);
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.rule_id()).collect()
    }

    /// Run every rule over `document`
    pub fn scan(&self, document: &Document) -> Result<ScanResult> {
        let start = Instant::now();
        let mut violations = Vec::new();
        let mut total_elements_checked = 0;

        for rule in &self.rules {
            let outcome = rule.check(document).map_err(|e| match e {
                ScanError::Rule { .. } => e,
                other => ScanError::Rule {
                    rule_id: rule.rule_id().to_string(),
                    message: other.to_string(),
                },
            })?;

            debug!(
                "Rule {} checked {} elements, found {} violations",
                rule.rule_id(),
                outcome.elements_checked,
                outcome.violations.len()
            );

            total_elements_checked += outcome.elements_checked;
            violations.extend(outcome.violations);
        }

        let scan_duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!(
            "Scan complete: {} violations across {} elements in {:.2}ms",
            violations.len(),
            total_elements_checked,
            scan_duration_ms
        );

        Ok(ScanResult {
            url: None,
            violations,
            scan_duration_ms,
            total_elements_checked,
        })
    }

    /// Parse and scan raw markup
    pub fn scan_html(&self, markup: &str) -> Result<ScanResult> {
        self.scan(&Document::parse(markup))
    }

    /// Read and scan a local file
    pub fn scan_file(&self, path: &Path) -> Result<ScanResult> {
        info!("Scanning file: {}", path.display());
        let markup = std::fs::read_to_string(path)?;
        self.scan_html(&markup)
    }

    /// Fetch `url` and scan the returned markup
    pub async fn scan_url(&self, fetcher: &dyn Fetch, url: &str) -> Result<ScanResult> {
        let markup = fetcher.fetch(url).await?;
        let mut result = self.scan_html(&markup)?;
        result.url = Some(url.to_string());
        Ok(result)
    }
}
