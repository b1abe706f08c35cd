// SPDX-License-Identifier: PMPL-1.0-or-later
//! Table rule - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! Checks that data tables have a caption, header cells with `scope`, and
//! that every data cell can be tied back to a header.

use crate::document::Document;
use crate::error::Result;
use crate::rules::{Rule, RuleOutcome};
use crate::violation::{Severity, Violation};

pub const RULE_ID: &str = "table-accessibility";

/// Table structure rule
pub struct TableAccessibilityRule;

impl Rule for TableAccessibilityRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Tables must have proper structure and headers"
    }

    fn check(&self, document: &Document) -> Result<RuleOutcome> {
        let tables = document.find_all(&["table"]);
        let mut outcome = RuleOutcome::new(tables.len());

        for table in tables {
            if !table.contains("caption") {
                outcome.push(
                    Violation::new(RULE_ID, Severity::Warning, table.serialize(), "Table missing caption")
                        .with_wcag("1.3.1")
                        .with_fix("Add <caption> element to describe table content"),
                );
            }

            let headers = table.find_all(&["th"]);
            if headers.is_empty() {
                outcome.push(
                    Violation::new(RULE_ID, Severity::Error, table.serialize(), "Table has no header cells")
                        .with_wcag("1.3.1")
                        .with_fix("Add <th> elements for table headers"),
                );
                continue;
            }

            for header in &headers {
                if !header.has_value("scope") {
                    outcome.push(
                        Violation::new(
                            RULE_ID,
                            Severity::Warning,
                            header.serialize(),
                            "Table header missing scope attribute",
                        )
                        .with_wcag("1.3.1")
                        .with_fix("Add scope=\"col\" or scope=\"row\" to header cells"),
                    );
                }
            }

            for cell in table.find_all(&["td"]) {
                let Some(row) = cell.parent_of_type("tr") else {
                    continue;
                };
                if !cell.has_value("headers") && !row.contains("th") {
                    outcome.push(
                        Violation::new(
                            RULE_ID,
                            Severity::Error,
                            cell.serialize(),
                            "Table cell not associated with headers",
                        )
                        .with_wcag("1.3.1")
                        .with_fix("Ensure all data cells are associated with headers"),
                    );
                }
            }
        }

        Ok(outcome)
    }
}
