// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form label rule - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! Every visible `input`, `select` and `textarea` needs a label, either
//! through `<label for="id">` or through `aria-label`/`aria-labelledby`.

use crate::document::{AttrPredicate, Document};
use crate::error::Result;
use crate::rules::{Rule, RuleOutcome};
use crate::violation::{Severity, Violation};

pub const RULE_ID: &str = "form-label";

const FORM_CONTROLS: &[&str] = &["input", "select", "textarea"];

/// Rule for form control labels
pub struct FormLabelRule;

impl Rule for FormLabelRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Form inputs must have associated labels"
    }

    fn check(&self, document: &Document) -> Result<RuleOutcome> {
        let controls = document.find_all(FORM_CONTROLS);
        let mut outcome = RuleOutcome::new(controls.len());

        let label_targets: Vec<&str> = document
            .find_all_by_attr("for", AttrPredicate::Present)
            .into_iter()
            .filter(|el| el.name() == "label")
            .filter_map(|el| el.attr("for"))
            .collect();

        for control in controls {
            if control.attr("type") == Some("hidden") {
                continue;
            }

            let id = control.attr("id").filter(|id| !id.is_empty());
            let has_aria_label =
                control.has_value("aria-label") || control.has_value("aria-labelledby");

            match id {
                None if !has_aria_label => {
                    outcome.push(
                        Violation::new(
                            RULE_ID,
                            Severity::Error,
                            control.serialize(),
                            "Form input lacks a proper label",
                        )
                        .with_wcag("1.3.1")
                        .with_fix("Add a label element with 'for' attribute, or aria-label/aria-labelledby"),
                    );
                }
                Some(id) if !has_aria_label && !label_targets.contains(&id) => {
                    outcome.push(
                        Violation::new(
                            RULE_ID,
                            Severity::Error,
                            control.serialize(),
                            format!("No label found for input with id '{}'", id),
                        )
                        .with_wcag("1.3.1")
                        .with_fix(format!("Add a label with for='{}'", id)),
                    );
                }
                _ => {}
            }
        }

        Ok(outcome)
    }
}
