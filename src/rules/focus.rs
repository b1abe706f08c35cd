// SPDX-License-Identifier: PMPL-1.0-or-later
//! Focus indicator rule - WCAG 2.4.7 Focus Visible (Level AA)
//!
//! Checks focusable elements for inline styles that suppress the focus
//! outline and for negative `tabindex` values.
//!
//! Each selector is evaluated on its own, so an element matched by two
//! selectors (a `<button tabindex="-1">`) is examined and reported twice.

use crate::document::Document;
use crate::error::Result;
use crate::rules::keyboard::parse_tabindex;
use crate::rules::{Rule, RuleOutcome};
use crate::violation::{Severity, Violation};

pub const RULE_ID: &str = "focus-indicator";

const INTERACTIVE_SELECTORS: &[&str] = &[
    "a",
    "button",
    "input",
    "select",
    "textarea",
    "summary",
    "details",
    "[tabindex]",
    "[contenteditable]",
];

/// Focus indicator rule
pub struct FocusIndicatorRule;

impl Rule for FocusIndicatorRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Interactive elements must have visible focus indicators"
    }

    fn check(&self, document: &Document) -> Result<RuleOutcome> {
        let mut outcome = RuleOutcome::default();

        for selector in INTERACTIVE_SELECTORS {
            let elements = document.select(selector)?;
            outcome.elements_checked += elements.len();

            for element in elements {
                let style: String = element
                    .get_attr("style", "")
                    .to_lowercase()
                    .chars()
                    .filter(|c| *c != ' ')
                    .collect();

                if style.contains("outline:none") || style.contains("outline:0") {
                    outcome.push(
                        Violation::new(
                            RULE_ID,
                            Severity::Error,
                            element.serialize(),
                            "Element removes focus indicator",
                        )
                        .with_wcag("2.4.7")
                        .with_fix("Remove outline:none/0 and ensure focus indicator is visible"),
                    );
                }

                if parse_tabindex(&element).is_some_and(|t| t < 0) {
                    outcome.push(
                        Violation::new(
                            RULE_ID,
                            Severity::Error,
                            element.serialize(),
                            "Element is programmatically removed from focus order",
                        )
                        .with_wcag("2.4.7")
                        .with_fix("Remove negative tabindex unless deliberately managing focus"),
                    );
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> RuleOutcome {
        FocusIndicatorRule.check(&Document::parse(html)).expect("check succeeds")
    }

    #[test]
    fn test_outline_none() {
        let outcome = check(r#"<a href="/" style="outline: none">Home</a>"#);
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.contains("removes focus indicator"));
    }

    #[test]
    fn test_outline_zero_case_insensitive() {
        let outcome = check(r#"<input aria-label="q" style="OUTLINE : 0">"#);
        assert_eq!(outcome.violations.len(), 1);
    }

    #[test]
    fn test_visible_outline_passes() {
        let outcome = check(r#"<button style="outline: 2px solid blue">Go</button>"#);
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.elements_checked, 1);
    }

    #[test]
    fn test_negative_tabindex_on_div() {
        let outcome = check(r#"<div tabindex="-1">panel</div>"#);
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.contains("removed from focus order"));
    }

    #[test]
    fn test_overlapping_selectors_count_twice() {
        let outcome = check(r#"<button tabindex="-1">x</button>"#);
        assert_eq!(outcome.elements_checked, 2);
        assert_eq!(outcome.violations.len(), 2);
    }

    #[test]
    fn test_non_numeric_tabindex_skipped() {
        let outcome = check(r#"<span tabindex="abc">x</span>"#);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn test_contenteditable_examined() {
        let outcome = check(r#"<div contenteditable="true" style="outline:none">edit</div>"#);
        assert_eq!(outcome.violations.len(), 1);
    }
}
