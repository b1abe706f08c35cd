// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard navigation rule - WCAG 2.1.1 Keyboard (Level A)
//!
//! Looks at every element a user could interact with: native controls,
//! anything with an `onclick` handler, `role="button"`/`role="link"`, and
//! anything carrying `tabindex`. Each element is examined once.
//! - negative tabindex removes the element from keyboard reach
//! - a click handler needs a matching keyboard handler

use crate::document::{Document, Element};
use crate::error::Result;
use crate::rules::{Rule, RuleOutcome};
use crate::violation::{Severity, Violation};

pub const RULE_ID: &str = "keyboard-nav";

const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

const INTERACTIVE_ROLES: &[&str] = &["button", "link"];

/// Keyboard navigation rule
pub struct KeyboardNavigationRule;

impl Rule for KeyboardNavigationRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Elements must be keyboard accessible"
    }

    fn check(&self, document: &Document) -> Result<RuleOutcome> {
        let elements: Vec<Element<'_>> = document.elements().filter(is_interactive).collect();
        let mut outcome = RuleOutcome::new(elements.len());

        for element in elements {
            if parse_tabindex(&element).is_some_and(|t| t < 0) {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Error,
                        element.serialize(),
                        "Negative tabindex prevents keyboard focus",
                    )
                    .with_wcag("2.1.1")
                    .with_fix("Remove negative tabindex or set to 0"),
                );
            }

            if element.has_value("onclick")
                && !(element.has_value("onkeypress") || element.has_value("onkeydown"))
            {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Error,
                        element.serialize(),
                        "Click handler without keyboard handler",
                    )
                    .with_wcag("2.1.1")
                    .with_fix("Add onkeypress or onkeydown handler for keyboard users"),
                );
            }
        }

        Ok(outcome)
    }
}

fn is_interactive(element: &Element<'_>) -> bool {
    INTERACTIVE_TAGS.contains(&element.name())
        || element.has_attr("onclick")
        || element.attr("role").is_some_and(|r| INTERACTIVE_ROLES.contains(&r))
        || element.has_attr("tabindex")
}

/// Integer value of `tabindex`, if it has one
pub(crate) fn parse_tabindex(element: &Element<'_>) -> Option<i64> {
    element.attr("tabindex").and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> RuleOutcome {
        KeyboardNavigationRule.check(&Document::parse(html)).expect("check succeeds")
    }

    #[test]
    fn test_negative_tabindex() {
        let outcome = check(r#"<button tabindex="-1">Cannot focus</button>"#);
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.to_lowercase().contains("tabindex"));
    }

    #[test]
    fn test_click_handler_without_keyboard() {
        let outcome = check(r#"<div onclick="handleClick()">Click me</div>"#);
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.to_lowercase().contains("keyboard handler"));
    }

    #[test]
    fn test_complete() {
        let outcome = check(
            r#"
            <button onclick="handleClick()" onkeypress="handleKey()">Good</button>
            <div tabindex="-1">Bad</div>
        "#,
        );
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.to_lowercase().contains("tabindex"));
    }

    #[test]
    fn test_union_is_deduplicated() {
        // matches tag, onclick, role and tabindex at once
        let outcome = check(
            r#"<a href="/" onclick="go()" onkeydown="go()" role="link" tabindex="0">Home</a>"#,
        );
        assert_eq!(outcome.elements_checked, 1);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn test_interactive_by_role_only() {
        let outcome = check(r#"<span role="button">Save</span><div role="link">Next</div><div role="note">x</div>"#);
        assert_eq!(outcome.elements_checked, 2);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn test_non_numeric_tabindex_ignored() {
        let outcome = check(r#"<div tabindex="first">x</div>"#);
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.elements_checked, 1);
    }

    #[test]
    fn test_plain_content_not_examined() {
        let outcome = check("<p>text</p><div>more</div>");
        assert_eq!(outcome.elements_checked, 0);
    }
}
