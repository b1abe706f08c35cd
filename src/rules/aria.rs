// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA role rule - WCAG 4.1.2 Name, Role, Value (Level A)
//!
//! Validates `role` attributes against the widget and composite roles we
//! recognise, and flags `role="button"` without an `aria-pressed` state.

use crate::document::{AttrPredicate, Document};
use crate::error::Result;
use crate::rules::{Rule, RuleOutcome};
use crate::violation::{Severity, Violation};

pub const RULE_ID: &str = "aria-roles";

/// Recognised role tokens, sorted
pub const VALID_ROLES: &[&str] = &[
    "alert",
    "alertdialog",
    "button",
    "checkbox",
    "combobox",
    "dialog",
    "grid",
    "gridcell",
    "link",
    "listbox",
    "log",
    "marquee",
    "menu",
    "menubar",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "option",
    "progressbar",
    "radio",
    "radiogroup",
    "scrollbar",
    "slider",
    "spinbutton",
    "status",
    "tab",
    "tablist",
    "tabpanel",
    "textbox",
    "timer",
    "tooltip",
    "tree",
    "treegrid",
    "treeitem",
];

/// ARIA role validator
pub struct AriaRolesRule;

impl Rule for AriaRolesRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "ARIA roles and attributes must be used correctly"
    }

    fn check(&self, document: &Document) -> Result<RuleOutcome> {
        let elements = document.find_all_by_attr("role", AttrPredicate::Present);
        let mut outcome = RuleOutcome::new(elements.len());

        for element in elements {
            let role = element.get_attr("role", "").to_lowercase();

            if !VALID_ROLES.contains(&role.as_str()) {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Error,
                        element.serialize(),
                        format!("Invalid ARIA role: '{}'", role),
                    )
                    .with_wcag("4.1.2")
                    .with_fix(format!("Use a valid ARIA role from: {}", VALID_ROLES.join(", "))),
                );
            }

            if role == "button" && !element.has_value("aria-pressed") {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Warning,
                        element.serialize(),
                        "Button role should have aria-pressed state",
                    )
                    .with_wcag("4.1.2")
                    .with_fix("Add aria-pressed attribute to button role"),
                );
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> RuleOutcome {
        AriaRolesRule.check(&Document::parse(html)).expect("check succeeds")
    }

    #[test]
    fn test_valid_roles_sorted() {
        let mut sorted = VALID_ROLES.to_vec();
        sorted.sort();
        assert_eq!(sorted, VALID_ROLES);
    }

    #[test]
    fn test_button_role_without_pressed() {
        let outcome = check(r#"<div role="button">Click me</div>"#);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].severity, Severity::Warning);
    }

    #[test]
    fn test_invalid_role() {
        let outcome = check(r#"<div role="invalid-role">Invalid</div>"#);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].severity, Severity::Error);
        assert!(outcome.violations[0]
            .suggested_fix
            .as_deref()
            .unwrap()
            .starts_with("Use a valid ARIA role from: alert, alertdialog"));
    }

    #[test]
    fn test_role_is_case_insensitive() {
        let outcome = check(r#"<div role="CHECKBOX" aria-checked="false">x</div>"#);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn test_multiple() {
        let outcome = check(
            r#"
            <div role="invalid-role">Invalid</div>
            <button role="button">Valid but missing aria-pressed</button>
        "#,
        );
        assert_eq!(outcome.violations.len(), 2);
        assert_eq!(outcome.elements_checked, 2);
    }

    #[test]
    fn test_pressed_button_passes() {
        let outcome = check(r#"<span role="button" aria-pressed="false">Toggle</span>"#);
        assert!(outcome.violations.is_empty());
    }
}
