// SPDX-License-Identifier: PMPL-1.0-or-later
//! Semantic structure rule - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! - full documents need a `<main>` landmark (or `role="main"`)
//! - `<ul>`/`<ol>` may only contain `<li>` children
//!
//! Fragments are never required to carry a landmark.

use crate::document::{AttrPredicate, Document};
use crate::error::Result;
use crate::rules::{Rule, RuleOutcome};
use crate::violation::{Severity, Violation, DOCUMENT_ELEMENT};

pub const RULE_ID: &str = "semantic-structure";

/// Semantic HTML rule
pub struct SemanticStructureRule;

impl Rule for SemanticStructureRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "HTML must use proper semantic structure"
    }

    fn check(&self, document: &Document) -> Result<RuleOutcome> {
        let lists = document.find_all(&["ul", "ol"]);
        let mut outcome = RuleOutcome::new(lists.len());

        if document.root().is_some() {
            outcome.elements_checked += 1;
            if !has_main_landmark(document) {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Error,
                        DOCUMENT_ELEMENT,
                        "No main landmark found",
                    )
                    .with_wcag("1.3.1")
                    .with_fix("Add <main> element or role='main' to primary content"),
                );
            }
        }

        for list in lists {
            if list.children().any(|child| child.name() != "li") {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Error,
                        list.serialize(),
                        "List contains non-li elements",
                    )
                    .with_wcag("1.3.1")
                    .with_fix("Ensure lists only contain <li> elements"),
                );
            }
        }

        Ok(outcome)
    }
}

fn has_main_landmark(document: &Document) -> bool {
    document.find_first("main").is_some()
        || !document
            .find_all_by_attr("role", AttrPredicate::Equals("main"))
            .is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> RuleOutcome {
        SemanticStructureRule.check(&Document::parse(html)).expect("check succeeds")
    }

    #[test]
    fn test_list_with_non_li_child() {
        let outcome = check(
            r#"
            <ul>
                <div>Invalid child</div>
                <li>Valid item</li>
            </ul>
        "#,
        );
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.to_lowercase().contains("non-li elements"));
    }

    #[test]
    fn test_valid_fragment() {
        let outcome = check(
            r#"
            <main>
                <ul>
                    <li>Valid structure</li>
                </ul>
            </main>
        "#,
        );
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn test_fragment_needs_no_landmark() {
        let outcome = check("<ol><li>one</li></ol>");
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.elements_checked, 1);
    }

    #[test]
    fn test_document_without_main() {
        let outcome = check("<html><body><p>content</p></body></html>");
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].element, "document");
        assert_eq!(outcome.elements_checked, 1);
    }

    #[test]
    fn test_omitted_html_tag_still_needs_main() {
        let outcome = check("<head><title>Shop</title></head><body><p>hi</p></body>");
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].description, "No main landmark found");
    }

    #[test]
    fn test_markup_in_script_is_not_a_document() {
        let outcome = check("<div><script>var t = '<html>';</script><p>x</p></div>");
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.elements_checked, 0);
    }

    #[test]
    fn test_role_main_counts_as_landmark() {
        let outcome = check(r#"<html><body><div role="main">content</div></body></html>"#);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn test_text_children_not_flagged() {
        let outcome = check("<ul>loose text<li>item</li></ul>");
        assert!(outcome.violations.is_empty());
    }
}
