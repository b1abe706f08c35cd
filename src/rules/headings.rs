// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading hierarchy rule - WCAG 2.4.6 Headings and Labels (Level AA)
//!
//! Walks `h1`..`h6` in document order. The first heading must be an `h1`,
//! no level may be skipped going down, and only one `h1` is allowed.
//!
//! Each heading is compared to the heading just before it, not to the last
//! heading that passed: `h1, h3, h5` reports two skips.

use crate::document::Document;
use crate::error::Result;
use crate::rules::{Rule, RuleOutcome};
use crate::violation::{Severity, Violation};

pub const RULE_ID: &str = "heading-hierarchy";

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Rule for heading structure
pub struct HeadingHierarchyRule;

impl Rule for HeadingHierarchyRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Headings must follow proper hierarchy"
    }

    fn check(&self, document: &Document) -> Result<RuleOutcome> {
        let headings = document.find_all(HEADING_TAGS);
        let mut outcome = RuleOutcome::new(headings.len());

        if let Some(second_h1) = headings.iter().filter(|h| h.name() == "h1").nth(1) {
            outcome.push(
                Violation::new(
                    RULE_ID,
                    Severity::Error,
                    second_h1.serialize(),
                    "Multiple h1 headings found. Page should have only one main heading.",
                )
                .with_wcag("2.4.6")
                .with_fix("Use h2-h6 for subheadings instead of multiple h1s"),
            );
        }

        let mut current_level = 0u8;
        for heading in &headings {
            let Some(level) = heading_level(heading.name()) else {
                continue;
            };

            if current_level == 0 && level != 1 {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Error,
                        heading.serialize(),
                        format!("First heading must be h1, found {}", heading.name()),
                    )
                    .with_wcag("2.4.6")
                    .with_fix("Change to h1 or add h1 before this heading"),
                );
            } else if level > current_level + 1 {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Error,
                        heading.serialize(),
                        format!(
                            "Skipped heading level - found {} after h{}",
                            heading.name(),
                            current_level
                        ),
                    )
                    .with_wcag("2.4.6")
                    .with_fix(format!("Change to h{}", current_level + 1)),
                );
            }

            current_level = level;
        }

        Ok(outcome)
    }
}

/// Numeric level of a heading tag ("h3" -> 3)
fn heading_level(tag: &str) -> Option<u8> {
    tag.strip_prefix('h')
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| (1..=6).contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> RuleOutcome {
        HeadingHierarchyRule.check(&Document::parse(html)).expect("check succeeds")
    }

    #[test]
    fn test_skipped_level() {
        let outcome = check("<h1>Title</h1><h3>Subtitle</h3>");
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.to_lowercase().contains("skipped heading level"));
        assert_eq!(outcome.violations[0].suggested_fix.as_deref(), Some("Change to h2"));
    }

    #[test]
    fn test_valid_hierarchy() {
        let outcome = check("<h1>Title</h1><h2>Subtitle</h2><h2>Another</h2><h3>Deep</h3><h2>Back</h2>");
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.elements_checked, 5);
    }

    #[test]
    fn test_multiple_h1_points_at_second() {
        let outcome = check("<h1>First</h1><h1>Second</h1>");
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.to_lowercase().contains("multiple h1"));
        assert!(outcome.violations[0].element.contains("Second"));
    }

    #[test]
    fn test_first_heading_not_h1() {
        let outcome = check("<h2>Start</h2><h3>Next</h3>");
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.contains("First heading must be h1, found h2"));
    }

    #[test]
    fn test_consecutive_skips_compare_to_previous_heading() {
        let outcome = check("<h1>a</h1><h3>b</h3><h5>c</h5>");
        assert_eq!(outcome.violations.len(), 2);
        assert!(outcome.violations[1].description.contains("found h5 after h3"));
    }

    #[test]
    fn test_no_headings() {
        let outcome = check("<p>No headings here</p>");
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.elements_checked, 0);
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("header"), None);
    }
}
