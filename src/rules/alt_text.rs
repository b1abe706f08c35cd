// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text rule - WCAG 1.1.1 Non-text Content (Level A)
//!
//! Checks every `<img>`:
//! - the `alt` attribute must exist
//! - alt text must not be an uninformative placeholder ("image", "photo", ...)
//! - alt text must not be a filename
//! - alt text should stay under 125 characters
//! - `role="presentation"` images should carry `alt=""`
//!
//! The three quality checks are exclusive and tried in that order. The
//! decorative-image check is independent and can fire on top of them.

use crate::document::Document;
use crate::error::Result;
use crate::rules::{Rule, RuleOutcome};
use crate::violation::{Severity, Violation};

pub const RULE_ID: &str = "img-alt-text";

/// Alt values that say nothing about the image
const UNINFORMATIVE_ALT_VALUES: &[&str] = &[
    "",
    "image",
    "img",
    "picture",
    "photo",
    "photograph",
    "*",
    "graphic",
    "icon",
    "picture of",
    "image of",
    "photo of",
];

const FILENAME_EXTENSIONS: &[&str] = &[".jpg", ".png", ".gif", ".webp"];

const MAX_ALT_LENGTH: usize = 125;

/// Rule for image alt text
pub struct ImgAltTextRule;

impl Rule for ImgAltTextRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Images must have meaningful alt text"
    }

    fn check(&self, document: &Document) -> Result<RuleOutcome> {
        let images = document.find_all(&["img"]);
        let mut outcome = RuleOutcome::new(images.len());

        for img in images {
            let Some(raw_alt) = img.attr("alt") else {
                outcome.push(
                    Violation::new(RULE_ID, Severity::Error, img.serialize(), "Image missing alt text")
                        .with_wcag("1.1.1")
                        .with_fix("Add alt=\"[descriptive text]\" to the img element"),
                );
                continue;
            };

            let alt = raw_alt.trim().to_lowercase();

            if UNINFORMATIVE_ALT_VALUES.contains(&alt.as_str()) {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Error,
                        img.serialize(),
                        format!("Image has uninformative alt text: '{}'", raw_alt),
                    )
                    .with_wcag("1.1.1")
                    .with_fix("Replace with meaningful description of the image content"),
                );
            } else if FILENAME_EXTENSIONS.iter().any(|ext| alt.contains(ext)) {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Error,
                        img.serialize(),
                        "Image alt text appears to be a filename",
                    )
                    .with_wcag("1.1.1")
                    .with_fix("Replace with meaningful description of the image content"),
                );
            } else if alt.chars().count() > MAX_ALT_LENGTH {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Warning,
                        img.serialize(),
                        format!("Alt text is too long (> {} characters)", MAX_ALT_LENGTH),
                    )
                    .with_wcag("1.1.1")
                    .with_fix("Consider using aria-describedby for longer descriptions"),
                );
            }

            if img.attr("role") == Some("presentation") && !alt.is_empty() {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Warning,
                        img.serialize(),
                        "Decorative image (role='presentation') should have empty alt text",
                    )
                    .with_wcag("1.1.1")
                    .with_fix("Set alt=\"\" for decorative images"),
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
        ImgAltTextRule.check(&Document::parse(html)).expect("check succeeds")
    }

    #[test]
    fn test_missing_alt() {
        let outcome = check(r#"<img src="test.jpg">"#);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].severity, Severity::Error);
        assert_eq!(outcome.violations[0].rule_id, "img-alt-text");
        assert!(outcome.violations[0].description.to_lowercase().contains("missing alt text"));
        assert_eq!(outcome.elements_checked, 1);
    }

    #[test]
    fn test_empty_alt_is_uninformative() {
        let outcome = check(r#"<img src="test.jpg" alt="">"#);
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.contains("uninformative alt text"));
    }

    #[test]
    fn test_uninformative_values() {
        for bad in ["image", "photo", "picture", "img", "*", "  Photo Of  "] {
            let outcome = check(&format!(r#"<img src="test.jpg" alt="{}">"#, bad));
            assert_eq!(outcome.violations.len(), 1, "alt={:?}", bad);
            assert!(outcome.violations[0].description.contains("uninformative alt text"));
        }
    }

    #[test]
    fn test_filename_alt() {
        let outcome = check(r#"<img src="test.jpg" alt="Test.JPG">"#);
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.contains("filename"));
    }

    #[test]
    fn test_long_alt() {
        let outcome = check(&format!(r#"<img src="test.jpg" alt="{}">"#, "a".repeat(126)));
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].severity, Severity::Warning);
        assert!(outcome.violations[0].description.contains("too long"));
    }

    #[test]
    fn test_decorative_with_text() {
        let outcome = check(r#"<img src="test.jpg" role="presentation" alt="decorative">"#);
        assert_eq!(outcome.violations.len(), 1);
        assert!(outcome.violations[0].description.contains("Decorative image"));
    }

    #[test]
    fn test_decorative_check_stacks_on_quality_check() {
        let outcome = check(r#"<img src="a.png" role="presentation" alt="photo">"#);
        assert_eq!(outcome.violations.len(), 2);
        assert_eq!(outcome.violations[0].severity, Severity::Error);
        assert_eq!(outcome.violations[1].severity, Severity::Warning);
    }

    #[test]
    fn test_valid_alt() {
        let outcome = check(r#"<img src="test.jpg" alt="A red car parked in front of a building">"#);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn test_elements_checked_counts_all_images() {
        let outcome = check(r#"<img alt="Chart of sales"><img><img alt="Team at the office">"#);
        assert_eq!(outcome.elements_checked, 3);
        assert_eq!(outcome.violations.len(), 1);
    }
}
