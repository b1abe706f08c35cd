// SPDX-License-Identifier: PMPL-1.0-or-later
//! Language rule - WCAG 3.1.1 Language of Page (Level A), 3.1.2 Language of Parts (Level AA)
//!
//! The `<html>` root must declare a `lang` whose primary subtag we
//! recognise. Elements inside the page that switch language are checked
//! the same way.

use crate::document::{AttrPredicate, Document, Element};
use crate::error::Result;
use crate::rules::{Rule, RuleOutcome};
use crate::violation::{Severity, Violation, DOCUMENT_ELEMENT};

pub const RULE_ID: &str = "language";

/// ISO 639-1 primary subtags we accept without a warning
const KNOWN_LANGUAGE_CODES: &[&str] = &["en", "es", "fr", "de", "it", "pt", "ru", "zh", "ja", "ko"];

/// Language declaration rule
pub struct LanguageRule;

impl Rule for LanguageRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Page and content must have proper language declarations"
    }

    fn check(&self, document: &Document) -> Result<RuleOutcome> {
        let mut outcome = RuleOutcome::new(1);

        let Some(root) = document.root() else {
            outcome.push(
                Violation::new(
                    RULE_ID,
                    Severity::Error,
                    DOCUMENT_ELEMENT,
                    "No HTML root element found",
                )
                .with_wcag("3.1.1")
                .with_fix("Add proper HTML root element with lang attribute"),
            );
            return Ok(outcome);
        };

        match primary_subtag(&root) {
            None => outcome.push(
                Violation::new(
                    RULE_ID,
                    Severity::Error,
                    root.serialize(),
                    "Missing language declaration",
                )
                .with_wcag("3.1.1")
                .with_fix("Add lang attribute to HTML element (e.g., lang=\"en\")"),
            ),
            Some(lang) if !is_known_language(&lang) => outcome.push(
                Violation::new(
                    RULE_ID,
                    Severity::Warning,
                    root.serialize(),
                    format!("Potentially invalid language code: {}", lang),
                )
                .with_wcag("3.1.1")
                .with_fix("Use valid ISO 639-1 language code"),
            ),
            Some(_) => {}
        }

        let parts: Vec<Element<'_>> = document
            .find_all_by_attr("lang", AttrPredicate::Present)
            .into_iter()
            .filter(|el| *el != root)
            .collect();
        outcome.elements_checked += parts.len();

        for part in parts {
            // lang="" on a part means "unknown language", which is allowed
            let Some(lang) = primary_subtag(&part) else {
                continue;
            };
            if !is_known_language(&lang) {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Warning,
                        part.serialize(),
                        format!("Invalid language code in content: {}", lang),
                    )
                    .with_wcag("3.1.2")
                    .with_fix("Use valid ISO 639-1 language code"),
                );
            }
        }

        Ok(outcome)
    }
}

/// Lowercased primary subtag of an element's `lang` ("en-GB" -> "en")
fn primary_subtag(element: &Element<'_>) -> Option<String> {
    element
        .attr("lang")
        .map(str::to_lowercase)
        .and_then(|lang| lang.split('-').next().map(str::to_string))
        .filter(|lang| !lang.is_empty())
}

fn is_known_language(code: &str) -> bool {
    KNOWN_LANGUAGE_CODES.contains(&code)
}
