// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility rules implementing a fixed subset of WCAG 2.1 checks.
//!
//! Each rule module focuses on one concern and reports [`Violation`]s
//! against a read-only [`Document`]. Rules keep no state between runs:
//! the number of elements a rule examined is returned alongside its
//! violations, so one instance can be reused freely.

pub mod alt_text;
pub mod aria;
pub mod contrast;
pub mod focus;
pub mod forms;
pub mod headings;
pub mod keyboard;
pub mod language;
pub mod semantic;
pub mod tables;

use crate::document::Document;
use crate::error::Result;
use crate::violation::Violation;
use tracing::warn;

/// Trait implemented by all rules
pub trait Rule: Send + Sync {
    /// Stable identifier reported on every violation (e.g. "img-alt-text")
    fn rule_id(&self) -> &str;

    /// Short description of what this rule checks
    fn description(&self) -> &str;

    /// Evaluate the rule against a document
    fn check(&self, document: &Document) -> Result<RuleOutcome>;
}

/// Result of one rule evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutcome {
    /// Violations in the order the rule found them
    pub violations: Vec<Violation>,
    /// Elements examined, whether or not they violated anything
    pub elements_checked: usize,
}

impl RuleOutcome {
    pub fn new(elements_checked: usize) -> Self {
        Self {
            violations: Vec::new(),
            elements_checked,
        }
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

/// A selectable rule in the registry
pub struct RuleEntry {
    /// Short name accepted on the command line
    pub name: &'static str,
    /// The rule's `rule_id`, also accepted for selection
    pub rule_id: &'static str,
    pub description: &'static str,
    pub constructor: fn() -> Box<dyn Rule>,
}

/// Every built-in rule, in evaluation order
pub fn registry() -> &'static [RuleEntry] {
    const REGISTRY: &[RuleEntry] = &[
        RuleEntry {
            name: "img-alt",
            rule_id: alt_text::RULE_ID,
            description: "Check for proper image alt text",
            constructor: || Box::new(alt_text::ImgAltTextRule),
        },
        RuleEntry {
            name: "headings",
            rule_id: headings::RULE_ID,
            description: "Check heading hierarchy",
            constructor: || Box::new(headings::HeadingHierarchyRule),
        },
        RuleEntry {
            name: "contrast",
            rule_id: contrast::RULE_ID,
            description: "Check inline text/background color contrast",
            constructor: || Box::new(contrast::ColorContrastRule),
        },
        RuleEntry {
            name: "form-label",
            rule_id: forms::RULE_ID,
            description: "Check form controls for labels",
            constructor: || Box::new(forms::FormLabelRule),
        },
        RuleEntry {
            name: "aria",
            rule_id: aria::RULE_ID,
            description: "Validate ARIA roles",
            constructor: || Box::new(aria::AriaRolesRule),
        },
        RuleEntry {
            name: "keyboard",
            rule_id: keyboard::RULE_ID,
            description: "Check keyboard operability of interactive elements",
            constructor: || Box::new(keyboard::KeyboardNavigationRule),
        },
        RuleEntry {
            name: "semantic",
            rule_id: semantic::RULE_ID,
            description: "Check landmarks and list structure",
            constructor: || Box::new(semantic::SemanticStructureRule),
        },
        RuleEntry {
            name: "focus",
            rule_id: focus::RULE_ID,
            description: "Check for visible focus indicators",
            constructor: || Box::new(focus::FocusIndicatorRule),
        },
        RuleEntry {
            name: "language",
            rule_id: language::RULE_ID,
            description: "Validate language declarations",
            constructor: || Box::new(language::LanguageRule),
        },
        RuleEntry {
            name: "table",
            rule_id: tables::RULE_ID,
            description: "Check table structure and headers",
            constructor: || Box::new(tables::TableAccessibilityRule),
        },
    ];
    REGISTRY
}

/// Look up a registry entry by short name or rule id
pub fn lookup(name: &str) -> Option<&'static RuleEntry> {
    registry()
        .iter()
        .find(|entry| entry.name == name || entry.rule_id == name)
}

/// Instantiate every built-in rule
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    registry().iter().map(|entry| (entry.constructor)()).collect()
}

/// Instantiate the named rules, in registry order.
///
/// Unknown names are logged and ignored. When nothing valid remains,
/// every rule is returned.
pub fn select_rules<S: AsRef<str>>(names: &[S]) -> Vec<Box<dyn Rule>> {
    if names.is_empty() {
        return all_rules();
    }

    for name in names {
        if lookup(name.as_ref()).is_none() {
            warn!("Unknown rule '{}' will be ignored", name.as_ref());
        }
    }

    let selected: Vec<Box<dyn Rule>> = registry()
        .iter()
        .filter(|entry| {
            names
                .iter()
                .any(|n| n.as_ref() == entry.name || n.as_ref() == entry.rule_id)
        })
        .map(|entry| (entry.constructor)())
        .collect();

    if selected.is_empty() {
        warn!("No valid rules selected; using all available rules");
        return all_rules();
    }

    selected
}
