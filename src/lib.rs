// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11yscan - HTML accessibility rule engine
//!
//! Evaluates a parsed HTML document against a set of independent WCAG 2.1
//! rules and reports violations with severity and remediation guidance.
//!
//! ## Rules
//!
//! - **Image alt text** (1.1.1): missing, uninformative, filename or overlong alt
//! - **Heading hierarchy** (2.4.6): single h1, no skipped levels
//! - **Color contrast** (1.4.3): inline foreground/background ratio of 4.5:1
//! - **Form labels** (1.3.1): every control has a label or ARIA name
//! - **ARIA roles** (4.1.2): role tokens from the allow-list
//! - **Keyboard** (2.1.1): no negative tabindex, click handlers paired with key handlers
//! - **Semantic structure** (1.3.1): main landmark, well-formed lists
//! - **Focus indicator** (2.4.7): outline not removed
//! - **Language** (3.1.1/3.1.2): page and part language codes
//! - **Tables** (1.3.1): captions, scoped headers, associated cells
//!
//! ## Example
//!
//! ```
//! use a11yscan::Scanner;
//!
//! let result = Scanner::with_all_rules()
//!     .scan_html(r#"<img src="logo.png">"#)
//!     .unwrap();
//! assert!(result.violations.iter().any(|v| v.rule_id == "img-alt-text"));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod score;
pub mod violation;

pub use document::Document;
pub use error::{Result, ScanError};
pub use rules::{Rule, RuleOutcome};
pub use scanner::{ScanResult, Scanner};
pub use violation::{Severity, Violation};
