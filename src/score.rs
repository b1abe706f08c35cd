// SPDX-License-Identifier: PMPL-1.0-or-later
//! Compliance scoring.
//!
//! The score is violation density weighted by severity, not a raw count:
//! a page with many examined elements absorbs more violations before the
//! score drops.

use crate::violation::Violation;

/// Severity-weighted compliance score in `[0, 100]`, rounded to 2 decimals.
///
/// Nothing examined counts as a full pass.
pub fn compliance_score(violations: &[Violation], elements_checked: usize) -> f64 {
    if elements_checked == 0 {
        return 100.0;
    }

    let weighted: f64 = violations.iter().map(|v| v.severity.weight()).sum();
    let score = (100.0 - weighted / elements_checked as f64 * 100.0).max(0.0);
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::Severity;

    fn violation(severity: Severity) -> Violation {
        Violation::new("test-rule", severity, "<p></p>", "test")
    }

    #[test]
    fn test_no_violations_is_perfect() {
        assert_eq!(compliance_score(&[], 100), 100.0);
        assert_eq!(compliance_score(&[], 1), 100.0);
    }

    #[test]
    fn test_nothing_checked_is_perfect() {
        let violations = vec![violation(Severity::Critical); 5];
        assert_eq!(compliance_score(&violations, 0), 100.0);
    }

    #[test]
    fn test_weights() {
        let violations = vec![violation(Severity::Error), violation(Severity::Warning)];
        // (0.7 + 0.3) / 10 * 100 = 10
        assert_eq!(compliance_score(&violations, 10), 90.0);
        assert_eq!(compliance_score(&[violation(Severity::Critical)], 10), 90.0);
        assert_eq!(compliance_score(&[violation(Severity::Info)], 10), 99.0);
        assert_eq!(compliance_score(&[violation(Severity::Unknown)], 10), 95.0);
    }

    #[test]
    fn test_rounding() {
        // 0.7 / 3 * 100 = 23.333...
        assert_eq!(compliance_score(&[violation(Severity::Error)], 3), 76.67);
    }

    #[test]
    fn test_floor_at_zero() {
        let violations = vec![violation(Severity::Critical); 20];
        assert_eq!(compliance_score(&violations, 5), 0.0);
    }

    #[test]
    fn test_monotonic_in_severity_and_count() {
        let mut previous = 100.0;
        let mut violations = Vec::new();
        for severity in [Severity::Info, Severity::Warning, Severity::Error, Severity::Critical] {
            violations.push(violation(severity));
            let score = compliance_score(&violations, 50);
            assert!(score <= previous);
            previous = score;
        }
    }
}
