// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast rule - WCAG 1.4.3 Contrast (Minimum) (Level AA)
//!
//! Reads `color` and `background-color` from inline `style` attributes on
//! text-bearing elements and computes the WCAG contrast ratio:
//! - AA: 4.5:1 for normal text
//!
//! Only inline declarations are considered; there is no cascade.
//! Elements whose colors cannot be evaluated are skipped.

use crate::document::Document;
use crate::error::Result;
use crate::rules::{Rule, RuleOutcome};
use crate::violation::{Severity, Violation};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

pub const RULE_ID: &str = "color-contrast";

/// Minimum ratio for normal text (WCAG AA)
pub const MIN_CONTRAST_RATIO: f64 = 4.5;

const TEXT_ELEMENTS: &[&str] = &["p", "span", "div", "a", "h1", "h2", "h3", "h4", "h5", "h6"];

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*color\s*:\s*([^;]+)").expect("valid regex")
});

static BACKGROUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*background-color\s*:\s*([^;]+)").expect("valid regex")
});

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)").expect("valid regex")
});

/// Rule for inline color contrast
pub struct ColorContrastRule;

impl Rule for ColorContrastRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Text must have sufficient contrast with its background"
    }

    fn check(&self, document: &Document) -> Result<RuleOutcome> {
        let elements = document.find_all(TEXT_ELEMENTS);
        let mut outcome = RuleOutcome::new(elements.len());

        for element in elements {
            let Some(style) = element.attr("style") else {
                continue;
            };
            let (Some(fg), Some(bg)) = (declaration(&COLOR_RE, style), declaration(&BACKGROUND_RE, style))
            else {
                continue;
            };

            let Some(result) = check_contrast(fg, bg) else {
                debug!("Skipping unparseable colors {:?} on {:?}", (fg, bg), element.serialize());
                continue;
            };

            if !result.passes {
                outcome.push(
                    Violation::new(
                        RULE_ID,
                        Severity::Error,
                        element.serialize(),
                        format!(
                            "Insufficient color contrast ratio: {:.2}:1 (minimum {}:1 required)",
                            result.ratio, MIN_CONTRAST_RATIO
                        ),
                    )
                    .with_wcag("1.4.3")
                    .with_fix("Adjust text or background color to improve contrast"),
                );
            }
        }

        Ok(outcome)
    }
}

/// Value of a declaration captured by `re` in an inline style
fn declaration<'s>(re: &Regex, style: &'s str) -> Option<&'s str> {
    re.captures(style)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty())
}

/// Outcome of comparing two colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastCheck {
    pub ratio: f64,
    pub passes: bool,
}

/// Compare two CSS color strings against [`MIN_CONTRAST_RATIO`].
///
/// Returns `None` when either color is malformed.
pub fn check_contrast(foreground: &str, background: &str) -> Option<ContrastCheck> {
    let fg = parse_color(foreground)?;
    let bg = parse_color(background)?;
    let ratio = contrast_ratio(fg, bg);
    Some(ContrastCheck {
        ratio,
        passes: ratio >= MIN_CONTRAST_RATIO,
    })
}

/// Parse a CSS hex color (#rgb, #rrggbb) into (r, g, b) components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse an rgb() or rgba() color into (r, g, b); alpha is ignored
pub fn parse_rgb_color(value: &str) -> Option<(u8, u8, u8)> {
    let caps = RGB_RE.captures(value)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    Some((r, g, b))
}

/// Parse a CSS color value into (r, g, b).
///
/// Hex and rgb()/rgba() forms plus the names `black` and `white` are
/// understood. Any other value is treated as black. `None` means the value
/// looked like a hex or rgb() color but could not be read.
pub fn parse_color(value: &str) -> Option<(u8, u8, u8)> {
    let value = value.trim().to_lowercase();

    if value.starts_with('#') {
        return parse_hex_color(&value);
    }

    if RGB_RE.is_match(&value) {
        return parse_rgb_color(&value);
    }

    match value.as_str() {
        "white" => Some((255, 255, 255)),
        _ => Some((0, 0, 0)),
    }
}

/// Calculate relative luminance per WCAG 2.x
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let srgb = [r, g, b].map(|c| {
        let v = c as f64 / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * srgb[0] + 0.7152 * srgb[1] + 0.0722 * srgb[2]
}

/// Calculate contrast ratio between two colors
/// Returns a ratio >= 1.0 (e.g., 4.5, 7.0, 21.0)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}
