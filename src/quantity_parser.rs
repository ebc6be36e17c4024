//! # Quantity Parser
//!
//! This module turns the free-text quantity of a recipe ingredient (`"1/2個"`,
//! `"大さじ2"`, `"200g"`) into a structured amount and unit.
//!
//! ## Features
//!
//! - Full-width digits, decimal point and slash are folded to half-width
//! - Simple fractions (`a/b`) are evaluated by division
//! - Unit-first forms such as `"大さじ2"` are recognised
//! - Unquantifiable phrases (`"少々"`, `"to taste"`) yield `None`
//!
//! ## Usage
//!
//! ```rust
//! use kondate::quantity_parser::parse_quantity;
//!
//! let parsed = parse_quantity("1/2個").unwrap();
//! assert_eq!(parsed.amount, 0.5);
//! assert_eq!(parsed.unit, "個");
//!
//! assert!(parse_quantity("少々").is_none());
//! ```

use crate::quantity_patterns::{
    BARE_INTEGER_REGEX, NUMBER_THEN_UNIT_REGEX, TEXT_THEN_NUMBER_REGEX, UNQUANTIFIABLE_PHRASES,
};
use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric amount paired with the unit it was written in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuantity {
    pub amount: f64,
    pub unit: String,
}

impl ParsedQuantity {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }
}

impl fmt::Display for ParsedQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_amount(self.amount), self.unit)
    }
}

/// Which capture group of a pattern holds the number and which the unit
struct QuantityShape {
    regex: &'static Regex,
    amount_group: usize,
    unit_group: usize,
}

/// Parse a free-text quantity into an amount and unit
///
/// The shapes are tried in order and the first acceptable match wins:
///
/// 1. number then unit (`"200g"`, `"1/2個"`, `"1.5 kg"`)
/// 2. unit then number (`"大さじ2"`)
/// 3. integer then counter word (`"1 stalk"`)
///
/// A match is only accepted when the unit is non-empty and the amount is a
/// finite number. Anything else, including unquantifiable phrases, is `None`;
/// this is an expected input shape rather than an error.
///
/// # Examples
///
/// ```rust
/// use kondate::quantity_parser::parse_quantity;
///
/// let spoon = parse_quantity("大さじ2").unwrap();
/// assert_eq!((spoon.amount, spoon.unit.as_str()), (2.0, "大さじ"));
///
/// let wide = parse_quantity("１／２個").unwrap();
/// assert_eq!(wide.amount, 0.5);
/// ```
pub fn parse_quantity(text: &str) -> Option<ParsedQuantity> {
    let normalized = normalize_width(text);
    let trimmed = normalized.trim();

    if trimmed.is_empty() {
        return None;
    }

    if is_unquantifiable(trimmed) {
        trace!("Quantity '{}' is unquantifiable", trimmed);
        return None;
    }

    let shapes = [
        QuantityShape {
            regex: &NUMBER_THEN_UNIT_REGEX,
            amount_group: 1,
            unit_group: 2,
        },
        QuantityShape {
            regex: &TEXT_THEN_NUMBER_REGEX,
            amount_group: 2,
            unit_group: 1,
        },
        QuantityShape {
            regex: &BARE_INTEGER_REGEX,
            amount_group: 1,
            unit_group: 2,
        },
    ];

    for shape in &shapes {
        let Some(caps) = shape.regex.captures(trimmed) else {
            continue;
        };
        let amount_text = caps.get(shape.amount_group).map_or("", |m| m.as_str());
        let unit = caps.get(shape.unit_group).map_or("", |m| m.as_str()).trim();

        if unit.is_empty() {
            continue;
        }

        match parse_amount(amount_text) {
            Some(amount) => return Some(ParsedQuantity::new(amount, unit)),
            None => continue,
        }
    }

    trace!("No quantity shape matched '{}'", trimmed);
    None
}

/// Evaluate an integer, decimal or `a/b` fraction; non-finite results are rejected
fn parse_amount(text: &str) -> Option<f64> {
    let value = match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.trim().parse().ok()?;
            let denominator: f64 = denominator.trim().parse().ok()?;
            numerator / denominator
        }
        None => text.trim().parse().ok()?,
    };

    value.is_finite().then_some(value)
}

/// Fold full-width digits, decimal point and slash to their ASCII forms
///
/// ```rust
/// use kondate::quantity_parser::normalize_width;
///
/// assert_eq!(normalize_width("１／２個"), "1/2個");
/// ```
pub fn normalize_width(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' | '．' | '／' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Whether the text contains one of the unquantifiable phrases
pub fn is_unquantifiable(text: &str) -> bool {
    let lowered = text.to_lowercase();
    UNQUANTIFIABLE_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

/// Render an amount rounded to two decimals without trailing zeros
///
/// ```rust
/// use kondate::quantity_parser::format_amount;
///
/// assert_eq!(format_amount(2.0), "2");
/// assert_eq!(format_amount(0.5), "0.5");
/// assert_eq!(format_amount(1.0 / 3.0), "0.33");
/// ```
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    // avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// Round to three decimals, the precision stock levels are kept at
pub fn round_stock(amount: f64) -> f64 {
    (amount * 1000.0).round() / 1000.0
}
