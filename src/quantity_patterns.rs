//! # Quantity Patterns Module
//!
//! This module contains the regex patterns and phrase tables used for quantity parsing
//! and for reading bullet lines back from the shopping-list categorizer.

use lazy_static::lazy_static;
use regex::Regex;

// Leading fraction, decimal or integer followed by the unit text. The fraction
// alternative comes first so "1/2個" is not read as 1 with unit "/2個".
pub const NUMBER_THEN_UNIT_PATTERN: &str = r"^([0-9]+/[0-9]+|[0-9]+(?:\.[0-9]+)?)\s*(.*)$";

// Leading unit text (e.g. "大さじ") followed by a trailing integer or decimal
pub const TEXT_THEN_NUMBER_PATTERN: &str = r"^(.*?)\s*([0-9]+(?:\.[0-9]+)?)$";

// Leading integer followed by a counter word ("1 stalk")
pub const BARE_INTEGER_PATTERN: &str = r"^([0-9]+)\s*(.*)$";

// "- name quantity" where the quantity is the text after the last whitespace
pub const BULLET_LINE_PATTERN: &str = r"^[-*]\s+(.+?)\s+(\S+)$";

/// Phrases marking an ingredient amount that cannot be shopped for
pub const UNQUANTIFIABLE_PHRASES: &[&str] = &[
    "少々",
    "適量",
    "お好みで",
    "ひとつまみ",
    "to taste",
    "a pinch",
    "as desired",
    "as needed",
];

lazy_static! {
    pub static ref NUMBER_THEN_UNIT_REGEX: Regex =
        Regex::new(NUMBER_THEN_UNIT_PATTERN).expect("Number-then-unit pattern should be valid");
    pub static ref TEXT_THEN_NUMBER_REGEX: Regex =
        Regex::new(TEXT_THEN_NUMBER_PATTERN).expect("Text-then-number pattern should be valid");
    pub static ref BARE_INTEGER_REGEX: Regex =
        Regex::new(BARE_INTEGER_PATTERN).expect("Bare integer pattern should be valid");
    pub static ref BULLET_LINE_REGEX: Regex =
        Regex::new(BULLET_LINE_PATTERN).expect("Bullet line pattern should be valid");
}
