//! # Unit Normalizer Module
//!
//! Reduces a measuring unit to its base unit (`ml` or `g`) through fixed
//! culinary constants. Units without a known constant are their own base.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Multiplicative rate from a unit to its base unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseRate {
    pub rate: f64,
    pub base_unit: &'static str,
}

const fn ml(rate: f64) -> BaseRate {
    BaseRate {
        rate,
        base_unit: "ml",
    }
}

const fn grams(rate: f64) -> BaseRate {
    BaseRate {
        rate,
        base_unit: "g",
    }
}

lazy_static! {
    /// Culinary constants keyed by lower-cased unit
    static ref BASE_RATES: HashMap<&'static str, BaseRate> = {
        let mut map = HashMap::new();

        // Volume
        map.insert("大さじ", ml(15.0));
        map.insert("小さじ", ml(5.0));
        map.insert("カップ", ml(200.0));
        map.insert("cc", ml(1.0));
        map.insert("l", ml(1000.0));
        map.insert("ℓ", ml(1000.0));
        map.insert("リットル", ml(1000.0));
        map.insert("ミリリットル", ml(1.0));
        map.insert("tbsp", ml(15.0));
        map.insert("tablespoon", ml(15.0));
        map.insert("tablespoons", ml(15.0));
        map.insert("tsp", ml(5.0));
        map.insert("teaspoon", ml(5.0));
        map.insert("teaspoons", ml(5.0));
        map.insert("cup", ml(200.0));
        map.insert("cups", ml(200.0));
        map.insert("liter", ml(1000.0));
        map.insert("liters", ml(1000.0));
        map.insert("litre", ml(1000.0));
        map.insert("litres", ml(1000.0));

        // Weight
        map.insert("kg", grams(1000.0));
        map.insert("キロ", grams(1000.0));
        map.insert("キログラム", grams(1000.0));
        map.insert("グラム", grams(1.0));
        map.insert("mg", grams(0.001));

        map
    };
}

/// An amount expressed in its base unit
#[derive(Debug, Clone, PartialEq)]
pub struct BaseAmount {
    pub base_amount: f64,
    pub base_unit: String,
}

/// Convert an amount to its base unit
///
/// This never fails: an unknown unit comes back unchanged (trimmed) as its
/// own base unit.
///
/// # Examples
///
/// ```rust
/// use kondate::unit_normalizer::to_base;
///
/// let spoon = to_base(2.0, "大さじ");
/// assert_eq!(spoon.base_amount, 30.0);
/// assert_eq!(spoon.base_unit, "ml");
///
/// let counter = to_base(3.0, " 個 ");
/// assert_eq!((counter.base_amount, counter.base_unit.as_str()), (3.0, "個"));
/// ```
pub fn to_base(amount: f64, unit: &str) -> BaseAmount {
    let trimmed = unit.trim();
    let key = trimmed.to_lowercase();

    match BASE_RATES.get(key.as_str()) {
        Some(rate) => BaseAmount {
            base_amount: amount * rate.rate,
            base_unit: rate.base_unit.to_string(),
        },
        None => BaseAmount {
            base_amount: amount,
            base_unit: key,
        },
    }
}

/// Rate between two units sharing a base unit, if they do
///
/// ```rust
/// use kondate::unit_normalizer::base_ratio;
///
/// assert_eq!(base_ratio("大さじ", "ml"), Some(15.0));
/// assert_eq!(base_ratio("本", "g"), None);
/// ```
pub fn base_ratio(from_unit: &str, to_unit: &str) -> Option<f64> {
    let from = to_base(1.0, from_unit);
    let to = to_base(1.0, to_unit);

    if from.base_unit != to.base_unit || to.base_amount == 0.0 {
        return None;
    }
    Some(from.base_amount / to.base_amount)
}
