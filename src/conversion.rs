//! # Conversion Rate Module
//!
//! Resolves the multiplicative rate that turns an amount in one unit into an
//! amount in another for a given ingredient. The lookups are tried in order:
//!
//! 1. identical units (rate 1)
//! 2. ingredient-specific overrides (`1かけ` of ginger is 15 g)
//! 3. units sharing a base unit (`大さじ` to `ml`)
//! 4. an external estimator, memoized per (from, to, ingredient)
//!
//! Resolution never fails: a missing rate is `None`, and estimator errors are
//! logged and cached as `None`.

use crate::errors::AiError;
use crate::synonyms::same_ingredient;
use crate::unit_normalizer::base_ratio;
use async_trait::async_trait;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// Explicit rate between two units for one ingredient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRule {
    pub from: &'static str,
    pub to: &'static str,
    pub rate: f64,
}

const fn rule(from: &'static str, to: &'static str, rate: f64) -> ConversionRule {
    ConversionRule { from, to, rate }
}

/// Overrides keyed by ingredient; a key applies to its whole synonym group
pub static INGREDIENT_CONVERSIONS: &[(&str, &[ConversionRule])] = &[
    (
        "生姜",
        &[rule("かけ", "g", 15.0), rule("g", "かけ", 1.0 / 15.0)],
    ),
    (
        "にんにく",
        &[rule("かけ", "g", 5.0), rule("g", "かけ", 1.0 / 5.0)],
    ),
];

/// Rate from the ingredient override table, if one applies
pub fn override_rate(from_unit: &str, to_unit: &str, ingredient: &str) -> Option<f64> {
    let from = from_unit.trim().to_lowercase();
    let to = to_unit.trim().to_lowercase();

    INGREDIENT_CONVERSIONS
        .iter()
        .filter(|(key, _)| same_ingredient(key, ingredient))
        .flat_map(|(_, rules)| rules.iter())
        .find(|r| r.from == from && r.to == to)
        .map(|r| r.rate)
}

/// Rate from the fixed tables only (steps 1 to 3)
///
/// ```rust
/// use kondate::conversion::static_rate;
///
/// assert_eq!(static_rate("ML", "ml", "醤油"), Some(1.0));
/// assert_eq!(static_rate("かけ", "g", "しょうが"), Some(15.0));
/// assert_eq!(static_rate("大さじ", "ml", "醤油"), Some(15.0));
/// assert_eq!(static_rate("本", "g", "人参"), None);
/// ```
pub fn static_rate(from_unit: &str, to_unit: &str, ingredient: &str) -> Option<f64> {
    let from = from_unit.trim();
    let to = to_unit.trim();

    if from.to_lowercase() == to.to_lowercase() {
        return Some(1.0);
    }

    if let Some(rate) = override_rate(from, to, ingredient) {
        return Some(rate);
    }

    base_ratio(from, to)
}

/// Source of rates the fixed tables cannot answer
#[async_trait]
pub trait RateEstimator: Send + Sync {
    /// Estimated rate from `from_unit` to `to_unit` for `ingredient`;
    /// `Ok(None)` means no sensible conversion exists
    async fn estimate_rate(
        &self,
        ingredient: &str,
        from_unit: &str,
        to_unit: &str,
    ) -> Result<Option<f64>, AiError>;
}

/// Estimator that never knows a rate
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineEstimator;

#[async_trait]
impl RateEstimator for OfflineEstimator {
    async fn estimate_rate(&self, _: &str, _: &str, _: &str) -> Result<Option<f64>, AiError> {
        Ok(None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    from: String,
    to: String,
    ingredient: String,
}

/// Memoized estimator answers, including "no conversion"
#[derive(Debug, Default)]
pub struct ConversionCache {
    entries: HashMap<CacheKey, Option<f64>>,
}

impl ConversionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` on a miss, `Some(None)` for a cached "no conversion"
    pub fn get(&self, from: &str, to: &str, ingredient: &str) -> Option<Option<f64>> {
        self.entries.get(&Self::key(from, to, ingredient)).copied()
    }

    pub fn insert(&mut self, from: &str, to: &str, ingredient: &str, rate: Option<f64>) {
        self.entries.insert(Self::key(from, to, ingredient), rate);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(from: &str, to: &str, ingredient: &str) -> CacheKey {
        CacheKey {
            from: from.to_string(),
            to: to.to_string(),
            ingredient: ingredient.to_string(),
        }
    }
}

/// Resolves conversion rates and owns the estimator cache
///
/// Callers clear the cache at the start of each top-level operation and
/// reuse it for all lookups within that operation.
pub struct ConversionResolver {
    estimator: Arc<dyn RateEstimator>,
    cache: ConversionCache,
}

impl ConversionResolver {
    pub fn new(estimator: Arc<dyn RateEstimator>) -> Self {
        Self {
            estimator,
            cache: ConversionCache::new(),
        }
    }

    /// Resolver that only uses the fixed tables
    pub fn offline() -> Self {
        Self::new(Arc::new(OfflineEstimator))
    }

    /// Rate converting `from_unit` amounts into `to_unit` amounts of `ingredient`
    pub async fn resolve(&mut self, from_unit: &str, to_unit: &str, ingredient: &str) -> Option<f64> {
        let from = from_unit.trim();
        let to = to_unit.trim();

        if let Some(rate) = static_rate(from, to, ingredient) {
            return Some(rate);
        }

        if let Some(cached) = self.cache.get(from, to, ingredient) {
            debug!("Conversion cache hit for {ingredient}: {from} -> {to} = {cached:?}");
            return cached;
        }

        let rate = match self.estimator.estimate_rate(ingredient, from, to).await {
            Ok(Some(rate)) if rate.is_finite() && rate > 0.0 => Some(rate),
            Ok(Some(rate)) => {
                warn!("Discarding unusable rate {rate} for {ingredient}: {from} -> {to}");
                None
            }
            Ok(None) => None,
            Err(err) => {
                warn!("Rate estimation failed for {ingredient} ({from} -> {to}): {err}");
                None
            }
        };

        debug!("Estimated rate for {ingredient}: {from} -> {to} = {rate:?}");
        self.cache.insert(from, to, ingredient, rate);
        rate
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &ConversionCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEstimator {
        calls: AtomicUsize,
        answer: Result<Option<f64>, AiError>,
    }

    #[async_trait]
    impl RateEstimator for CountingEstimator {
        async fn estimate_rate(&self, _: &str, _: &str, _: &str) -> Result<Option<f64>, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    fn counting(answer: Result<Option<f64>, AiError>) -> Arc<CountingEstimator> {
        Arc::new(CountingEstimator {
            calls: AtomicUsize::new(0),
            answer,
        })
    }

    #[test]
    fn test_override_applies_to_synonyms() {
        assert_eq!(override_rate("かけ", "g", "生姜"), Some(15.0));
        assert_eq!(override_rate("かけ", "g", "ジンジャー"), Some(15.0));
        assert_eq!(override_rate("かけ", "g", "ニンニク"), Some(5.0));
        assert_eq!(override_rate("g", "かけ", "にんにく"), Some(0.2));
        assert_eq!(override_rate("かけ", "g", "人参"), None);
    }

    #[test]
    fn test_static_rate_identity_is_case_insensitive() {
        assert_eq!(static_rate(" G ", "g", "砂糖"), Some(1.0));
    }

    #[tokio::test]
    async fn test_estimator_result_is_cached() {
        let estimator = counting(Ok(Some(120.0)));
        let mut resolver = ConversionResolver::new(estimator.clone());

        assert_eq!(resolver.resolve("本", "g", "人参").await, Some(120.0));
        assert_eq!(resolver.resolve("本", "g", "人参").await, Some(120.0));
        assert_eq!(estimator.calls.load(Ordering::SeqCst), 1);

        resolver.clear_cache();
        assert_eq!(resolver.resolve("本", "g", "人参").await, Some(120.0));
        assert_eq!(estimator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_estimator_error_is_cached_as_none() {
        let estimator = counting(Err(AiError::Timeout("15s".into())));
        let mut resolver = ConversionResolver::new(estimator.clone());

        assert_eq!(resolver.resolve("丁", "g", "豆腐").await, None);
        assert_eq!(resolver.resolve("丁", "g", "豆腐").await, None);
        assert_eq!(estimator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.cache().get("丁", "g", "豆腐"), Some(None));
    }

    #[tokio::test]
    async fn test_unusable_rates_are_rejected() {
        let mut resolver = ConversionResolver::new(counting(Ok(Some(-2.0))));
        assert_eq!(resolver.resolve("個", "g", "卵").await, None);

        let mut resolver = ConversionResolver::new(counting(Ok(Some(f64::NAN))));
        assert_eq!(resolver.resolve("個", "g", "卵").await, None);
    }

    #[tokio::test]
    async fn test_static_rates_skip_estimator() {
        let estimator = counting(Ok(Some(99.0)));
        let mut resolver = ConversionResolver::new(estimator.clone());
        assert_eq!(resolver.resolve("大さじ", "ml", "醤油").await, Some(15.0));
        assert_eq!(resolver.resolve("kg", "g", "豚").await, Some(1000.0));
        assert_eq!(estimator.calls.load(Ordering::SeqCst), 0);
        assert!(resolver.cache().is_empty());
    }
}
