//! Structured extraction through the AI collaborator: recipes from photos,
//! meal-plan completion, conversion-rate estimates and unit suggestions.
//!
//! Answers are untrusted. Every field is validated here and anything the
//! collaborator invents outside the requested shape is dropped.

use super::json_extract::decode_json;
use super::prompts::{self, PlanRecipe, SOUP_CATEGORY};
use super::{with_timeout, CompletionProvider, GenerationRequest, InlineImage};
use crate::conversion::RateEstimator;
use crate::errors::AiError;
use crate::household_model::{MealPlan, NewRecipe, RecipeIngredient, Weekday};
use crate::recipe_catalog::RecipeCatalog;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Soup-category entries allowed per week
pub const WEEKLY_SOUP_CAP: usize = 3;

/// Read a recipe from one or more photos
///
/// Fails with [`AiError::IncompleteRecipe`] naming every required field the
/// answer lacks.
pub async fn extract_recipe(
    provider: &dyn CompletionProvider,
    images: Vec<InlineImage>,
    timeout: Duration,
) -> Result<NewRecipe, AiError> {
    if images.is_empty() {
        return Err(AiError::InvalidRequest("no images supplied".to_string()));
    }

    let image_count = images.len();
    let request = GenerationRequest::json(prompts::recipe_extraction_prompt()).with_images(images);
    let answer = with_timeout(timeout, "recipe extraction", provider.generate(&request)).await?;
    let raw: Value = decode_json(&answer)?;

    let recipe = recipe_from_value(&raw)?;
    info!(
        images = image_count,
        name = %recipe.name,
        ingredients = recipe.ingredients.len(),
        "Extracted recipe"
    );
    Ok(recipe)
}

/// Validate an extraction answer
pub fn recipe_from_value(raw: &Value) -> Result<NewRecipe, AiError> {
    let empty = Map::new();
    let object = raw.as_object().unwrap_or(&empty);
    let mut missing = Vec::new();

    let name = non_blank(object.get("name"));
    if name.is_none() {
        missing.push("name");
    }
    let category = non_blank(object.get("category"));
    if category.is_none() {
        missing.push("category");
    }
    let ingredients = object.get("ingredients").and_then(Value::as_array);
    if ingredients.is_none() {
        missing.push("ingredients");
    }
    let instructions = object.get("instructions").and_then(instructions_text);
    if instructions.is_none() {
        missing.push("instructions");
    }
    let tags = object.get("tags").and_then(Value::as_array);
    if tags.is_none() {
        missing.push("tags");
    }
    let cooking_time = object.get("cookingTime").and_then(minutes);
    if cooking_time.is_none() {
        missing.push("cookingTime");
    }

    let (Some(name), Some(category), Some(ingredients), Some(instructions), Some(tags), Some(cooking_time)) =
        (name, category, ingredients, instructions, tags, cooking_time)
    else {
        return Err(AiError::IncompleteRecipe(
            missing.into_iter().map(str::to_string).collect(),
        ));
    };

    Ok(NewRecipe {
        name,
        category,
        cooking_time,
        tags: tags
            .iter()
            .filter_map(|tag| non_blank(Some(tag)))
            .collect(),
        ingredients: ingredients.iter().filter_map(ingredient).collect(),
        instructions,
        link_url: String::new(),
    })
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn instructions_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
        Value::Array(steps) => {
            let steps: Vec<&str> = steps.iter().filter_map(Value::as_str).map(str::trim).collect();
            Some(steps.join("\n")).filter(|t| !t.is_empty())
        }
        _ => None,
    }
}

/// A number or a numeric string, in whole minutes
fn minutes(value: &Value) -> Option<u32> {
    let minutes = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('分').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (minutes.is_finite() && minutes >= 0.0).then(|| minutes.round() as u32)
}

fn ingredient(value: &Value) -> Option<RecipeIngredient> {
    let name = non_blank(value.get("name"))?;
    let quantity = match value.get("quantity") {
        Some(Value::String(q)) => q.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    Some(RecipeIngredient::new(name, quantity))
}

/// Ask the collaborator to fill the empty days of `current`
///
/// Returns entries for previously empty days only. Soup-category recipes
/// beyond [`WEEKLY_SOUP_CAP`] per week are dropped from the suggested days.
pub async fn generate_meal_plan(
    provider: &dyn CompletionProvider,
    catalog: &RecipeCatalog,
    current: &MealPlan,
    request: Option<&str>,
    timeout: Duration,
) -> Result<MealPlan, AiError> {
    let empty_days: Vec<Weekday> = Weekday::ALL
        .into_iter()
        .filter(|day| current.get(day).map_or(true, Vec::is_empty))
        .collect();
    if empty_days.is_empty() {
        return Ok(MealPlan::new());
    }

    let recipes: Vec<PlanRecipe<'_>> = catalog
        .iter()
        .map(|r| PlanRecipe {
            id: &r.id,
            name: &r.name,
            category: &r.category,
        })
        .collect();
    let prefilled: MealPlan = current
        .iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(day, entries)| (*day, entries.clone()))
        .collect();

    let prompt = prompts::meal_plan_prompt(&recipes, &prefilled, request);
    let answer = with_timeout(
        timeout,
        "meal plan generation",
        provider.generate(&GenerationRequest::json(prompt)),
    )
    .await?;
    let raw: Value = decode_json(&answer)?;
    let object = raw
        .as_object()
        .ok_or_else(|| AiError::UnexpectedResponse("meal plan is not a JSON object".to_string()))?;

    let mut suggested = MealPlan::new();
    for (key, entries) in object {
        let Ok(day) = Weekday::from_str(key) else {
            debug!(key = %key, "Ignoring unknown weekday in meal plan");
            continue;
        };
        if !empty_days.contains(&day) {
            debug!(day = %day, "Ignoring suggestion for a planned day");
            continue;
        }
        let entries: Vec<String> = entries
            .as_array()
            .map(|list| {
                list.iter()
                    .filter_map(|entry| non_blank(Some(entry)))
                    .collect()
            })
            .unwrap_or_default();
        if !entries.is_empty() {
            suggested.insert(day, entries);
        }
    }

    let dropped = cap_soups(&mut suggested, &prefilled, catalog);
    info!(
        days = suggested.len(),
        dropped_soups = dropped,
        "Meal plan suggestion received"
    );
    Ok(suggested)
}

/// Drop soup entries from `suggested` once the week holds the cap
fn cap_soups(suggested: &mut MealPlan, prefilled: &MealPlan, catalog: &RecipeCatalog) -> usize {
    let is_soup = |entry: &str| {
        catalog
            .get(entry)
            .is_some_and(|recipe| recipe.category == SOUP_CATEGORY)
    };

    let mut soups = prefilled
        .values()
        .flatten()
        .filter(|entry| is_soup(entry))
        .count();
    let mut dropped = 0;

    for entries in suggested.values_mut() {
        entries.retain(|entry| {
            if !is_soup(entry) {
                return true;
            }
            if soups < WEEKLY_SOUP_CAP {
                soups += 1;
                true
            } else {
                dropped += 1;
                false
            }
        });
    }
    suggested.retain(|_, entries| !entries.is_empty());
    dropped
}

/// Ask how many `to_unit` one `from_unit` of `ingredient` is
///
/// `Ok(None)` when the collaborator answers that there is no sensible rate.
pub async fn estimate_conversion_rate(
    provider: &dyn CompletionProvider,
    ingredient: &str,
    from_unit: &str,
    to_unit: &str,
    timeout: Duration,
) -> Result<Option<f64>, AiError> {
    let prompt = prompts::conversion_prompt(ingredient, from_unit, to_unit);
    let answer = with_timeout(
        timeout,
        "conversion estimate",
        provider.generate(&GenerationRequest::json(prompt)),
    )
    .await?;
    let raw: Value = decode_json(&answer)?;

    let rate = match raw.get("rate") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|rate| rate.is_finite() && *rate > 0.0);

    debug!(ingredient, from_unit, to_unit, rate = ?rate, "Conversion estimate");
    Ok(rate)
}

/// Quantity spellings for `number` of `ingredient`, e.g. `1丁`, `1パック`
///
/// Any failure yields an empty list.
pub async fn suggest_units(
    provider: &dyn CompletionProvider,
    ingredient: &str,
    number: &str,
    timeout: Duration,
) -> Vec<String> {
    let prompt = prompts::unit_suggestion_prompt(ingredient, number);
    let result = with_timeout(
        timeout,
        "unit suggestion",
        provider.generate(&GenerationRequest::json(prompt)),
    )
    .await
    .and_then(|answer| decode_json::<Value>(&answer));

    match result {
        Ok(raw) => raw
            .get("suggestions")
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(|s| non_blank(Some(s))).collect())
            .unwrap_or_default(),
        Err(err) => {
            warn!(ingredient, error = %err, "Unit suggestion failed");
            Vec::new()
        }
    }
}

/// [`RateEstimator`] backed by a completion provider
#[derive(Debug, Clone)]
pub struct AiRateEstimator {
    provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl AiRateEstimator {
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }
}

#[async_trait]
impl RateEstimator for AiRateEstimator {
    async fn estimate_rate(
        &self,
        ingredient: &str,
        from_unit: &str,
        to_unit: &str,
    ) -> Result<Option<f64>, AiError> {
        estimate_conversion_rate(self.provider.as_ref(), ingredient, from_unit, to_unit, self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeProvider;
    use crate::household_model::{NewRecipe, Recipe};
    use serde_json::json;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn catalog() -> RecipeCatalog {
        let recipe = |id: &str, category: &str| {
            Recipe::from_new(
                id,
                NewRecipe {
                    name: id.to_string(),
                    category: category.to_string(),
                    ..NewRecipe::default()
                },
            )
        };
        RecipeCatalog::new(vec![
            recipe("recipe-1", "炒め物"),
            recipe("soup-1", "汁物"),
            recipe("soup-2", "汁物"),
        ])
    }

    #[test]
    fn test_recipe_missing_fields_are_all_listed() {
        let raw = json!({"name": "肉じゃが", "category": " ", "ingredients": []});
        assert_eq!(
            recipe_from_value(&raw),
            Err(AiError::IncompleteRecipe(vec![
                "category".to_string(),
                "instructions".to_string(),
                "tags".to_string(),
                "cookingTime".to_string(),
            ]))
        );
    }

    #[test]
    fn test_recipe_cooking_time_accepts_numeric_string() {
        let raw = json!({
            "name": "味噌汁",
            "category": "汁物",
            "cookingTime": "10分",
            "tags": ["和食", ""],
            "ingredients": [{"name": "豆腐", "quantity": "1/4丁"}, {"name": "", "quantity": "1"}],
            "instructions": ["だしを温める", "味噌を溶く"]
        });
        let recipe = recipe_from_value(&raw).unwrap();
        assert_eq!(recipe.cooking_time, 10);
        assert_eq!(recipe.tags, vec!["和食"]);
        assert_eq!(recipe.ingredients, vec![RecipeIngredient::new("豆腐", "1/4丁")]);
        assert_eq!(recipe.instructions, "だしを温める\n味噌を溶く");
    }

    #[tokio::test]
    async fn test_extract_recipe_requires_images() {
        let provider = FakeProvider::new();
        let result = extract_recipe(&provider, Vec::new(), TIMEOUT).await;
        assert!(matches!(result, Err(AiError::InvalidRequest(_))));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_meal_plan_only_fills_empty_days() {
        let provider = FakeProvider::new().with_default_response(
            r#"```json
{"monday": ["recipe-9"], "tuesday": ["外食", 3], "funday": ["recipe-1"], "wednesday": []}
```"#,
        );
        let mut current = MealPlan::new();
        current.insert(Weekday::Monday, vec!["recipe-1".to_string()]);

        let plan = generate_meal_plan(&provider, &catalog(), &current, None, TIMEOUT)
            .await
            .unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[&Weekday::Tuesday], vec!["外食"]);
    }

    #[tokio::test]
    async fn test_meal_plan_caps_soups() {
        let provider = FakeProvider::new().with_default_response(
            r#"{"tuesday": ["recipe-1", "soup-1"], "wednesday": ["soup-2"], "thursday": ["soup-1"]}"#,
        );
        let mut current = MealPlan::new();
        current.insert(Weekday::Monday, vec!["soup-2".to_string()]);

        let plan = generate_meal_plan(&provider, &catalog(), &current, Some("魚多め"), TIMEOUT)
            .await
            .unwrap();

        assert_eq!(plan[&Weekday::Tuesday], vec!["recipe-1", "soup-1"]);
        assert_eq!(plan[&Weekday::Wednesday], vec!["soup-2"]);
        assert!(!plan.contains_key(&Weekday::Thursday));
        assert!(provider.prompts()[0].contains("魚多め"));
    }

    #[tokio::test]
    async fn test_conversion_rate_values() {
        let provider = FakeProvider::with_response("人参", r#"{"rate": 150}"#);
        provider.add_response("塩", r#"{"rate": null}"#);
        provider.add_response("卵", r#"{"rate": -2}"#);

        let rate = |ingredient: &'static str| {
            let provider = &provider;
            async move { estimate_conversion_rate(provider, ingredient, "本", "g", TIMEOUT).await }
        };
        assert_eq!(rate("人参").await, Ok(Some(150.0)));
        assert_eq!(rate("塩").await, Ok(None));
        assert_eq!(rate("卵").await, Ok(None));
    }

    #[tokio::test]
    async fn test_suggest_units_fails_silently() {
        let provider = FakeProvider::failing(AiError::Network("down".into()));
        assert!(suggest_units(&provider, "豆腐", "1", TIMEOUT).await.is_empty());

        let provider = FakeProvider::new().with_default_response(r#"{"suggestions": ["1丁", "1パック"]}"#);
        assert_eq!(suggest_units(&provider, "豆腐", "1", TIMEOUT).await, vec!["1丁", "1パック"]);
    }
}
