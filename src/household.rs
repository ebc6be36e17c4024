//! # Household Module
//!
//! The household state (recipes, meal-plan weeks, pantry, shopping list) and
//! the operations that change it. Operations that involve the AI collaborator
//! compute everything first and commit only once every call has succeeded, so
//! a failed call leaves the state exactly as it was.

use crate::ai::categorizer::{categorize_shopping_list, CategorizedItem};
use crate::ai::{self, AiRateEstimator, CompletionProvider, InlineImage};
use crate::ai_config::AiConfig;
use crate::conversion::ConversionResolver;
use crate::errors::{HouseholdError, ReconciliationError};
use crate::household_model::{
    generate_id, monday_of, InventoryItem, InventoryUpdate, MealPlan, NewRecipe, Recipe,
    RecipeUpdate, ShortfallEntry, ShoppingListItem, Weekday, WeeklyMealPlan, FREQUENT_RECIPE_TAG,
    FREQUENT_RECIPE_THRESHOLD,
};
use crate::ledger;
use crate::quantity_parser::round_stock;
use crate::recipe_catalog::{RecipeCatalog, RecipeFilter};
use crate::reconciliation::apply_purchases;
use crate::seed_data;
use crate::shortfall::compute_shortfall;
use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Number of most recent weeks kept when the ledger is trimmed
pub const RETAINED_WEEKS: usize = 6;

/// Everything that is persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdState {
    #[serde(default)]
    pub recipes: RecipeCatalog,
    /// Ordered by start date
    #[serde(default)]
    pub meal_plans: Vec<WeeklyMealPlan>,
    /// Pristine stock
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub shopping_list: Vec<ShoppingListItem>,
    /// Tags created without being put on a recipe
    #[serde(default)]
    pub extra_tags: Vec<String>,
}

impl HouseholdState {
    /// Sample recipes and pantry, no weeks yet
    pub fn sample() -> Self {
        Self {
            recipes: seed_data::sample_recipes(),
            inventory: seed_data::sample_inventory(),
            ..Self::default()
        }
    }
}

/// What a restock did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestockSummary {
    pub restocked: usize,
    pub created: usize,
    /// Items that stayed on the list because they could not be applied
    pub errors: Vec<ReconciliationError>,
}

/// What bringing the state up to date for a day changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStart {
    /// Index of today's week
    pub current: usize,
    /// Weeks were trimmed, added or reordered
    pub weeks_changed: bool,
    /// Past weeks counted into cooking statistics
    pub counted: usize,
}

impl DayStart {
    /// Whether the state differs from what was loaded
    pub fn changed(&self) -> bool {
        self.weeks_changed || self.counted > 0
    }
}

/// Household state plus the collaborators that operate on it
pub struct Household {
    state: HouseholdState,
    provider: Arc<dyn CompletionProvider>,
    resolver: ConversionResolver,
    config: AiConfig,
}

impl fmt::Debug for Household {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Household")
            .field("weeks", &self.state.meal_plans.len())
            .field("recipes", &self.state.recipes.len())
            .field("inventory", &self.state.inventory.len())
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl Household {
    pub fn new(state: HouseholdState, provider: Arc<dyn CompletionProvider>, config: AiConfig) -> Self {
        let estimator = AiRateEstimator::new(provider.clone(), config.conversion_timeout());
        Self {
            state,
            resolver: ConversionResolver::new(Arc::new(estimator)),
            provider,
            config,
        }
    }

    pub fn state(&self) -> &HouseholdState {
        &self.state
    }

    pub fn into_state(self) -> HouseholdState {
        self.state
    }

    pub fn week(&self, week: usize) -> Result<&WeeklyMealPlan, HouseholdError> {
        self.state
            .meal_plans
            .get(week)
            .ok_or(HouseholdError::WeekOutOfRange(week))
    }

    /// Index of the week starting on `start`
    pub fn week_index(&self, start: NaiveDate) -> Option<usize> {
        self.state.meal_plans.iter().position(|w| w.start_date == start)
    }

    // --- Meal-plan weeks ---

    /// Trim the ledger to the most recent weeks and make sure today's week exists
    ///
    /// Returns the index of today's week.
    pub fn ensure_current_week(&mut self, today: NaiveDate) -> usize {
        let plans = &mut self.state.meal_plans;
        plans.sort_by_key(|w| w.start_date);
        if plans.len() > RETAINED_WEEKS {
            let dropped = plans.len() - RETAINED_WEEKS;
            plans.drain(..dropped);
            debug!(dropped, "Trimmed old weeks");
        }

        let monday = monday_of(today);
        if let Some(index) = plans.iter().position(|w| w.start_date == monday) {
            return index;
        }

        plans.push(WeeklyMealPlan::new(monday));
        plans.sort_by_key(|w| w.start_date);
        info!(week = %monday, "Added current week");
        plans.iter().position(|w| w.start_date == monday).unwrap_or(plans.len() - 1)
    }

    /// Make today's week current and count the weeks that have ended
    pub fn start_day(&mut self, today: NaiveDate) -> DayStart {
        let before = self.week_starts();
        let current = self.ensure_current_week(today);
        let weeks_changed = self.week_starts() != before;
        let counted = self.roll_over_past_weeks(today);
        DayStart {
            current,
            weeks_changed,
            counted,
        }
    }

    fn week_starts(&self) -> Vec<NaiveDate> {
        self.state.meal_plans.iter().map(|w| w.start_date).collect()
    }

    /// Append the week after the last one; returns its index
    pub fn add_next_week(&mut self) -> usize {
        let start = self
            .state
            .meal_plans
            .last()
            .map(|w| w.start_date + Duration::days(7))
            .unwrap_or_else(|| monday_of(Local::now().date_naive()));

        self.state.meal_plans.push(WeeklyMealPlan::new(start));
        info!(week = %start, "Added next week");
        self.state.meal_plans.len() - 1
    }

    pub fn delete_week(&mut self, id: &str) -> Result<WeeklyMealPlan, HouseholdError> {
        if self.state.meal_plans.len() <= 1 {
            return Err(HouseholdError::LastWeek);
        }
        let index = self
            .state
            .meal_plans
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| HouseholdError::WeekNotFound(id.to_string()))?;

        let removed = self.state.meal_plans.remove(index);
        info!(week = %removed.start_date, "Deleted week");
        Ok(removed)
    }

    /// Apply a plan edit: drop emptied days, forget the week's claims, clear the list
    fn edit_plan<T>(
        &mut self,
        week: usize,
        edit: impl FnOnce(&mut MealPlan) -> T,
    ) -> Result<T, HouseholdError> {
        let plan = self
            .state
            .meal_plans
            .get_mut(week)
            .ok_or(HouseholdError::WeekOutOfRange(week))?;

        let result = edit(&mut plan.plan);
        plan.plan.retain(|_, entries| !entries.is_empty());
        plan.consumed_items.clear();
        self.state.shopping_list.clear();
        Ok(result)
    }

    pub fn add_meal_plan_item(
        &mut self,
        week: usize,
        day: Weekday,
        entry: impl Into<String>,
    ) -> Result<(), HouseholdError> {
        let entry = entry.into();
        debug!(week, day = %day, entry = %entry, "Adding plan entry");
        self.edit_plan(week, |plan| plan.entry(day).or_default().push(entry))
    }

    /// Remove the entry at `index` of `day`; `None` if there is none
    pub fn remove_meal_plan_item(
        &mut self,
        week: usize,
        day: Weekday,
        index: usize,
    ) -> Result<Option<String>, HouseholdError> {
        self.edit_plan(week, |plan| {
            plan.get_mut(&day)
                .filter(|entries| index < entries.len())
                .map(|entries| entries.remove(index))
        })
    }

    pub fn swap_meal_plan_days(&mut self, week: usize, a: Weekday, b: Weekday) -> Result<(), HouseholdError> {
        self.edit_plan(week, |plan| {
            let first = plan.remove(&a);
            let second = plan.remove(&b);
            if let Some(entries) = second {
                plan.insert(a, entries);
            }
            if let Some(entries) = first {
                plan.insert(b, entries);
            }
        })
    }

    pub fn clear_meal_plan(&mut self, week: usize) -> Result<(), HouseholdError> {
        self.edit_plan(week, MealPlan::clear)
    }

    /// Let the collaborator fill the empty days of `week`
    ///
    /// Fails with [`HouseholdError::PlanFull`] when no day is empty.
    pub async fn generate_meal_plan(
        &mut self,
        week: usize,
        request: Option<&str>,
    ) -> Result<(), HouseholdError> {
        let current = self.week(week)?;
        if current.empty_days().is_empty() {
            return Err(HouseholdError::PlanFull);
        }

        let suggested = ai::generate_meal_plan(
            self.provider.as_ref(),
            &self.state.recipes,
            &current.plan,
            request,
            self.config.request_timeout(),
        )
        .await?;

        let days = suggested.len();
        self.edit_plan(week, |plan| {
            for (day, entries) in suggested {
                if plan.get(&day).map_or(true, Vec::is_empty) {
                    plan.insert(day, entries);
                }
            }
        })?;
        info!(week, days, "Meal plan generated");
        Ok(())
    }

    /// Count cooked recipes of weeks that have ended
    ///
    /// Each occurrence of a recipe in an uncounted past week adds one to its
    /// `times_cooked`. Returns the number of weeks counted.
    pub fn roll_over_past_weeks(&mut self, today: NaiveDate) -> usize {
        let this_monday = monday_of(today);
        let mut cooked: HashMap<String, u32> = HashMap::new();
        let mut counted = 0;

        for week in self
            .state
            .meal_plans
            .iter_mut()
            .filter(|w| w.start_date < this_monday && !w.is_counted)
        {
            for entry in week.entries() {
                if self.state.recipes.get(entry).is_some() {
                    *cooked.entry(entry.to_string()).or_default() += 1;
                }
            }
            week.is_counted = true;
            counted += 1;
        }

        for recipe in self.state.recipes.iter_mut() {
            recipe.times_cooked += cooked.get(&recipe.id).copied().unwrap_or(0);
            if recipe.times_cooked >= FREQUENT_RECIPE_THRESHOLD && !recipe.has_tag(FREQUENT_RECIPE_TAG) {
                recipe.tags.push(FREQUENT_RECIPE_TAG.to_string());
            }
        }

        if counted > 0 {
            info!(weeks = counted, recipes = cooked.len(), "Counted past weeks");
        }
        counted
    }

    // --- Shopping list ---

    /// Recompute the shortfall of `week` and replace the shopping list with it
    ///
    /// The week's consumed deltas and the new list are committed together,
    /// only after categorization succeeded.
    pub async fn generate_shopping_list(&mut self, week: usize) -> Result<(), HouseholdError> {
        self.resolver.clear_cache();

        if self.week(week)?.is_empty() {
            self.state.meal_plans[week].consumed_items.clear();
            self.state.shopping_list.clear();
            info!(week, "Empty plan, shopping list cleared");
            return Ok(());
        }

        let outcome = compute_shortfall(
            week,
            &self.state.meal_plans,
            &self.state.inventory,
            &self.state.recipes,
            &mut self.resolver,
        )
        .await?;

        let request: Vec<CategorizedItem> = outcome
            .shortfall
            .iter()
            .map(|entry| CategorizedItem::new(entry.name.clone(), entry.quantity.clone()))
            .collect();
        let sorted = categorize_shopping_list(
            self.provider.as_ref(),
            &request,
            self.config.stream_timeout(),
        )
        .await?;

        let list = shopping_list_from(&outcome.shortfall, sorted);
        info!(
            week,
            consumed = outcome.consumed_items.len(),
            shortfall = outcome.shortfall.len(),
            items = list.len(),
            "Shopping list generated"
        );
        self.state.meal_plans[week].consumed_items = outcome.consumed_items;
        self.state.shopping_list = list;
        Ok(())
    }

    /// Fold checked items into the pantry
    ///
    /// Applied items leave the list; items that could not be converted stay
    /// on it and are reported.
    pub async fn restock_purchased_items(&mut self) -> RestockSummary {
        self.resolver.clear_cache();
        let outcome = apply_purchases(&self.state.shopping_list, &self.state.inventory, &mut self.resolver).await;

        let list = std::mem::take(&mut self.state.shopping_list);
        self.state.shopping_list = list
            .into_iter()
            .enumerate()
            .filter(|(position, item)| !item.checked || item.is_header || outcome.failed.contains(position))
            .map(|(_, item)| item)
            .collect();
        self.state.inventory = outcome.inventory;

        if !outcome.errors.is_empty() {
            warn!(failed = outcome.errors.len(), "Some purchases could not be added to stock");
        }
        RestockSummary {
            restocked: outcome.restocked,
            created: outcome.created,
            errors: outcome.errors,
        }
    }

    /// Add an item by hand and re-sort the list
    ///
    /// If sorting fails the item stays at the end of the list and the error is
    /// returned.
    pub async fn add_manual_shopping_item(&mut self, name: &str, quantity: &str) -> Result<(), HouseholdError> {
        self.state
            .shopping_list
            .push(ShoppingListItem::manual(name.trim(), quantity.trim()));
        self.reorganize_shopping_list().await
    }

    /// Re-sort the list by store section; on failure the list is unchanged
    pub async fn reorganize_shopping_list(&mut self) -> Result<(), HouseholdError> {
        let current: Vec<&ShoppingListItem> = self
            .state
            .shopping_list
            .iter()
            .filter(|item| !item.is_header)
            .collect();
        if current.is_empty() {
            return Ok(());
        }

        let request: Vec<CategorizedItem> = current
            .iter()
            .map(|item| CategorizedItem::new(item.name.clone(), item.quantity.clone()))
            .collect();
        let sorted = categorize_shopping_list(
            self.provider.as_ref(),
            &request,
            self.config.stream_timeout(),
        )
        .await?;

        let mut remaining: Vec<Option<ShoppingListItem>> = current.into_iter().cloned().map(Some).collect();
        let mut list = Vec::with_capacity(remaining.len());
        for line in sorted {
            let found = remaining
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|item| item.name == line.name))
                .and_then(Option::take);
            if let Some(item) = found {
                list.push(item);
            }
        }
        list.extend(remaining.into_iter().flatten());

        debug!(items = list.len(), "Shopping list reorganized");
        self.state.shopping_list = list;
        Ok(())
    }

    /// Flip `checked` on the item at `index`; returns the new state
    pub fn toggle_shopping_item(&mut self, index: usize) -> Result<bool, HouseholdError> {
        let item = self.shopping_item_mut(index)?;
        item.checked = !item.checked;
        Ok(item.checked)
    }

    /// Set the purchased quantity of the item at `index`
    pub fn update_shopping_item_quantity(&mut self, index: usize, quantity: &str) -> Result<(), HouseholdError> {
        self.shopping_item_mut(index)?.quantity = quantity.trim().to_string();
        Ok(())
    }

    fn shopping_item_mut(&mut self, index: usize) -> Result<&mut ShoppingListItem, HouseholdError> {
        self.state
            .shopping_list
            .get_mut(index)
            .ok_or(HouseholdError::ShoppingItemNotFound(index))
    }

    pub fn remove_shopping_item(&mut self, index: usize) -> Result<ShoppingListItem, HouseholdError> {
        if index >= self.state.shopping_list.len() {
            return Err(HouseholdError::ShoppingItemNotFound(index));
        }
        Ok(self.state.shopping_list.remove(index))
    }

    pub fn clear_shopping_list(&mut self) {
        self.state.shopping_list.clear();
    }

    // --- Inventory ---

    /// Add a pantry row under a fresh id; returns the id
    pub fn add_inventory_item(&mut self, mut item: InventoryItem) -> Result<String, HouseholdError> {
        check_stock_quantity(item.pristine_quantity)?;
        item.id = generate_id("inv");
        item.is_persisted = true;
        item.pristine_quantity = round_stock(item.pristine_quantity);
        let id = item.id.clone();

        info!(id = %id, name = %item.name, "Added inventory item");
        self.state.inventory.push(item);
        self.state.inventory.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(id)
    }

    /// Edit a pantry row; besides restocking, the only way to change pristine stock
    ///
    /// A negative or non-finite quantity rejects the whole update.
    pub fn update_inventory_item(&mut self, id: &str, update: InventoryUpdate) -> Result<(), HouseholdError> {
        if let Some(quantity) = update.quantity {
            check_stock_quantity(quantity)?;
        }
        let item = self
            .state
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| HouseholdError::InventoryItemNotFound(id.to_string()))?;

        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(quantity) = update.quantity {
            item.pristine_quantity = round_stock(quantity);
        }
        if let Some(unit) = update.unit {
            item.unit = unit;
        }
        if let Some(threshold) = update.notification_threshold.filter(|t| t.is_finite()) {
            item.notification_threshold = threshold;
        }
        if let Some(unit) = update.purchase_unit {
            item.purchase_unit = unit;
        }
        if let Some(quantity) = update.purchase_quantity.filter(|q| q.is_finite()) {
            item.purchase_quantity = quantity;
        }
        Ok(())
    }

    /// Set the stock shown for `week` to `quantity`
    ///
    /// The difference to the displayed amount is applied to pristine stock,
    /// so every week's claims stay as they are.
    pub fn adjust_displayed_stock(&mut self, week: usize, id: &str, quantity: f64) -> Result<(), HouseholdError> {
        check_stock_quantity(quantity)?;
        self.week(week)?;
        let displayed = self
            .displayed_inventory(week)
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| HouseholdError::InventoryItemNotFound(id.to_string()))?;

        let delta = quantity - displayed.pristine_quantity;
        let item = self
            .state
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| HouseholdError::InventoryItemNotFound(id.to_string()))?;
        item.pristine_quantity = round_stock(item.pristine_quantity + delta);

        debug!(week, id, quantity, delta, "Adjusted displayed stock");
        Ok(())
    }

    /// Move the stock shown for `week` by `step`, not below zero
    pub fn step_displayed_stock(&mut self, week: usize, id: &str, step: f64) -> Result<(), HouseholdError> {
        let shown = self
            .displayed_inventory(week)
            .into_iter()
            .find(|item| item.id == id)
            .map(|item| item.pristine_quantity)
            .ok_or_else(|| HouseholdError::InventoryItemNotFound(id.to_string()))?;
        self.adjust_displayed_stock(week, id, (shown + step).max(0.0))
    }

    /// Stock as seen while viewing `week`
    pub fn displayed_inventory(&self, week: usize) -> Vec<InventoryItem> {
        ledger::displayed_stock(&self.state.inventory, &self.state.meal_plans, week)
    }

    pub fn low_stock_items(&self, week: usize) -> Vec<InventoryItem> {
        ledger::low_stock_for_week(&self.state.inventory, &self.state.meal_plans, week)
    }

    // --- Recipes ---

    /// Read a recipe from photos and add it; returns the new id
    pub async fn add_recipe_from_images(&mut self, images: Vec<InlineImage>) -> Result<String, HouseholdError> {
        let recipe = ai::extract_recipe(self.provider.as_ref(), images, self.config.request_timeout()).await?;
        Ok(self.add_manual_recipe(recipe, ""))
    }

    pub fn add_manual_recipe(&mut self, recipe: NewRecipe, memo: &str) -> String {
        let mut recipe = Recipe::from_new(generate_id("recipe"), recipe);
        recipe.memo = memo.to_string();
        let id = recipe.id.clone();

        info!(id = %id, name = %recipe.name, "Added recipe");
        self.state.recipes.add(recipe);
        id
    }

    pub fn update_recipe(&mut self, id: &str, update: RecipeUpdate) -> Result<(), HouseholdError> {
        if self.state.recipes.update(id, update) {
            Ok(())
        } else {
            Err(HouseholdError::RecipeNotFound(id.to_string()))
        }
    }

    /// Delete a recipe and take it off every week's plan
    pub fn delete_recipe(&mut self, id: &str) -> Result<Recipe, HouseholdError> {
        let recipe = self
            .state
            .recipes
            .remove(id)
            .ok_or_else(|| HouseholdError::RecipeNotFound(id.to_string()))?;

        let mut touched = 0;
        for week in &mut self.state.meal_plans {
            let before = week.entries().count();
            for entries in week.plan.values_mut() {
                entries.retain(|entry| entry != id);
            }
            week.plan.retain(|_, entries| !entries.is_empty());
            if week.entries().count() != before {
                week.consumed_items.clear();
                touched += 1;
            }
        }
        if touched > 0 {
            self.state.shopping_list.clear();
        }

        info!(id, weeks = touched, "Deleted recipe");
        Ok(recipe)
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, HouseholdError> {
        self.state
            .recipes
            .toggle_favorite(id)
            .ok_or_else(|| HouseholdError::RecipeNotFound(id.to_string()))
    }

    pub fn rename_tag(&mut self, old: &str, new: &str) {
        let new = new.trim();
        if new.is_empty() || old == new {
            return;
        }
        self.state.recipes.rename_tag(old, new);

        let tags = &mut self.state.extra_tags;
        let had_new = tags.iter().any(|t| t == new);
        tags.retain(|t| t != old || !had_new);
        for tag in tags.iter_mut().filter(|t| *t == old) {
            *tag = new.to_string();
        }
    }

    pub fn delete_tag(&mut self, tag: &str) {
        self.state.recipes.delete_tag(tag);
        self.state.extra_tags.retain(|t| t != tag);
    }

    /// Register a tag that no recipe carries yet
    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        if !tag.is_empty() && !self.state.extra_tags.iter().any(|t| t == tag) {
            self.state.extra_tags.push(tag.to_string());
        }
    }

    /// Sorted union of recipe tags and registered tags
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags = self.state.recipes.tags();
        tags.extend(self.state.extra_tags.iter().cloned());
        tags.sort();
        tags.dedup();
        tags
    }

    pub fn search_recipes(&self, filter: &RecipeFilter) -> Vec<&Recipe> {
        self.state.recipes.search(filter)
    }

    /// Quantity spellings for an ingredient; empty on any failure
    pub async fn suggest_units(&self, ingredient: &str, number: &str) -> Vec<String> {
        ai::suggest_units(
            self.provider.as_ref(),
            ingredient,
            number,
            self.config.request_timeout(),
        )
        .await
    }
}

fn check_stock_quantity(quantity: f64) -> Result<(), HouseholdError> {
    if quantity.is_finite() && quantity >= 0.0 {
        Ok(())
    } else {
        Err(HouseholdError::InvalidQuantity(quantity))
    }
}

/// Shopping-list items in categorizer order
///
/// Each categorized line takes the flags of the first unused shortfall entry
/// of the same name; lines naming no shortfall entry are dropped. Shortfall
/// entries the categorizer left out are appended as they are.
fn shopping_list_from(shortfall: &[ShortfallEntry], sorted: Vec<CategorizedItem>) -> Vec<ShoppingListItem> {
    let mut used = vec![false; shortfall.len()];
    let mut list = Vec::with_capacity(shortfall.len());

    for line in sorted {
        let Some(index) = (0..shortfall.len()).find(|&i| !used[i] && shortfall[i].name == line.name) else {
            debug!(name = %line.name, "Dropping categorized line with no shortfall entry");
            continue;
        };
        used[index] = true;

        let mut item = ShoppingListItem::from_shortfall(&shortfall[index]);
        item.quantity = line.quantity;
        list.push(item);
    }

    let omitted = shortfall
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(entry, _)| ShoppingListItem::from_shortfall(entry));
    list.extend(omitted);
    list
}
