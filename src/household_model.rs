//! # Household Data Model
//!
//! Data structures shared by the planner: recipes, inventory rows, weekly meal
//! plans with their recorded consumption, and shopping-list entries. All of them
//! serialize with camelCase field names, which is the layout of the state file.
//!
//! ## Core Concepts
//!
//! - **Pristine quantity**: an inventory row's stock before any planned
//!   consumption. Only restocks and explicit edits change it.
//! - **Consumed delta**: an (inventory id, amount) pair a week claims against
//!   stock when its shopping list is computed.
//!
//! ## Usage
//!
//! ```rust
//! use kondate::household_model::{InventoryItem, WeeklyMealPlan, Weekday};
//! use chrono::NaiveDate;
//!
//! let soy = InventoryItem::new("inv-1", "醤油", 1000.0, "ml")
//!     .with_category("調味料")
//!     .with_threshold(200.0);
//!
//! let mut week = WeeklyMealPlan::new(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
//! week.add_entry(Weekday::Monday, "recipe-1");
//! assert_eq!(week.entries().count(), 1);
//! # let _ = soy;
//! ```

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Category given to inventory rows created without one
pub const DEFAULT_INVENTORY_CATEGORY: &str = "その他・加工品";

/// Tag added to recipes that have been cooked often
pub const FREQUENT_RECIPE_TAG: &str = "よく作る献立";

/// Number of cooked occurrences after which a recipe is tagged as frequent
pub const FREQUENT_RECIPE_THRESHOLD: u32 = 10;

/// Day of a meal-plan week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Lower-case English key, as used in the state file and AI payloads
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    /// Single-character Japanese label
    pub fn label_ja(self) -> &'static str {
        match self {
            Weekday::Monday => "月",
            Weekday::Tuesday => "火",
            Weekday::Wednesday => "水",
            Weekday::Thursday => "木",
            Weekday::Friday => "金",
            Weekday::Saturday => "土",
            Weekday::Sunday => "日",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Weekday {
    type Err = String;

    /// Accepts the English key, its three-letter form, or the Japanese label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| {
                let key = day.key();
                lowered == key
                    || lowered == key[..3]
                    || lowered == day.label_ja()
                    || lowered == format!("{}曜日", day.label_ja())
            })
            .ok_or_else(|| format!("unknown weekday: {s}"))
    }
}

/// One ingredient line of a recipe, quantity kept as written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: String,
}

impl RecipeIngredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// A recipe in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub cooking_time: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub link_url: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub times_cooked: u32,
}

impl Recipe {
    /// Create a recipe from authored content with fresh bookkeeping fields
    pub fn from_new(id: impl Into<String>, new: NewRecipe) -> Self {
        Self {
            id: id.into(),
            name: new.name,
            category: new.category,
            cooking_time: new.cooking_time,
            tags: new.tags,
            ingredients: new.ingredients,
            instructions: new.instructions,
            link_url: new.link_url,
            memo: String::new(),
            image_url: None,
            is_favorite: false,
            times_cooked: 0,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Authored recipe content, before the catalog assigns an id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    pub category: String,
    pub cooking_time: u32,
    pub tags: Vec<String>,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: String,
    #[serde(default)]
    pub link_url: String,
}

/// Partial update of a recipe; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub cooking_time: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<RecipeIngredient>>,
    pub instructions: Option<String>,
    pub link_url: Option<String>,
    pub memo: Option<String>,
    pub image_url: Option<String>,
}

/// A stock row
///
/// `pristine_quantity` is serialized as `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(rename = "quantity")]
    pub pristine_quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub notification_threshold: f64,
    #[serde(default)]
    pub purchase_unit: String,
    #[serde(default)]
    pub purchase_quantity: f64,
    #[serde(default)]
    pub is_persisted: bool,
}

impl InventoryItem {
    /// Create a persisted item in the default category with no low-stock threshold
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        let unit = unit.into();
        Self {
            id: id.into(),
            name: name.into(),
            category: DEFAULT_INVENTORY_CATEGORY.to_string(),
            pristine_quantity: quantity,
            purchase_unit: unit.clone(),
            unit,
            notification_threshold: 0.0,
            purchase_quantity: 1.0,
            is_persisted: true,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.notification_threshold = threshold;
        self
    }

    pub fn with_purchase(mut self, unit: impl Into<String>, quantity: f64) -> Self {
        self.purchase_unit = unit.into();
        self.purchase_quantity = quantity;
        self
    }

    /// Whether `quantity` of this item is below its notification threshold
    pub fn is_low(&self, quantity: f64) -> bool {
        self.notification_threshold > 0.0 && quantity < self.notification_threshold
    }
}

impl fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{}",
            self.name,
            crate::quantity_parser::format_amount(self.pristine_quantity),
            self.unit
        )
    }
}

/// Partial update of an inventory row; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct InventoryUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub notification_threshold: Option<f64>,
    pub purchase_unit: Option<String>,
    pub purchase_quantity: Option<f64>,
}

/// Amount of one inventory row a week claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumedItem {
    pub inventory_id: String,
    pub consumed_amount: f64,
}

impl ConsumedItem {
    pub fn new(inventory_id: impl Into<String>, consumed_amount: f64) -> Self {
        Self {
            inventory_id: inventory_id.into(),
            consumed_amount,
        }
    }
}

/// Plan entries (recipe ids or free-text labels) per weekday
pub type MealPlan = BTreeMap<Weekday, Vec<String>>;

/// One week of the meal-plan ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMealPlan {
    pub id: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub plan: MealPlan,
    #[serde(default)]
    pub is_counted: bool,
    #[serde(default)]
    pub consumed_items: Vec<ConsumedItem>,
}

impl WeeklyMealPlan {
    /// An empty week; the id is derived from the start date, which is unique per ledger
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            id: format!("week-{start_date}"),
            start_date,
            plan: MealPlan::new(),
            is_counted: false,
            consumed_items: Vec::new(),
        }
    }

    /// Every plan entry of the week in day order
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.plan.values().flatten().map(String::as_str)
    }

    pub fn add_entry(&mut self, day: Weekday, entry: impl Into<String>) {
        self.plan.entry(day).or_default().push(entry.into());
    }

    pub fn is_empty(&self) -> bool {
        self.plan.values().all(Vec::is_empty)
    }

    /// Days with no entries
    pub fn empty_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|day| self.plan.get(day).map_or(true, Vec::is_empty))
            .collect()
    }
}

/// An ingredient still to buy after netting demand against stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortfallEntry {
    pub name: String,
    /// `"<amount><unit>"`, amount rounded to two decimals
    pub quantity: String,
    /// True when no inventory row matched at all
    pub is_new_item: bool,
}

/// An entry of the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub name: String,
    /// Amount the user intends to buy or bought; editable
    pub quantity: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub is_header: bool,
    /// Need as originally computed
    pub shortfall_quantity: String,
    #[serde(default)]
    pub is_new_item: bool,
    #[serde(default)]
    pub is_manual: bool,
}

impl ShoppingListItem {
    /// Item derived from a shortfall entry
    pub fn from_shortfall(entry: &ShortfallEntry) -> Self {
        Self {
            name: entry.name.clone(),
            quantity: entry.quantity.clone(),
            checked: false,
            is_header: false,
            shortfall_quantity: entry.quantity.clone(),
            is_new_item: entry.is_new_item,
            is_manual: false,
        }
    }

    /// Item the user typed in
    pub fn manual(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        let quantity = quantity.into();
        Self {
            name: name.into(),
            shortfall_quantity: quantity.clone(),
            quantity,
            checked: false,
            is_header: false,
            is_new_item: true,
            is_manual: true,
        }
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.checked { "[x]" } else { "[ ]" };
        write!(f, "{mark} {} {}", self.name, self.quantity)
    }
}

/// Monday of the week containing `date`
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// A fresh id such as `recipe-1718000000000-4821`
pub fn generate_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("{prefix}-{millis}-{suffix:04}")
}
