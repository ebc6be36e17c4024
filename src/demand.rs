//! # Demand Aggregation Module
//!
//! Sums the ingredient quantities a week's meal plan calls for. Demand is keyed
//! by (lower-cased ingredient name, unit): the same ingredient written in two
//! different units stays as two separate entries.
//!
//! Ingredients whose quantity cannot be parsed ("少々", "to taste") contribute
//! no demand. They can never be shopped for automatically.

use crate::household_model::WeeklyMealPlan;
use crate::quantity_parser::parse_quantity;
use crate::recipe_catalog::RecipeCatalog;
use log::{debug, trace};
use std::collections::HashMap;

/// Total required amount of one ingredient in one unit
#[derive(Debug, Clone, PartialEq)]
pub struct DemandEntry {
    /// Name as first written in a recipe
    pub display_name: String,
    pub unit: String,
    pub total_amount: f64,
}

/// Demand per (ingredient, unit), in first-seen order
#[derive(Debug, Clone, Default)]
pub struct AggregatedDemand {
    entries: Vec<DemandEntry>,
    index: HashMap<(String, String), usize>,
}

impl AggregatedDemand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the entry for (name, unit), creating it if needed
    pub fn add(&mut self, name: &str, unit: &str, amount: f64) {
        let key = (name.to_lowercase(), unit.to_string());
        match self.index.get(&key) {
            Some(&position) => self.entries[position].total_amount += amount,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(DemandEntry {
                    display_name: name.to_string(),
                    unit: unit.to_string(),
                    total_amount: amount,
                });
            }
        }
    }

    pub fn get(&self, name: &str, unit: &str) -> Option<&DemandEntry> {
        self.index
            .get(&(name.to_lowercase(), unit.to_string()))
            .map(|&position| &self.entries[position])
    }

    pub fn entries(&self) -> &[DemandEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregate the ingredient demand of every recipe entry in the week's plan
///
/// Entries that are not recipe ids (free-text labels such as "外食") are ignored.
pub fn aggregate(week: &WeeklyMealPlan, catalog: &RecipeCatalog) -> AggregatedDemand {
    let mut demand = AggregatedDemand::new();

    for entry in week.entries() {
        let Some(recipe) = catalog.get(entry) else {
            trace!("Plan entry '{}' is not a recipe", entry);
            continue;
        };

        for ingredient in &recipe.ingredients {
            match parse_quantity(&ingredient.quantity) {
                Some(parsed) => demand.add(&ingredient.name, &parsed.unit, parsed.amount),
                None => trace!(
                    "Skipping unquantified ingredient {} ({}) of {}",
                    ingredient.name,
                    ingredient.quantity,
                    recipe.name
                ),
            }
        }
    }

    debug!(
        "Aggregated {} demand entries for week {}",
        demand.len(),
        week.start_date
    );
    demand
}
