//! # Shortfall Calculator Module
//!
//! Nets a week's aggregated demand against the stock available at the start of
//! that week, producing the week's consumed deltas and what is left to buy.
//!
//! The computation only reads the ledger. Committing the returned deltas (and
//! replacing any previous ones for the week) is up to the caller.

use crate::conversion::ConversionResolver;
use crate::demand::aggregate;
use crate::errors::HouseholdError;
use crate::household_model::{ConsumedItem, InventoryItem, ShortfallEntry, WeeklyMealPlan};
use crate::ledger::available_for_week;
use crate::quantity_parser::format_amount;
use crate::recipe_catalog::RecipeCatalog;
use crate::synonyms::find_matching_index_by;
use log::{debug, info};

/// Remaining need at or below this is considered met (floating-point drift)
pub const SATISFIED_EPSILON: f64 = 0.001;

/// Consumption at or below this is not recorded
pub const CONSUME_EPSILON: f64 = 0.0001;

/// Result of netting one week's demand against stock
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortfallOutcome {
    /// Complete set of claims for the week; supersedes any previous set
    pub consumed_items: Vec<ConsumedItem>,
    pub shortfall: Vec<ShortfallEntry>,
}

/// Compute consumed deltas and shortfall for week `week_index`
///
/// # Arguments
///
/// * `week_index` - Index into `plans`, which must be ordered by start date
/// * `plans` - All weeks; only weeks before `week_index` affect available stock
/// * `pristine` - Inventory without any planned consumption
/// * `catalog` - Recipes referenced by the plan
/// * `resolver` - Conversion rates; its cache is reused across ingredients
///
/// Ingredients with no inventory match, no stock, or no resolvable rate fall
/// through to the shortfall in full.
pub async fn compute_shortfall(
    week_index: usize,
    plans: &[WeeklyMealPlan],
    pristine: &[InventoryItem],
    catalog: &RecipeCatalog,
    resolver: &mut ConversionResolver,
) -> Result<ShortfallOutcome, HouseholdError> {
    let week = plans
        .get(week_index)
        .ok_or(HouseholdError::WeekOutOfRange(week_index))?;

    let mut available = available_for_week(pristine, plans, week_index);
    let demand = aggregate(week, catalog);
    let mut outcome = ShortfallOutcome::default();

    for entry in demand.entries() {
        let mut need = entry.total_amount;
        let matched = find_matching_index_by(&entry.display_name, &available, |item| {
            item.name.as_str()
        });

        if let Some(index) = matched {
            let stocked = available[index].pristine_quantity;
            if stocked > 0.0 {
                let inventory_unit = available[index].unit.clone();
                match resolver
                    .resolve(&entry.unit, &inventory_unit, &entry.display_name)
                    .await
                {
                    Some(rate) => {
                        let consume = stocked.min(need * rate);
                        if consume > CONSUME_EPSILON {
                            available[index].pristine_quantity -= consume;
                            outcome
                                .consumed_items
                                .push(ConsumedItem::new(available[index].id.clone(), consume));
                            need -= consume / rate;
                        }
                    }
                    None => debug!(
                        "No rate for {} from {} to {}, keeping full need",
                        entry.display_name, entry.unit, inventory_unit
                    ),
                }
            }
        }

        if need > SATISFIED_EPSILON {
            outcome.shortfall.push(ShortfallEntry {
                name: entry.display_name.clone(),
                quantity: format!("{}{}", format_amount(need), entry.unit),
                is_new_item: matched.is_none(),
            });
        }
    }

    info!(
        "Week {}: {} consumed deltas, {} shortfall entries",
        week.start_date,
        outcome.consumed_items.len(),
        outcome.shortfall.len()
    );
    Ok(outcome)
}
