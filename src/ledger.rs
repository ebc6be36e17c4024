//! # Inventory Ledger Module
//!
//! Stock levels per week are derived, never stored: the pristine inventory is
//! replayed against the consumed deltas of the weeks in start-date order. Every
//! function here is pure and returns a new snapshot.
//!
//! For week `N` the stock available at the start of the week is
//! `pristine - Σ consumed(weeks 0..N)`. The stock shown while viewing week `N`
//! also subtracts week `N`'s own claims, i.e. weeks `0..=N`.

use crate::household_model::{ConsumedItem, InventoryItem, WeeklyMealPlan};
use crate::quantity_parser::round_stock;
use log::trace;

/// Subtract one week's deltas from a snapshot
///
/// Deltas naming an id that is not in the snapshot are ignored.
///
/// ```rust
/// use kondate::household_model::{ConsumedItem, InventoryItem};
/// use kondate::ledger::apply_consumption;
///
/// let stock = vec![InventoryItem::new("inv-1", "醤油", 1000.0, "ml")];
/// let after = apply_consumption(&stock, &[ConsumedItem::new("inv-1", 30.0)]);
///
/// assert_eq!(after[0].pristine_quantity, 970.0);
/// assert_eq!(stock[0].pristine_quantity, 1000.0);
/// ```
pub fn apply_consumption(snapshot: &[InventoryItem], consumed: &[ConsumedItem]) -> Vec<InventoryItem> {
    let mut next = snapshot.to_vec();
    for delta in consumed {
        match next.iter_mut().find(|item| item.id == delta.inventory_id) {
            Some(item) => item.pristine_quantity -= delta.consumed_amount,
            None => trace!("Consumed delta for unknown item {}", delta.inventory_id),
        }
    }
    next
}

/// Stock at the start of week `week_index`: every earlier week's claims applied
pub fn available_for_week(
    pristine: &[InventoryItem],
    plans: &[WeeklyMealPlan],
    week_index: usize,
) -> Vec<InventoryItem> {
    plans
        .iter()
        .take(week_index)
        .fold(pristine.to_vec(), |stock, week| {
            apply_consumption(&stock, &week.consumed_items)
        })
}

/// Stock shown while viewing week `week_index`: claims of weeks `0..=week_index`
/// applied, persisted rows only, rounded to 3 decimals
pub fn displayed_stock(
    pristine: &[InventoryItem],
    plans: &[WeeklyMealPlan],
    week_index: usize,
) -> Vec<InventoryItem> {
    let mut stock = after_week(pristine, plans, week_index);
    stock.retain(|item| item.is_persisted);
    for item in &mut stock {
        item.pristine_quantity = round_stock(item.pristine_quantity);
    }
    stock
}

/// Rows below their threshold while viewing week `week_index`
pub fn low_stock_for_week(
    pristine: &[InventoryItem],
    plans: &[WeeklyMealPlan],
    week_index: usize,
) -> Vec<InventoryItem> {
    low_stock(&after_week(pristine, plans, week_index))
}

fn after_week(pristine: &[InventoryItem], plans: &[WeeklyMealPlan], week_index: usize) -> Vec<InventoryItem> {
    available_for_week(pristine, plans, week_index.saturating_add(1))
}

/// Rows below their notification threshold
pub fn low_stock(snapshot: &[InventoryItem]) -> Vec<InventoryItem> {
    snapshot
        .iter()
        .filter(|item| item.is_low(item.pristine_quantity))
        .cloned()
        .collect()
}

/// Total claimed against `inventory_id` by the given weeks
pub fn total_consumed(plans: &[WeeklyMealPlan], inventory_id: &str) -> f64 {
    plans
        .iter()
        .flat_map(|week| week.consumed_items.iter())
        .filter(|delta| delta.inventory_id == inventory_id)
        .map(|delta| delta.consumed_amount)
        .sum()
}
