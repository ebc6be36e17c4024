//! # Purchase Reconciliation Module
//!
//! Folds checked shopping-list items back into the pristine inventory.
//! Unlike shortfall computation this is not all-or-nothing: an item that
//! cannot be converted is reported and skipped, the rest still apply.

use crate::conversion::ConversionResolver;
use crate::errors::ReconciliationError;
use crate::household_model::{generate_id, InventoryItem, ShoppingListItem};
use crate::quantity_parser::{parse_quantity, round_stock};
use crate::shortfall::SATISFIED_EPSILON;
use crate::synonyms::find_matching_index_by;
use log::{debug, info, warn};

/// Result of a restock
#[derive(Debug, Clone, Default)]
pub struct PurchaseOutcome {
    /// Updated pristine inventory, sorted by name
    pub inventory: Vec<InventoryItem>,
    /// One entry per item that could not be applied
    pub errors: Vec<ReconciliationError>,
    /// Positions in the input list of the items in `errors`, same order
    pub failed: Vec<usize>,
    /// Existing rows that received stock
    pub restocked: usize,
    /// Rows created for items not in the inventory
    pub created: usize,
}

impl PurchaseOutcome {
    fn fail(&mut self, position: usize, error: ReconciliationError) {
        self.errors.push(error);
        self.failed.push(position);
    }
}

/// Apply the checked, non-header items of `items` to `pristine`
///
/// - A matched inventory row receives the purchase converted to its unit.
/// - A manual item with no match becomes a new row holding the full purchase.
/// - A shortfall-derived item with no match becomes a new row holding only the
///   surplus over the original shortfall, if any.
///
/// Items with an unparseable or non-positive purchased quantity are skipped.
/// Failures are reported with the item's position in `items`, since the list
/// may hold several items of the same name.
pub async fn apply_purchases(
    items: &[ShoppingListItem],
    pristine: &[InventoryItem],
    resolver: &mut ConversionResolver,
) -> PurchaseOutcome {
    let mut outcome = PurchaseOutcome {
        inventory: pristine.to_vec(),
        ..PurchaseOutcome::default()
    };

    for (position, item) in items.iter().enumerate().filter(|(_, i)| i.checked && !i.is_header) {
        let Some(purchased) = parse_quantity(&item.quantity).filter(|p| p.amount > 0.0) else {
            debug!("Skipping {} with quantity '{}'", item.name, item.quantity);
            continue;
        };

        let matched = find_matching_index_by(&item.name, &outcome.inventory, |row| row.name.as_str());

        if let Some(index) = matched {
            let inventory_unit = outcome.inventory[index].unit.clone();
            match resolver
                .resolve(&purchased.unit, &inventory_unit, &item.name)
                .await
            {
                Some(rate) => {
                    outcome.inventory[index].pristine_quantity += purchased.amount * rate;
                    outcome.restocked += 1;
                }
                None => {
                    warn!("Cannot convert {} from {} to {}", item.name, purchased.unit, inventory_unit);
                    outcome.fail(
                        position,
                        ReconciliationError::ConversionFailed {
                            name: item.name.clone(),
                            from: purchased.unit.clone(),
                            to: inventory_unit,
                        },
                    );
                }
            }
            continue;
        }

        if item.is_manual {
            outcome.inventory.push(
                InventoryItem::new(
                    generate_id("inv"),
                    item.name.clone(),
                    round_stock(purchased.amount),
                    purchased.unit.clone(),
                )
                .with_purchase(purchased.unit.clone(), purchased.amount),
            );
            outcome.created += 1;
            continue;
        }

        let Some(needed) = parse_quantity(&item.shortfall_quantity) else {
            outcome.fail(
                position,
                ReconciliationError::ShortfallUnparsable {
                    name: item.name.clone(),
                },
            );
            continue;
        };

        let Some(rate) = resolver
            .resolve(&purchased.unit, &needed.unit, &item.name)
            .await
        else {
            outcome.fail(
                position,
                ReconciliationError::SurplusConversionFailed {
                    name: item.name.clone(),
                    from: purchased.unit.clone(),
                    to: needed.unit.clone(),
                },
            );
            continue;
        };

        let surplus = purchased.amount * rate - needed.amount;
        if surplus > SATISFIED_EPSILON {
            outcome.inventory.push(
                InventoryItem::new(
                    generate_id("inv"),
                    item.name.clone(),
                    round_stock(surplus),
                    needed.unit.clone(),
                )
                .with_purchase(needed.unit.clone(), surplus),
            );
            outcome.created += 1;
        }
    }

    outcome.inventory.sort_by(|a, b| a.name.cmp(&b.name));
    info!(
        "Restock: {} updated, {} created, {} failed",
        outcome.restocked,
        outcome.created,
        outcome.errors.len()
    );
    outcome
}
