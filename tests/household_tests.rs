//! # Household Tests
//!
//! End-to-end behavior of the household state: shopping-list generation
//! against the pantry ledger, restocking, plan edits and the all-or-nothing
//! commit of AI-backed operations.

use chrono::NaiveDate;
use kondate::ai::FakeProvider;
use kondate::ai_config::AiConfig;
use kondate::errors::{AiError, HouseholdError, ReconciliationError};
use kondate::household::{Household, HouseholdState};
use kondate::household_model::{
    ConsumedItem, InventoryItem, InventoryUpdate, NewRecipe, Recipe, RecipeIngredient, ShoppingListItem,
    Weekday, WeeklyMealPlan, FREQUENT_RECIPE_TAG,
};
use kondate::ledger::total_consumed;
use kondate::recipe_catalog::RecipeCatalog;
use std::sync::Arc;

const CATEGORIZE: &str = "並べ替えて";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 4).unwrap()
}

fn household_with(state: HouseholdState, provider: FakeProvider) -> (Household, Arc<FakeProvider>) {
    let provider = Arc::new(provider);
    let household = Household::new(state, provider.clone(), AiConfig::default());
    (household, provider)
}

/// Sample data with the current week planned with 豚の生姜焼き on Monday
fn planned_household(provider: FakeProvider) -> (Household, Arc<FakeProvider>) {
    let (mut household, provider) = household_with(HouseholdState::sample(), provider);
    let week = household.ensure_current_week(today());
    assert_eq!(week, 0);
    household.add_meal_plan_item(0, Weekday::Monday, "recipe-1").unwrap();
    (household, provider)
}

fn displayed(household: &Household, week: usize, name: &str) -> f64 {
    household
        .displayed_inventory(week)
        .into_iter()
        .find(|item| item.name == name)
        .map(|item| item.pristine_quantity)
        .unwrap()
}

#[tokio::test]
async fn test_shopping_list_nets_plan_against_stock() {
    let (mut household, provider) = planned_household(
        FakeProvider::with_response(CATEGORIZE, "## 肉\n- 豚ロース肉 200g\n## その他\n- 生姜 1かけ"),
    );

    household.generate_shopping_list(0).await.unwrap();

    let week = household.week(0).unwrap();
    assert!(week
        .consumed_items
        .contains(&ConsumedItem::new("inv-1", 30.0)));

    let list = &household.state().shopping_list;
    let names: Vec<&str> = list.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["豚ロース肉", "生姜"]);
    assert!(list.iter().all(|item| item.is_new_item && !item.checked));
    assert_eq!(list[0].shortfall_quantity, "200g");

    assert_eq!(displayed(&household, 0, "醤油"), 970.0);
    assert_eq!(displayed(&household, 0, "玉ねぎ"), 2.5);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_pristine_stock_is_untouched_by_claims() {
    let (mut household, _) = planned_household(FakeProvider::new().with_default_response(""));
    household.generate_shopping_list(0).await.unwrap();

    let soy = household
        .state()
        .inventory
        .iter()
        .find(|item| item.id == "inv-1")
        .unwrap();
    assert_eq!(soy.pristine_quantity, 1000.0);

    let claimed: f64 = household
        .state()
        .meal_plans
        .iter()
        .flat_map(|week| week.consumed_items.iter())
        .filter(|item| item.inventory_id == "inv-1")
        .map(|item| item.consumed_amount)
        .sum();
    assert_eq!(soy.pristine_quantity - claimed, displayed(&household, 0, "醤油"));
}

#[tokio::test]
async fn test_regenerating_the_list_is_idempotent() {
    let (mut household, _) = planned_household(FakeProvider::new().with_default_response(""));

    household.generate_shopping_list(0).await.unwrap();
    let first = household.state().clone();
    household.generate_shopping_list(0).await.unwrap();

    assert_eq!(household.state(), &first);
}

#[tokio::test]
async fn test_failed_categorization_commits_nothing() {
    let (mut household, _) = planned_household(FakeProvider::failing(AiError::Http {
        status: 503,
        body: "unavailable".into(),
    }));
    let before = household.state().clone();

    let result = household.generate_shopping_list(0).await;

    assert!(matches!(result, Err(HouseholdError::Ai(AiError::Http { status: 503, .. }))));
    assert_eq!(household.state(), &before);
    assert!(household.week(0).unwrap().consumed_items.is_empty());
}

#[tokio::test]
async fn test_empty_plan_clears_without_calling_the_collaborator() {
    let (mut household, provider) = household_with(HouseholdState::sample(), FakeProvider::new());
    household.ensure_current_week(today());

    household.generate_shopping_list(0).await.unwrap();

    assert!(household.state().shopping_list.is_empty());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_later_week_nets_against_earlier_claims() {
    let (mut household, _) = household_with(
        HouseholdState::sample(),
        FakeProvider::new().with_default_response(""),
    );
    household.ensure_current_week(today());
    let next = household.add_next_week();
    let after = household.add_next_week();
    for week in [0, next, after] {
        household.add_meal_plan_item(week, Weekday::Tuesday, "recipe-5").unwrap();
    }

    for week in [0, next, after] {
        household.generate_shopping_list(week).await.unwrap();
    }

    // 6 eggs cover the first two weeks; the third has to buy all 3
    assert!(household
        .week(next)
        .unwrap()
        .consumed_items
        .contains(&ConsumedItem::new("inv-8", 3.0)));
    let eggs = household
        .state()
        .shopping_list
        .iter()
        .find(|item| item.name == "卵")
        .unwrap();
    assert_eq!(eggs.quantity, "3個");
    assert!(!eggs.is_new_item);

    assert_eq!(displayed(&household, 0, "卵"), 3.0);
    assert_eq!(displayed(&household, next, "卵"), 0.0);
    assert!(household
        .low_stock_items(next)
        .iter()
        .any(|item| item.name == "卵"));
    assert!(!household
        .low_stock_items(0)
        .iter()
        .any(|item| item.name == "卵"));
}

#[tokio::test]
async fn test_plan_edit_drops_claims_and_list() {
    let (mut household, _) = planned_household(FakeProvider::new().with_default_response(""));
    household.generate_shopping_list(0).await.unwrap();
    assert!(!household.state().shopping_list.is_empty());

    household.swap_meal_plan_days(0, Weekday::Monday, Weekday::Friday).unwrap();

    let week = household.week(0).unwrap();
    assert!(week.consumed_items.is_empty());
    assert!(household.state().shopping_list.is_empty());
    assert_eq!(week.plan.get(&Weekday::Friday), Some(&vec!["recipe-1".to_string()]));
    assert!(!week.plan.contains_key(&Weekday::Monday));

    assert_eq!(household.remove_meal_plan_item(0, Weekday::Friday, 0).unwrap(), Some("recipe-1".into()));
    assert!(household.week(0).unwrap().is_empty());
    assert_eq!(household.remove_meal_plan_item(0, Weekday::Friday, 0).unwrap(), None);
    assert_eq!(
        household.add_meal_plan_item(9, Weekday::Monday, "recipe-1"),
        Err(HouseholdError::WeekOutOfRange(9))
    );
}

#[tokio::test]
async fn test_restock_adds_only_the_surplus_of_new_items() {
    let (mut household, _) = planned_household(FakeProvider::new().with_default_response(""));
    household.generate_shopping_list(0).await.unwrap();

    let pork = household
        .state()
        .shopping_list
        .iter()
        .position(|item| item.name == "豚ロース肉")
        .unwrap();
    household.update_shopping_item_quantity(pork, "300g").unwrap();
    assert_eq!(household.toggle_shopping_item(pork), Ok(true));

    let summary = household.restock_purchased_items().await;

    assert_eq!(summary.created, 1);
    assert!(summary.errors.is_empty());
    let pork = household
        .state()
        .inventory
        .iter()
        .find(|item| item.name == "豚ロース肉")
        .unwrap();
    assert_eq!(pork.pristine_quantity, 100.0);
    assert_eq!(pork.unit, "g");
    assert!(household
        .state()
        .shopping_list
        .iter()
        .all(|item| item.name != "豚ロース肉"));
    assert!(household
        .state()
        .inventory
        .windows(2)
        .all(|w| w[0].name <= w[1].name));
}

/// 人参 100g in stock and one recipe needing 人参 both by count and by weight
fn carrot_household() -> (Household, Arc<FakeProvider>) {
    let recipe = Recipe::from_new(
        "recipe-carrot",
        NewRecipe {
            name: "人参しりしり".into(),
            category: "副菜".into(),
            ingredients: vec![
                RecipeIngredient::new("人参", "1本"),
                RecipeIngredient::new("人参", "500g"),
            ],
            ..NewRecipe::default()
        },
    );
    let mut week = WeeklyMealPlan::new(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    week.add_entry(Weekday::Monday, "recipe-carrot");
    let state = HouseholdState {
        recipes: RecipeCatalog::new(vec![recipe]),
        meal_plans: vec![week],
        inventory: vec![InventoryItem::new("inv-carrot", "人参", 100.0, "g")],
        ..HouseholdState::default()
    };
    household_with(
        state,
        FakeProvider::with_response("換算", r#"{"rate": null}"#).with_default_response(""),
    )
}

fn pristine(household: &Household, id: &str) -> f64 {
    household
        .state()
        .inventory
        .iter()
        .find(|item| item.id == id)
        .map(|item| item.pristine_quantity)
        .unwrap()
}

fn assert_ledger_holds(household: &Household, week: usize, id: &str) {
    let claimed = total_consumed(&household.state().meal_plans[..=week], id);
    let shown = household
        .displayed_inventory(week)
        .into_iter()
        .find(|item| item.id == id)
        .map(|item| item.pristine_quantity)
        .unwrap();
    assert_eq!(shown, pristine(household, id) - claimed);
}

#[tokio::test]
async fn test_ledger_holds_across_restocks_of_same_name_items() {
    let (mut household, _) = carrot_household();

    household.generate_shopping_list(0).await.unwrap();
    let quantities: Vec<&str> = household
        .state()
        .shopping_list
        .iter()
        .map(|item| item.quantity.as_str())
        .collect();
    assert_eq!(quantities, vec!["1本", "400g"]);
    assert_eq!(pristine(&household, "inv-carrot"), 100.0);
    assert_ledger_holds(&household, 0, "inv-carrot");

    household.toggle_shopping_item(0).unwrap();
    household.toggle_shopping_item(1).unwrap();
    let summary = household.restock_purchased_items().await;

    assert_eq!((summary.restocked, summary.errors.len()), (1, 1));
    assert_eq!(pristine(&household, "inv-carrot"), 500.0);
    let list = &household.state().shopping_list;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].quantity, "1本");
    assert!(list[0].checked);
    assert_ledger_holds(&household, 0, "inv-carrot");

    // only the unconvertible item is still checked, so nothing is added twice
    let summary = household.restock_purchased_items().await;
    assert_eq!((summary.restocked, summary.errors.len()), (0, 1));
    assert_eq!(pristine(&household, "inv-carrot"), 500.0);
    assert_ledger_holds(&household, 0, "inv-carrot");

    household.generate_shopping_list(0).await.unwrap();
    assert_eq!(pristine(&household, "inv-carrot"), 500.0);
    assert_eq!(total_consumed(&household.state().meal_plans, "inv-carrot"), 500.0);
    assert_eq!(displayed(&household, 0, "人参"), 0.0);
    assert_ledger_holds(&household, 0, "inv-carrot");
    let list = &household.state().shopping_list;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].quantity, "1本");
}

#[tokio::test]
async fn test_same_name_items_are_edited_one_at_a_time() {
    let (mut household, _) = carrot_household();
    household.generate_shopping_list(0).await.unwrap();

    assert_eq!(household.toggle_shopping_item(1), Ok(true));
    household.update_shopping_item_quantity(1, " 500g ").unwrap();

    let list = &household.state().shopping_list;
    assert!(!list[0].checked);
    assert_eq!(list[0].quantity, "1本");
    assert_eq!(list[1].quantity, "500g");
    assert_eq!(household.toggle_shopping_item(5), Err(HouseholdError::ShoppingItemNotFound(5)));
    assert_eq!(
        household.update_shopping_item_quantity(5, "1本"),
        Err(HouseholdError::ShoppingItemNotFound(5))
    );
}

#[tokio::test]
async fn test_displayed_stock_edit_keeps_claims() {
    let (mut household, _) = planned_household(FakeProvider::new().with_default_response(""));
    let next = household.add_next_week();
    household.generate_shopping_list(0).await.unwrap();
    assert_eq!(displayed(&household, 0, "醤油"), 970.0);

    household.adjust_displayed_stock(0, "inv-1", 500.0).unwrap();

    assert_eq!(displayed(&household, 0, "醤油"), 500.0);
    assert_eq!(pristine(&household, "inv-1"), 530.0);
    assert!(household.week(0).unwrap().consumed_items.contains(&ConsumedItem::new("inv-1", 30.0)));
    assert_ledger_holds(&household, 0, "inv-1");
    assert_ledger_holds(&household, next, "inv-1");

    household.step_displayed_stock(0, "inv-1", -600.0).unwrap();
    assert_eq!(displayed(&household, 0, "醤油"), 0.0);
    assert_eq!(pristine(&household, "inv-1"), 30.0);

    assert_eq!(
        household.adjust_displayed_stock(0, "inv-1", -1.0),
        Err(HouseholdError::InvalidQuantity(-1.0))
    );
    assert_eq!(
        household.adjust_displayed_stock(0, "missing", 1.0),
        Err(HouseholdError::InventoryItemNotFound("missing".into()))
    );
    assert_eq!(
        household.adjust_displayed_stock(9, "inv-1", 1.0),
        Err(HouseholdError::WeekOutOfRange(9))
    );
    assert_eq!(pristine(&household, "inv-1"), 30.0);
}

#[tokio::test]
async fn test_restock_counted_units_surplus() {
    let mut state = HouseholdState::sample();
    let mut item = ShoppingListItem::from_shortfall(&kondate::household_model::ShortfallEntry {
        name: "ピーマン".into(),
        quantity: "2個".into(),
        is_new_item: true,
    });
    item.quantity = "3個".into();
    item.checked = true;
    state.shopping_list.push(item);
    let (mut household, _) = household_with(state, FakeProvider::new());

    let summary = household.restock_purchased_items().await;

    assert_eq!(summary.created, 1);
    let pepper = household
        .state()
        .inventory
        .iter()
        .find(|item| item.name == "ピーマン")
        .unwrap();
    assert_eq!((pepper.pristine_quantity, pepper.unit.as_str()), (1.0, "個"));
}

#[tokio::test]
async fn test_unconvertible_purchase_stays_on_the_list() {
    let mut state = HouseholdState::sample();
    state.inventory.push(InventoryItem::new("inv-carrot", "人参", 500.0, "g"));
    let mut carrots = ShoppingListItem::manual("にんじん", "2本");
    carrots.checked = true;
    let mut eggs = ShoppingListItem::manual("たまご", "10個");
    eggs.checked = true;
    state.shopping_list = vec![carrots, eggs];
    let (mut household, _) = household_with(
        state,
        FakeProvider::with_response("換算", r#"{"rate": null}"#),
    );

    let summary = household.restock_purchased_items().await;

    assert_eq!(summary.restocked, 1);
    assert_eq!(
        summary.errors,
        vec![ReconciliationError::ConversionFailed {
            name: "にんじん".into(),
            from: "本".into(),
            to: "g".into(),
        }]
    );
    let list = &household.state().shopping_list;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "にんじん");
    assert!(list[0].checked);

    let eggs = household.state().inventory.iter().find(|item| item.id == "inv-8").unwrap();
    assert_eq!(eggs.pristine_quantity, 16.0);
}

#[tokio::test]
async fn test_manual_item_is_kept_when_sorting_fails() {
    let (mut household, _) = household_with(
        HouseholdState::sample(),
        FakeProvider::failing(AiError::Network("offline".into())),
    );

    let result = household.add_manual_shopping_item(" 牛乳 ", "1本").await;

    assert!(matches!(result, Err(HouseholdError::Ai(AiError::Network(_)))));
    let list = &household.state().shopping_list;
    assert_eq!(list.len(), 1);
    assert!(list[0].is_manual);
    assert_eq!(list[0].name, "牛乳");
}

#[tokio::test]
async fn test_reorganize_follows_the_collaborator_order() {
    let mut state = HouseholdState::sample();
    state.shopping_list = vec![
        ShoppingListItem::manual("牛乳", "1本"),
        ShoppingListItem::manual("人参", "2本"),
    ];
    let (mut household, _) = household_with(
        state,
        FakeProvider::with_response(CATEGORIZE, "## 野菜・果物\n- 人参 2本\n## 乳製品・卵・大豆製品\n- 牛乳 1本"),
    );
    household.toggle_shopping_item(0).unwrap();

    household.reorganize_shopping_list().await.unwrap();

    let list = &household.state().shopping_list;
    assert_eq!(list[0].name, "人参");
    assert_eq!(list[1].name, "牛乳");
    assert!(list[1].checked);
}

#[tokio::test]
async fn test_generate_meal_plan_fills_empty_days_only() {
    let (mut household, provider) = planned_household(FakeProvider::with_response(
        "献立",
        r#"{"monday": ["recipe-3"], "tuesday": ["recipe-6"], "wednesday": ["外食"], "someday": ["recipe-2"]}"#,
    ));

    household.generate_meal_plan(0, Some("魚を多めに")).await.unwrap();

    let plan = &household.week(0).unwrap().plan;
    assert_eq!(plan[&Weekday::Monday], vec!["recipe-1"]);
    assert_eq!(plan[&Weekday::Tuesday], vec!["recipe-6"]);
    assert_eq!(plan[&Weekday::Wednesday], vec!["外食"]);
    assert_eq!(plan.len(), 3);
    assert!(provider.prompts()[0].contains("魚を多めに"));
}

#[tokio::test]
async fn test_full_plan_is_rejected_without_a_call() {
    let (mut household, provider) = planned_household(FakeProvider::new());
    for day in Weekday::ALL {
        household.add_meal_plan_item(0, day, "外食").unwrap();
    }

    let result = household.generate_meal_plan(0, None).await;

    assert_eq!(result, Err(HouseholdError::PlanFull));
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn test_weeks_are_trimmed_and_current_week_added() {
    let mut state = HouseholdState::sample();
    let first = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    state.meal_plans = (0..8)
        .map(|i| WeeklyMealPlan::new(first + chrono::Duration::weeks(i)))
        .collect();
    let (mut household, _) = household_with(state, FakeProvider::new());

    let current = household.ensure_current_week(today());

    let weeks = &household.state().meal_plans;
    assert_eq!(weeks.len(), 7);
    assert_eq!(weeks[0].start_date, NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
    assert_eq!(weeks[current].start_date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    assert_eq!(household.ensure_current_week(today()), current);
}

#[test]
fn test_day_start_reports_week_changes() {
    let (mut household, _) = household_with(HouseholdState::sample(), FakeProvider::new());

    let first = household.start_day(today());
    assert!(first.weeks_changed);
    assert!(first.changed());

    let again = household.start_day(today());
    assert_eq!(again.current, first.current);
    assert!(!again.changed());

    let mut state = household.into_state();
    let mut past = WeeklyMealPlan::new(NaiveDate::from_ymd_opt(2025, 5, 26).unwrap());
    past.add_entry(Weekday::Monday, "recipe-4");
    state.meal_plans.insert(0, past);
    let (mut household, _) = household_with(state, FakeProvider::new());

    let day = household.start_day(today());
    assert_eq!((day.current, day.weeks_changed, day.counted), (1, false, 1));
    assert!(day.changed());
}

#[test]
fn test_rollover_counts_each_past_week_once() {
    let mut state = HouseholdState::sample();
    let mut past = WeeklyMealPlan::new(NaiveDate::from_ymd_opt(2025, 5, 26).unwrap());
    past.add_entry(Weekday::Monday, "recipe-4");
    past.add_entry(Weekday::Thursday, "recipe-4");
    past.add_entry(Weekday::Friday, "外食");
    state.meal_plans.push(past);
    let (mut household, _) = household_with(state, FakeProvider::new());
    household.ensure_current_week(today());
    household.add_meal_plan_item(1, Weekday::Monday, "recipe-4").unwrap();

    assert_eq!(household.roll_over_past_weeks(today()), 1);
    assert_eq!(household.roll_over_past_weeks(today()), 0);

    let kinpira = household.state().recipes.get("recipe-4").unwrap();
    assert_eq!(kinpira.times_cooked, 10);
    assert!(kinpira.has_tag(FREQUENT_RECIPE_TAG));
    assert!(household.week(0).unwrap().is_counted);
    assert!(!household.week(1).unwrap().is_counted);
}

#[test]
fn test_last_week_cannot_be_deleted() {
    let (mut household, _) = household_with(HouseholdState::sample(), FakeProvider::new());
    household.ensure_current_week(today());
    let id = household.week(0).unwrap().id.clone();

    assert_eq!(household.delete_week(&id), Err(HouseholdError::LastWeek));

    household.add_next_week();
    assert_eq!(
        household.delete_week("week-1999-01-04"),
        Err(HouseholdError::WeekNotFound("week-1999-01-04".into()))
    );
    assert!(household.delete_week(&id).is_ok());
    assert_eq!(household.state().meal_plans.len(), 1);
}

#[tokio::test]
async fn test_deleting_a_recipe_unplans_it() {
    let (mut household, _) = planned_household(FakeProvider::new().with_default_response(""));
    household.add_meal_plan_item(0, Weekday::Monday, "外食").unwrap();
    household.generate_shopping_list(0).await.unwrap();

    household.delete_recipe("recipe-1").unwrap();

    let week = household.week(0).unwrap();
    assert_eq!(week.plan[&Weekday::Monday], vec!["外食"]);
    assert!(week.consumed_items.is_empty());
    assert!(household.state().shopping_list.is_empty());
    assert!(household.state().recipes.get("recipe-1").is_none());
    assert_eq!(
        household.delete_recipe("recipe-1").map(|_| ()),
        Err(HouseholdError::RecipeNotFound("recipe-1".into()))
    );
}

#[test]
fn test_tags_union_and_rename() {
    let (mut household, _) = household_with(HouseholdState::sample(), FakeProvider::new());
    household.add_tag("作り置き");
    household.add_tag("作り置き");
    household.rename_tag("お弁当", "弁当");

    let tags = household.all_tags();
    assert!(tags.contains(&"作り置き".to_string()));
    assert!(tags.contains(&"弁当".to_string()));
    assert!(!tags.contains(&"お弁当".to_string()));
    assert_eq!(tags.iter().filter(|t| *t == "作り置き").count(), 1);

    household.delete_tag("作り置き");
    assert!(!household.all_tags().contains(&"作り置き".to_string()));
}

#[test]
fn test_inventory_edits() {
    let (mut household, _) = household_with(HouseholdState::sample(), FakeProvider::new());
    let id = household
        .add_inventory_item(InventoryItem::new("", "バター", 200.0, "g"))
        .unwrap();

    assert!(id.starts_with("inv-"));
    assert!(household
        .state()
        .inventory
        .windows(2)
        .all(|w| w[0].name <= w[1].name));

    household
        .update_inventory_item(
            &id,
            InventoryUpdate {
                quantity: Some(150.12345),
                ..Default::default()
            },
        )
        .unwrap();
    let butter = household.state().inventory.iter().find(|i| i.id == id).unwrap();
    assert_eq!(butter.pristine_quantity, 150.123);

    assert_eq!(
        household.update_inventory_item("missing", Default::default()),
        Err(HouseholdError::InventoryItemNotFound("missing".into()))
    );

    let rejected = household.update_inventory_item(
        &id,
        InventoryUpdate {
            name: Some("無塩バター".into()),
            quantity: Some(-5.0),
            ..Default::default()
        },
    );
    assert_eq!(rejected, Err(HouseholdError::InvalidQuantity(-5.0)));
    let butter = household.state().inventory.iter().find(|i| i.id == id).unwrap();
    assert_eq!((butter.name.as_str(), butter.pristine_quantity), ("バター", 150.123));
    assert_eq!(
        household.add_inventory_item(InventoryItem::new("", "牛乳", -1.0, "ml")),
        Err(HouseholdError::InvalidQuantity(-1.0))
    );
}
