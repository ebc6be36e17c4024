use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use kondate::ai::{CompletionProvider, GeminiProvider, InlineImage};
use kondate::ai_config::AiConfig;
use kondate::errors::{AiError, HouseholdError};
use kondate::household::Household;
use kondate::household_model::{InventoryItem, Weekday};
use kondate::localization::{Language, LocalizationManager};
use kondate::quantity_parser::format_amount;
use kondate::recipe_catalog::RecipeFilter;
use kondate::store::{load_state, save_state};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Meal planning with pantry-aware shopping lists
#[derive(Parser, Debug)]
#[command(name = "kondate", version, about)]
struct Cli {
    /// Household state file
    #[arg(long, env = "KONDATE_DATA_FILE", default_value = "kondate.json")]
    data: PathBuf,

    /// Message language (ja or en)
    #[arg(long, env = "KONDATE_LANG", default_value = "ja")]
    lang: Language,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shopping list of a week
    ShoppingList {
        /// Week index; defaults to the current week
        #[arg(long)]
        week: Option<usize>,
    },
    /// Toggle a shopping-list item by its list number
    Check { index: usize },
    /// Change the purchased quantity of a shopping-list item
    SetQuantity { index: usize, quantity: String },
    /// Add an item by hand and re-sort the list
    Buy { name: String, quantity: String },
    /// Add checked items to stock
    Restock,
    /// Show or edit stock as seen from a week
    Stock {
        #[arg(long)]
        week: Option<usize>,
        #[command(subcommand)]
        action: Option<StockAction>,
    },
    /// Edit or show a week's meal plan
    Plan {
        #[arg(long)]
        week: Option<usize>,
        #[command(subcommand)]
        action: Option<PlanAction>,
    },
    /// Append the week after the last one
    NextWeek,
    /// Search recipes by name or ingredient
    Search { term: String },
    /// Read a recipe from photos and add it
    ImportRecipe {
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Suggest quantity spellings for an ingredient
    SuggestUnits { ingredient: String, number: String },
}

#[derive(Subcommand, Debug)]
enum PlanAction {
    Add { day: Weekday, entry: String },
    Remove { day: Weekday, index: usize },
    Swap { first: Weekday, second: Weekday },
    Clear,
    /// Fill the empty days
    Generate {
        #[arg(long)]
        request: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum StockAction {
    /// Add a new stock row
    Add {
        name: String,
        quantity: f64,
        unit: String,
        #[arg(long)]
        category: Option<String>,
        /// Low-stock warning level
        #[arg(long, default_value_t = 0.0)]
        threshold: f64,
    },
    /// Set the amount shown for the week
    Set { id: String, quantity: f64 },
    /// Change the amount shown for the week by a step, not below zero
    Step {
        id: String,
        #[arg(allow_hyphen_values = true)]
        step: f64,
    },
}

impl Command {
    fn mutates(&self) -> bool {
        match self {
            Command::Search { .. } | Command::SuggestUnits { .. } => false,
            Command::Stock { action, .. } => action.is_some(),
            Command::Plan { action, .. } => action.is_some(),
            _ => true,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "kondate=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("KONDATE_LOG_FORMAT").is_ok_and(|format| format == "json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let localization = LocalizationManager::new(cli.lang)?;

    let state = load_state(&cli.data)?;
    let config = AiConfig::from_env();
    let provider: Arc<dyn CompletionProvider> =
        Arc::new(GeminiProvider::new(config.clone()).map_err(|err| anyhow!(localization.describe_ai_error(&err)))?);
    let mut household = Household::new(state, provider, config);

    let day = household.start_day(Local::now().date_naive());
    info!(
        current = day.current,
        counted = day.counted,
        weeks_changed = day.weeks_changed,
        "Household loaded"
    );

    let mutates = cli.command.mutates() || day.changed();
    run(&mut household, &localization, cli.command, day.current)
        .await
        .map_err(|err| anyhow!(localization.describe_household_error(&err)))?;

    if mutates {
        save_state(&cli.data, household.state())?;
    }
    Ok(())
}

async fn run(
    household: &mut Household,
    l10n: &LocalizationManager,
    command: Command,
    current: usize,
) -> Result<(), HouseholdError> {
    match command {
        Command::ShoppingList { week } => {
            let week = week.unwrap_or(current);
            household.generate_shopping_list(week).await?;
            print_shopping_list(household, l10n, week)?;
        }
        Command::Check { index } => {
            let key = if household.toggle_shopping_item(index)? {
                "shopping-item-checked"
            } else {
                "shopping-item-unchecked"
            };
            let name = household.state().shopping_list[index].name.clone();
            println!("{}", l10n.get_message_with_args(key, &[("name", name.as_str())]));
        }
        Command::SetQuantity { index, quantity } => {
            household.update_shopping_item_quantity(index, &quantity)?;
            print_shopping_list(household, l10n, current)?;
        }
        Command::Buy { name, quantity } => {
            household.add_manual_shopping_item(&name, &quantity).await?;
            print_shopping_list(household, l10n, current)?;
        }
        Command::Restock => {
            let summary = household.restock_purchased_items().await;
            if summary.restocked + summary.created == 0 && summary.errors.is_empty() {
                println!("{}", l10n.t("restock-nothing"));
            } else {
                let restocked = summary.restocked.to_string();
                let created = summary.created.to_string();
                println!(
                    "{}",
                    l10n.get_message_with_args(
                        "restock-done",
                        &[("restocked", restocked.as_str()), ("created", created.as_str())],
                    )
                );
            }
            if !summary.errors.is_empty() {
                println!("{}", l10n.t("restock-errors-header"));
                for error in &summary.errors {
                    println!("  {}", l10n.describe_reconciliation_error(error));
                }
            }
        }
        Command::Stock { week, action } => {
            let week = week.unwrap_or(current);
            if let Some(action) = action {
                run_stock_action(household, l10n, week, action)?;
            }
            let start = household.week(week)?.start_date.to_string();
            println!("{}", l10n.get_message_with_args("stock-title", &[("start", start.as_str())]));
            let low_mark = l10n.t("stock-low");
            for item in household.displayed_inventory(week) {
                if item.is_low(item.pristine_quantity) {
                    println!("  {}  {item} ({low_mark})", item.id);
                } else {
                    println!("  {}  {item}", item.id);
                }
            }
        }
        Command::Plan { week, action } => {
            let week = week.unwrap_or(current);
            if let Some(action) = action {
                match action {
                    PlanAction::Add { day, entry } => household.add_meal_plan_item(week, day, entry)?,
                    PlanAction::Remove { day, index } => {
                        household.remove_meal_plan_item(week, day, index)?;
                    }
                    PlanAction::Swap { first, second } => household.swap_meal_plan_days(week, first, second)?,
                    PlanAction::Clear => household.clear_meal_plan(week)?,
                    PlanAction::Generate { request } => {
                        household.generate_meal_plan(week, request.as_deref()).await?
                    }
                }
                println!("{}", l10n.t("plan-updated"));
            }
            print_plan(household, l10n, week)?;
        }
        Command::NextWeek => {
            let week = household.add_next_week();
            let start = household.week(week)?.start_date.to_string();
            println!("{}", l10n.get_message_with_args("week-added", &[("start", start.as_str())]));
        }
        Command::Search { term } => {
            let hits = household.search_recipes(&RecipeFilter::term(term));
            if hits.is_empty() {
                println!("{}", l10n.t("search-none"));
            }
            for recipe in hits {
                println!("{}  {} [{}]", recipe.id, recipe.name, recipe.category);
            }
        }
        Command::ImportRecipe { images } => {
            let images = read_images(&images)
                .map_err(|err| AiError::InvalidRequest(format!("{err:#}")))?;
            let id = household.add_recipe_from_images(images).await?;
            let name = household
                .state()
                .recipes
                .get(&id)
                .map(|r| r.name.clone())
                .unwrap_or(id);
            println!("{}", l10n.get_message_with_args("recipe-imported", &[("name", name.as_str())]));
        }
        Command::SuggestUnits { ingredient, number } => {
            let suggestions = household.suggest_units(&ingredient, &number).await;
            if suggestions.is_empty() {
                println!("{}", l10n.t("suggestions-none"));
            }
            for suggestion in suggestions {
                println!("  {suggestion}");
            }
        }
    }
    Ok(())
}

fn run_stock_action(
    household: &mut Household,
    l10n: &LocalizationManager,
    week: usize,
    action: StockAction,
) -> Result<(), HouseholdError> {
    let id = match action {
        StockAction::Add {
            name,
            quantity,
            unit,
            category,
            threshold,
        } => {
            let mut item = InventoryItem::new("", name.trim(), quantity, unit.trim()).with_threshold(threshold);
            if let Some(category) = category {
                item = item.with_category(category);
            }
            let id = household.add_inventory_item(item)?;
            println!(
                "{}",
                l10n.get_message_with_args("stock-added", &[("name", name.trim()), ("id", id.as_str())])
            );
            return Ok(());
        }
        StockAction::Set { id, quantity } => {
            household.adjust_displayed_stock(week, &id, quantity)?;
            id
        }
        StockAction::Step { id, step } => {
            household.step_displayed_stock(week, &id, step)?;
            id
        }
    };

    if let Some(item) = household.displayed_inventory(week).into_iter().find(|item| item.id == id) {
        let quantity = format!("{}{}", format_amount(item.pristine_quantity), item.unit);
        println!(
            "{}",
            l10n.get_message_with_args(
                "stock-updated",
                &[("name", item.name.as_str()), ("quantity", quantity.as_str())],
            )
        );
    }
    Ok(())
}

fn read_images(paths: &[PathBuf]) -> Result<Vec<InlineImage>> {
    paths
        .iter()
        .map(|path| {
            let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
            Ok(InlineImage::new(InlineImage::mime_for_extension(extension), data))
        })
        .collect()
}

fn print_shopping_list(household: &Household, l10n: &LocalizationManager, week: usize) -> Result<(), HouseholdError> {
    let start = household.week(week)?.start_date.to_string();
    println!(
        "{}",
        l10n.get_message_with_args("shopping-list-title", &[("start", start.as_str())])
    );

    let list = &household.state().shopping_list;
    if list.is_empty() {
        println!("{}", l10n.t("shopping-list-empty"));
    }
    for (index, item) in list.iter().enumerate() {
        println!("  {index:>2} {item}");
    }
    Ok(())
}

fn print_plan(household: &Household, l10n: &LocalizationManager, week: usize) -> Result<(), HouseholdError> {
    let plan = household.week(week)?;
    let start = plan.start_date.to_string();
    println!("{}", l10n.get_message_with_args("plan-title", &[("start", start.as_str())]));

    let empty = l10n.t("plan-day-empty");
    for day in Weekday::ALL {
        let label = match l10n.language() {
            Language::Japanese => day.label_ja(),
            Language::English => day.key(),
        };
        let entries: Vec<&str> = plan
            .plan
            .get(&day)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| {
                        household
                            .state()
                            .recipes
                            .get(entry)
                            .map_or(entry.as_str(), |recipe| recipe.name.as_str())
                    })
                    .collect()
            })
            .unwrap_or_default();

        if entries.is_empty() {
            println!("  {label}: {empty}");
        } else {
            println!("  {label}: {}", entries.join(", "));
        }
    }
    Ok(())
}
