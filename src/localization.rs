//! # Localization Module
//!
//! User-facing messages rendered from Fluent resources embedded at compile
//! time. Japanese is the default; English is also bundled. `Display` output
//! of the error types stays English and is meant for logs.

use crate::errors::{AiError, HouseholdError, ReconciliationError};
use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

const JA_RESOURCE: &str = include_str!("../locales/ja/main.ftl");
const EN_RESOURCE: &str = include_str!("../locales/en/main.ftl");

/// Supported message languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Japanese,
    English,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::English => "en",
        }
    }

    fn resource(self) -> &'static str {
        match self {
            Language::Japanese => JA_RESOURCE,
            Language::English => EN_RESOURCE,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ja" | "ja-jp" | "japanese" => Ok(Language::Japanese),
            "en" | "en-us" | "en-gb" | "english" => Ok(Language::English),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// Localization manager holding one bundle per language
pub struct LocalizationManager {
    bundles: HashMap<Language, FluentBundle<FluentResource>>,
    language: Language,
}

impl fmt::Debug for LocalizationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizationManager")
            .field("language", &self.language)
            .finish()
    }
}

impl LocalizationManager {
    /// Create a manager rendering messages in `language`
    pub fn new(language: Language) -> Result<Self> {
        let mut bundles = HashMap::new();
        for lang in [Language::Japanese, Language::English] {
            bundles.insert(lang, Self::create_bundle(lang)?);
        }
        Ok(Self { bundles, language })
    }

    fn create_bundle(language: Language) -> Result<FluentBundle<FluentResource>> {
        let locale: LanguageIdentifier = language
            .code()
            .parse()
            .map_err(|err| anyhow!("invalid locale {language}: {err:?}"))?;
        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(language.resource().to_string())
            .map_err(|(_, errors)| anyhow!("invalid {language} resource: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("duplicate {language} messages: {errors:?}"))?;
        Ok(bundle)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Get a localized message in the configured language
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        self.get_message_in_language(key, self.language, args)
    }

    /// Get a localized message in `language`, falling back to Japanese
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: Language,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = self
            .bundles
            .get(&language)
            .filter(|bundle| bundle.has_message(key))
            .or_else(|| self.bundles.get(&Language::Japanese));
        let Some(bundle) = bundle else {
            return format!("Missing translation: {key}");
        };

        let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) else {
            return format!("Missing translation: {key}");
        };

        let fluent_args = args.map(|args| {
            args.iter()
                .map(|(k, v)| (*k, FluentValue::from(*v)))
                .collect::<FluentArgs>()
        });

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            log::debug!("Formatting {key} reported {errors:?}");
        }
        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(key, Some(&args_map))
    }

    pub fn t(&self, key: &str) -> String {
        self.get_message(key, None)
    }

    pub fn describe_reconciliation_error(&self, error: &ReconciliationError) -> String {
        match error {
            ReconciliationError::ConversionFailed { name, from, to } => self.get_message_with_args(
                "restock-error-conversion",
                &[("name", name.as_str()), ("from", from.as_str()), ("to", to.as_str())],
            ),
            ReconciliationError::ShortfallUnparsable { name } => {
                self.get_message_with_args("restock-error-shortfall-unparsable", &[("name", name.as_str())])
            }
            ReconciliationError::SurplusConversionFailed { name, from, to } => self
                .get_message_with_args(
                    "restock-error-surplus-conversion",
                    &[("name", name.as_str()), ("from", from.as_str()), ("to", to.as_str())],
                ),
        }
    }

    pub fn describe_household_error(&self, error: &HouseholdError) -> String {
        match error {
            HouseholdError::WeekOutOfRange(index) => self.get_message_with_args(
                "error-week-out-of-range",
                &[("index", index.to_string().as_str())],
            ),
            HouseholdError::PlanFull => self.t("error-plan-full"),
            HouseholdError::LastWeek => self.t("error-last-week"),
            HouseholdError::WeekNotFound(id) => {
                self.get_message_with_args("error-week-not-found", &[("id", id.as_str())])
            }
            HouseholdError::RecipeNotFound(id) => {
                self.get_message_with_args("error-recipe-not-found", &[("id", id.as_str())])
            }
            HouseholdError::InventoryItemNotFound(id) => {
                self.get_message_with_args("error-inventory-item-not-found", &[("id", id.as_str())])
            }
            HouseholdError::ShoppingItemNotFound(index) => self.get_message_with_args(
                "error-shopping-item-not-found",
                &[("index", index.to_string().as_str())],
            ),
            HouseholdError::InvalidQuantity(quantity) => self.get_message_with_args(
                "error-invalid-quantity",
                &[("quantity", quantity.to_string().as_str())],
            ),
            HouseholdError::Ai(err) => self.get_message_with_args(
                "error-ai-failed",
                &[("detail", self.describe_ai_error(err).as_str())],
            ),
        }
    }

    pub fn describe_ai_error(&self, error: &AiError) -> String {
        match error {
            AiError::Timeout(_) => self.t("ai-error-timeout"),
            AiError::Http { status, .. } => {
                self.get_message_with_args("ai-error-http", &[("status", status.to_string().as_str())])
            }
            AiError::Network(_) => self.t("ai-error-network"),
            AiError::EmptyResponse => self.t("ai-error-empty"),
            AiError::UnexpectedResponse(_) => self.t("ai-error-unexpected"),
            AiError::MalformedJson(_) => self.t("ai-error-malformed-json"),
            AiError::IncompleteRecipe(fields) => {
                let fields = fields
                    .iter()
                    .map(|field| self.t(&format!("field-{field}")))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.get_message_with_args("ai-error-incomplete-recipe", &[("fields", fields.as_str())])
            }
            AiError::InvalidRequest(detail) => {
                self.get_message_with_args("ai-error-invalid-request", &[("detail", detail.as_str())])
            }
            AiError::CircuitOpen => self.t("ai-error-circuit-open"),
            AiError::NotConfigured(detail) => {
                self.get_message_with_args("ai-error-not-configured", &[("detail", detail.as_str())])
            }
        }
    }
}
