//! # Kondate
//!
//! Household meal planning with ingredient-quantity reconciliation: recipe
//! demand for a week is netted against pantry stock to produce a shopping
//! list, and purchased items are folded back into the pantry. A generative
//! text service reads recipes from photos, fills meal plans, estimates unit
//! conversion rates and sorts shopping lists by store section.

pub mod ai;
pub mod ai_config;
pub mod circuit_breaker;
pub mod conversion;
pub mod demand;
pub mod errors;
pub mod household;
pub mod household_model;
pub mod ledger;
pub mod localization;
pub mod quantity_parser;
pub mod quantity_patterns;
pub mod recipe_catalog;
pub mod reconciliation;
pub mod seed_data;
pub mod shortfall;
pub mod store;
pub mod synonyms;
pub mod unit_normalizer;
