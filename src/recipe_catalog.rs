//! # Recipe Catalog Module
//!
//! Owns the household's recipes: lookup by id, edits, tags, favorites, and
//! the synonym-aware recipe search.

use crate::household_model::{Recipe, RecipeUpdate};
use crate::synonyms::search_keywords;
use serde::{Deserialize, Serialize};

/// Filters for [`RecipeCatalog::search`]
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Free-text term matched against recipe and ingredient names
    pub term: String,
    /// Only recipes of this category
    pub category: Option<String>,
    /// Recipes must carry every one of these tags
    pub tags: Vec<String>,
    pub favorites_only: bool,
}

impl RecipeFilter {
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }
}

/// The recipe collection, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Recipe> {
        self.recipes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Add a recipe at the front of the catalog
    pub fn add(&mut self, recipe: Recipe) {
        self.recipes.insert(0, recipe);
    }

    /// Apply a partial update; `false` if no recipe has this id
    pub fn update(&mut self, id: &str, update: RecipeUpdate) -> bool {
        let Some(recipe) = self.get_mut(id) else {
            return false;
        };

        if let Some(name) = update.name {
            recipe.name = name;
        }
        if let Some(category) = update.category {
            recipe.category = category;
        }
        if let Some(cooking_time) = update.cooking_time {
            recipe.cooking_time = cooking_time;
        }
        if let Some(tags) = update.tags {
            recipe.tags = tags;
        }
        if let Some(ingredients) = update.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = update.instructions {
            recipe.instructions = instructions;
        }
        if let Some(link_url) = update.link_url {
            recipe.link_url = link_url;
        }
        if let Some(memo) = update.memo {
            recipe.memo = memo;
        }
        if let Some(image_url) = update.image_url {
            recipe.image_url = Some(image_url);
        }
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<Recipe> {
        let index = self.recipes.iter().position(|r| r.id == id)?;
        Some(self.recipes.remove(index))
    }

    /// Flip the favorite flag, returning the new value
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let recipe = self.get_mut(id)?;
        recipe.is_favorite = !recipe.is_favorite;
        Some(recipe.is_favorite)
    }

    /// Sorted, de-duplicated tags used by recipes
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.recipes.iter().flat_map(|r| r.tags.clone()).collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Rename a tag on every recipe, without creating duplicates
    pub fn rename_tag(&mut self, old: &str, new: &str) {
        for recipe in &mut self.recipes {
            if !recipe.has_tag(old) {
                continue;
            }
            let already_tagged = recipe.has_tag(new);
            recipe.tags.retain(|t| t != old || !already_tagged);
            for tag in recipe.tags.iter_mut().filter(|t| *t == old) {
                *tag = new.to_string();
            }
        }
    }

    pub fn delete_tag(&mut self, tag: &str) {
        for recipe in &mut self.recipes {
            recipe.tags.retain(|t| t != tag);
        }
    }

    /// Sorted distinct categories
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.recipes.iter().map(|r| r.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Recipes passing every filter, in catalog order
    ///
    /// The term matches case-insensitively as a substring of the recipe name or
    /// of any ingredient name, in either kana script or as any synonym.
    ///
    /// ```rust
    /// use kondate::household_model::{NewRecipe, Recipe, RecipeIngredient};
    /// use kondate::recipe_catalog::{RecipeCatalog, RecipeFilter};
    ///
    /// let recipe = Recipe::from_new("recipe-1", NewRecipe {
    ///     name: "豚の生姜焼き".into(),
    ///     category: "炒め物".into(),
    ///     ingredients: vec![RecipeIngredient::new("豚ロース肉", "200g")],
    ///     ..NewRecipe::default()
    /// });
    /// let catalog = RecipeCatalog::new(vec![recipe]);
    ///
    /// assert_eq!(catalog.search(&RecipeFilter::term("ポーク")).len(), 1);
    /// assert!(catalog.search(&RecipeFilter::term("鮭")).is_empty());
    /// ```
    pub fn search(&self, filter: &RecipeFilter) -> Vec<&Recipe> {
        let keywords = search_keywords(&filter.term);

        self.recipes
            .iter()
            .filter(|recipe| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |category| recipe.category == category)
            })
            .filter(|recipe| filter.tags.iter().all(|tag| recipe.has_tag(tag)))
            .filter(|recipe| !filter.favorites_only || recipe.is_favorite)
            .filter(|recipe| {
                if keywords.is_empty() {
                    return true;
                }
                let name = recipe.name.to_lowercase();
                let ingredients: Vec<String> = recipe
                    .ingredients
                    .iter()
                    .map(|i| i.name.to_lowercase())
                    .collect();
                keywords.iter().any(|keyword| {
                    name.contains(keyword.as_str())
                        || ingredients.iter().any(|i| i.contains(keyword.as_str()))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household_model::{NewRecipe, RecipeIngredient};

    fn recipe(id: &str, name: &str, category: &str, tags: &[&str], ingredients: &[&str]) -> Recipe {
        Recipe::from_new(
            id,
            NewRecipe {
                name: name.into(),
                category: category.into(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ingredients: ingredients
                    .iter()
                    .map(|n| RecipeIngredient::new(*n, "1個"))
                    .collect(),
                ..NewRecipe::default()
            },
        )
    }

    fn catalog() -> RecipeCatalog {
        RecipeCatalog::new(vec![
            recipe("r1", "肉じゃが", "煮物", &["和食", "定番"], &["牛肉", "じゃがいも"]),
            recipe("r2", "ポテトサラダ", "サラダ", &["洋食"], &["ジャガイモ", "マヨネーズ"]),
            recipe("r3", "味噌汁", "汁物", &["和食"], &["豆腐", "味噌"]),
        ])
    }

    #[test]
    fn test_search_by_synonym_and_script() {
        let catalog = catalog();
        let hits: Vec<&str> = catalog
            .search(&RecipeFilter::term("ぽてと"))
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(hits, vec!["r1", "r2"]);
    }

    #[test]
    fn test_search_filters_combine() {
        let mut catalog = catalog();
        catalog.toggle_favorite("r3");

        let filter = RecipeFilter {
            tags: vec!["和食".into()],
            favorites_only: true,
            ..RecipeFilter::default()
        };
        let hits = catalog.search(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "r3");

        let filter = RecipeFilter {
            category: Some("煮物".into()),
            ..RecipeFilter::default()
        };
        assert_eq!(catalog.search(&filter).len(), 1);
    }

    #[test]
    fn test_rename_tag_merges_duplicates() {
        let mut catalog = catalog();
        catalog.get_mut("r1").unwrap().tags.push("Japanese".into());
        catalog.rename_tag("Japanese", "和食");
        assert_eq!(catalog.get("r1").unwrap().tags, vec!["和食", "定番"]);

        catalog.rename_tag("定番", "いつもの");
        assert!(catalog.get("r1").unwrap().has_tag("いつもの"));
    }

    #[test]
    fn test_delete_tag_and_tags_listing() {
        let mut catalog = catalog();
        assert_eq!(catalog.tags(), vec!["和食", "定番", "洋食"]);
        catalog.delete_tag("和食");
        assert_eq!(catalog.tags(), vec!["定番", "洋食"]);
    }

    #[test]
    fn test_update_and_remove() {
        let mut catalog = catalog();
        let update = RecipeUpdate {
            memo: Some("メークインを使う".into()),
            cooking_time: Some(40),
            ..RecipeUpdate::default()
        };
        assert!(catalog.update("r1", update));
        assert_eq!(catalog.get("r1").unwrap().cooking_time, 40);
        assert!(!catalog.update("missing", RecipeUpdate::default()));

        assert!(catalog.remove("r2").is_some());
        assert_eq!(catalog.len(), 2);
        assert!(catalog.remove("r2").is_none());
    }
}
