//! Recipe store and recipe suggestions.
//!
//! A [`CookBook`] holds recipes keyed by name. [`CookBook::suggest`] runs the
//! feasibility check of every recipe against an [`Inventory`] and keeps the
//! ones that can be made with what is on hand.

mod feasibility;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::inventory::Inventory;
use crate::model::Recipe;

pub use feasibility::{check, Feasibility, Shortfall, Suggestion};

/// A named collection of recipes.
#[derive(Debug, Clone, PartialEq)]
pub struct CookBook {
    name: String,
    recipes: BTreeMap<String, Recipe>,
}

impl CookBook {
    /// Create an empty cookbook.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recipes: BTreeMap::new(),
        }
    }

    /// The cookbook's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a recipe, returning the one it replaced.
    pub fn add(&mut self, recipe: Recipe) -> Option<Recipe> {
        let replaced = self.recipes.insert(recipe.name.clone(), recipe);
        if let Some(old) = &replaced {
            info!(recipe = %old.name, "Replaced recipe");
        }
        replaced
    }

    /// Get a recipe by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(name.trim())
    }

    /// Get a recipe by exact name, or fail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecipeNotFound`] if no recipe carries the name.
    pub fn require(&self, name: &str) -> Result<&Recipe> {
        self.get(name).ok_or_else(|| Error::recipe_not_found(name.trim()))
    }

    /// Check if a recipe with this exact name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name.trim())
    }

    /// Remove a recipe by exact name.
    pub fn remove(&mut self, name: &str) -> Option<Recipe> {
        self.recipes.remove(name.trim())
    }

    /// All recipes in name order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    /// Number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if the cookbook holds no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes that can be made from `inventory`, in name order.
    #[must_use]
    pub fn suggest(&self, inventory: &Inventory) -> Vec<Suggestion> {
        let suggestions: Vec<Suggestion> = self
            .recipes()
            .filter_map(|recipe| {
                let result = check(recipe, inventory);
                if result.is_feasible() {
                    Some(Suggestion {
                        recipe: recipe.name.clone(),
                        total_price: result.total_price,
                        servings: recipe.servings,
                    })
                } else {
                    debug!(
                        recipe = %recipe.name,
                        shortfalls = result.shortfalls.len(),
                        "Recipe not feasible"
                    );
                    None
                }
            })
            .collect();
        debug!(
            checked = self.len(),
            feasible = suggestions.len(),
            "Suggested recipes"
        );
        suggestions
    }
}

impl Extend<Recipe> for CookBook {
    fn extend<I: IntoIterator<Item = Recipe>>(&mut self, iter: I) {
        for recipe in iter {
            self.add(recipe);
        }
    }
}
