//! Store operations backed by the data files.
//!
//! [`Pantry`] holds no state of its own besides the file locations: every
//! operation reads the current files, so changes made by another invocation
//! are always visible.

use chrono::NaiveDate;
use tracing::info;

use crate::config::Config;
use crate::cookbook::{check, CookBook, Feasibility, Suggestion};
use crate::error::{Error, Result};
use crate::inventory::Inventory;
use crate::model::{Ingredient, Recipe};
use crate::store::{self, DataFiles};

/// File-backed inventory and cookbook.
#[derive(Debug, Clone)]
pub struct Pantry {
    files: DataFiles,
    cookbook_name: String,
}

impl Pantry {
    /// Create a pantry over the given data files.
    #[must_use]
    pub fn new(files: DataFiles, cookbook_name: impl Into<String>) -> Self {
        Self {
            files,
            cookbook_name: cookbook_name.into(),
        }
    }

    /// Create a pantry from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_files(), config.cookbook.name.clone())
    }

    /// The data file locations.
    #[must_use]
    pub fn files(&self) -> &DataFiles {
        &self.files
    }

    /// Read the current inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the ingredient file cannot be read.
    pub fn inventory(&self) -> Result<Inventory> {
        store::load_inventory(&self.files.ingredients)
    }

    /// Read the current cookbook.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe file cannot be read.
    pub fn cookbook(&self) -> Result<CookBook> {
        store::load_cookbook(&self.files.recipes, &self.cookbook_name)
    }

    /// Stock a new lot.
    ///
    /// # Errors
    ///
    /// Returns an error if the ingredient file cannot be written.
    pub fn add_ingredient(&self, ingredient: &Ingredient) -> Result<()> {
        store::append_ingredient(&self.files.ingredients, ingredient)?;
        info!(
            name = %ingredient.name,
            quantity = ingredient.quantity,
            unit = %ingredient.unit,
            "Stocked ingredient"
        );
        Ok(())
    }

    /// Remove stock by name; `units == 0` removes every lot of it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IngredientNotFound`] for an unknown name, or an error
    /// if the ingredient file cannot be read or written.
    pub fn remove_ingredient(&self, name: &str, units: u32) -> Result<u64> {
        let mut inventory = self.inventory()?;
        let removed = inventory.remove(name, units)?;
        store::save_inventory(&self.files.ingredients, &inventory)?;
        Ok(removed)
    }

    /// Lots that expired before `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ingredient file cannot be read.
    pub fn expired(&self, today: NaiveDate) -> Result<Vec<Ingredient>> {
        let inventory = self.inventory()?;
        Ok(inventory.expired(today).into_iter().cloned().collect())
    }

    /// Store a recipe, returning the one it replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe file cannot be read or written.
    pub fn add_recipe(&self, recipe: Recipe) -> Result<Option<Recipe>> {
        let mut cookbook = self.cookbook()?;
        let name = recipe.name.clone();
        let replaced = cookbook.add(recipe);
        store::save_cookbook(&self.files.recipes, &cookbook)?;
        info!(recipe = %name, "Stored recipe");
        Ok(replaced)
    }

    /// Delete a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecipeNotFound`] for an unknown name, or an error if
    /// the recipe file cannot be read or written.
    pub fn remove_recipe(&self, name: &str) -> Result<Recipe> {
        let mut cookbook = self.cookbook()?;
        let removed = cookbook
            .remove(name)
            .ok_or_else(|| Error::recipe_not_found(name.trim()))?;
        store::save_cookbook(&self.files.recipes, &cookbook)?;
        info!(recipe = %removed.name, "Removed recipe");
        Ok(removed)
    }

    /// Check one recipe against current stock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecipeNotFound`] for an unknown name, or an error if
    /// a data file cannot be read.
    pub fn check_recipe(&self, name: &str) -> Result<(Recipe, Feasibility)> {
        let cookbook = self.cookbook()?;
        let recipe = cookbook.require(name)?.clone();
        let result = check(&recipe, &self.inventory()?);
        Ok((recipe, result))
    }

    /// Recipes that can be made from current stock.
    ///
    /// # Errors
    ///
    /// Returns an error if a data file cannot be read.
    pub fn suggest(&self) -> Result<Vec<Suggestion>> {
        let inventory = self.inventory()?;
        Ok(self.cookbook()?.suggest(&inventory))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{RecipeIngredient, Unit};

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn temp_pantry() -> (tempfile::TempDir, Pantry) {
        let dir = tempfile::tempdir().unwrap();
        let pantry = Pantry::new(DataFiles::in_dir(dir.path()), "MyCookBook");
        (dir, pantry)
    }

    fn omelette() -> Recipe {
        Recipe::new(
            "Omelette",
            "Beat and fry",
            vec![
                RecipeIngredient::new("Egg", 3, Unit::Pieces, 2.0).unwrap(),
                RecipeIngredient::new("Milk", 1, Unit::Liter, 1.5).unwrap(),
            ],
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.storage.data_dir = Some(std::path::PathBuf::from("/data"));
        config.cookbook.name = "Family".to_string();

        let pantry = Pantry::from_config(&config);
        assert_eq!(pantry.files().recipes, std::path::PathBuf::from("/data/recipes.txt"));
        assert_eq!(pantry.cookbook().unwrap().name(), "Family");
    }

    #[test]
    fn test_add_and_remove_ingredient() {
        let (_dir, pantry) = temp_pantry();
        let eggs = Ingredient::new("Egg", Unit::Pieces, 6, 30.0, date(2030, 1, 1)).unwrap();
        pantry.add_ingredient(&eggs).unwrap();

        assert_eq!(pantry.remove_ingredient("egg", 2).unwrap(), 2);
        assert_eq!(pantry.inventory().unwrap().find("Egg").unwrap().quantity, 4);

        let err = pantry.remove_ingredient("Bacon", 0).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_expired() {
        let (_dir, pantry) = temp_pantry();
        pantry
            .add_ingredient(&Ingredient::new("Milk", Unit::Liter, 2, 1.5, date(2023, 11, 1)).unwrap())
            .unwrap();
        pantry
            .add_ingredient(&Ingredient::new("Sugar", Unit::Gram, 500, 2.5, date(2030, 1, 1)).unwrap())
            .unwrap();

        let expired = pantry.expired(date(2024, 1, 1)).unwrap();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].name, "Milk");
    }

    #[test]
    fn test_recipe_lifecycle() {
        let (_dir, pantry) = temp_pantry();
        assert!(pantry.add_recipe(omelette()).unwrap().is_none());
        assert!(pantry.add_recipe(omelette()).unwrap().is_some());
        assert_eq!(pantry.cookbook().unwrap().len(), 1);

        let removed = pantry.remove_recipe("Omelette").unwrap();
        assert_eq!(removed.name, "Omelette");
        assert!(pantry.remove_recipe("Omelette").unwrap_err().is_not_found());
    }

    #[test]
    fn test_check_and_suggest() {
        let (_dir, pantry) = temp_pantry();
        pantry.add_recipe(omelette()).unwrap();
        pantry
            .add_ingredient(&Ingredient::new("Egg", Unit::Pieces, 6, 30.0, date(2030, 1, 1)).unwrap())
            .unwrap();

        let (_, result) = pantry.check_recipe("Omelette").unwrap();
        assert_eq!(result.shortfalls.len(), 1);
        assert!(pantry.suggest().unwrap().is_empty());

        pantry
            .add_ingredient(&Ingredient::new("Milk", Unit::Liter, 1, 12.0, date(2030, 1, 1)).unwrap())
            .unwrap();
        let suggestions = pantry.suggest().unwrap();
        assert_eq!(suggestions.len(), 1);
        assert!((suggestions[0].total_price - 42.0).abs() < f64::EPSILON);

        assert!(pantry.check_recipe("Pancakes").unwrap_err().is_not_found());
    }
}
