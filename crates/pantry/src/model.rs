//! Core domain types for pantry.
//!
//! This module defines the stocked ingredient record, the ingredient
//! requirement of a recipe, and the recipe itself.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format used for expiration dates everywhere.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unit of measurement for stock and recipe amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    /// Weight in grams.
    Gram,
    /// Volume in liters.
    Liter,
    /// Countable items.
    Pieces,
}

impl Unit {
    /// All units, in menu order.
    pub const ALL: [Unit; 3] = [Unit::Gram, Unit::Liter, Unit::Pieces];

    /// Map a numbered menu answer (`1`, `2`, `3`) to a unit.
    #[must_use]
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Gram),
            "2" => Some(Self::Liter),
            "3" => Some(Self::Pieces),
            _ => None,
        }
    }

    /// The canonical spelling used in data files.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gram => "Gram",
            Self::Liter => "Liter",
            Self::Pieces => "Pieces",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidUnit(trimmed.to_string()))
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if the input is not a real calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|source| Error::InvalidDate {
        input: trimmed.to_string(),
        source,
    })
}

/// Render a price so that it always carries a decimal point (`3.0`, `2.5`).
#[must_use]
pub fn format_price(price: f64) -> String {
    let rendered = price.to_string();
    if rendered.contains('.') {
        rendered
    } else {
        format!("{rendered}.0")
    }
}

/// Compare two ingredient names the way lookups do: trimmed, ignoring case.
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

fn validate_name(name: &str, what: &str) -> std::result::Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(format!("{what} name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: f64) -> std::result::Result<(), String> {
    if !price.is_finite() || price <= 0.0 {
        return Err(format!("price must be a positive number, got {price}"));
    }
    Ok(())
}

/// A stocked ingredient lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Display name; lookups ignore case.
    pub name: String,
    /// Unit the quantity is counted in.
    pub unit: Unit,
    /// How many units are in stock.
    pub quantity: u32,
    /// Price paid for the lot.
    pub price: f64,
    /// Last day the lot is good.
    pub expiration_date: NaiveDate,
}

impl Ingredient {
    /// Create a validated ingredient lot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIngredient`] for a blank name, a zero quantity
    /// or a price that is not a positive number.
    pub fn new(
        name: impl AsRef<str>,
        unit: Unit,
        quantity: u32,
        price: f64,
        expiration_date: NaiveDate,
    ) -> Result<Self> {
        let name = validate_name(name.as_ref(), "ingredient").map_err(Error::invalid_ingredient)?;
        if quantity == 0 {
            return Err(Error::invalid_ingredient("quantity must be at least 1"));
        }
        validate_price(price).map_err(Error::invalid_ingredient)?;

        Ok(Self {
            name,
            unit,
            quantity,
            price,
            expiration_date,
        })
    }

    /// Check if the lot expired before `today`.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration_date < today
    }

    /// Check if this lot has the given name, ignoring case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}, price {:.2}, expires {}",
            self.name, self.quantity, self.unit, self.price, self.expiration_date
        )
    }
}

/// An ingredient a recipe calls for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Name matched against stock, ignoring case.
    pub name: String,
    /// Required amount.
    pub amount: u32,
    /// Unit the amount is counted in.
    pub unit: Unit,
    /// Price per unit, as entered.
    pub price: f64,
}

impl RecipeIngredient {
    /// Create a validated recipe ingredient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecipe`] for a blank name, a zero amount or a
    /// price that is not a positive number.
    pub fn new(name: impl AsRef<str>, amount: u32, unit: Unit, price: f64) -> Result<Self> {
        let name = validate_name(name.as_ref(), "ingredient").map_err(Error::invalid_recipe)?;
        if amount == 0 {
            return Err(Error::invalid_recipe(format!(
                "amount of '{name}' must be at least 1"
            )));
        }
        validate_price(price).map_err(Error::invalid_recipe)?;

        Ok(Self {
            name,
            amount,
            unit,
            price,
        })
    }
}

impl fmt::Display for RecipeIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ingredient: {}, Amount: {} {}, Price: {}",
            self.name,
            self.amount,
            self.unit,
            format_price(self.price)
        )
    }
}

/// A named recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique name within a cookbook.
    pub name: String,
    /// Free-form preparation text.
    pub instructions: String,
    /// Everything the recipe needs.
    pub ingredients: Vec<RecipeIngredient>,
    /// Number of people the recipe serves.
    pub servings: u32,
}

impl Recipe {
    /// Create a validated recipe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecipe`] for a blank name, an empty ingredient
    /// list or zero servings.
    pub fn new(
        name: impl AsRef<str>,
        instructions: impl Into<String>,
        ingredients: Vec<RecipeIngredient>,
        servings: u32,
    ) -> Result<Self> {
        let name = validate_name(name.as_ref(), "recipe").map_err(Error::invalid_recipe)?;
        if ingredients.is_empty() {
            return Err(Error::invalid_recipe(format!(
                "recipe '{name}' needs at least one ingredient"
            )));
        }
        if servings == 0 {
            return Err(Error::invalid_recipe(format!(
                "recipe '{name}' must serve at least one person"
            )));
        }

        Ok(Self {
            name,
            instructions: instructions.into(),
            ingredients,
            servings,
        })
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recipe Name: {}", self.name)?;
        writeln!(f, "Ingredients:")?;
        for ingredient in &self.ingredients {
            writeln!(f, "{ingredient}")?;
        }
        writeln!(f, "Instructions: {}", self.instructions)?;
        writeln!(f, "Number of people: {}", self.servings)
    }
}
