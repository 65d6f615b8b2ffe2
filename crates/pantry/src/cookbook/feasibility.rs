//! Recipe feasibility against current stock.

use std::fmt;

use serde::Serialize;

use crate::inventory::Inventory;
use crate::model::{names_match, Recipe, Unit};

/// Why a recipe ingredient cannot be covered by stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shortfall {
    /// Nothing with this name is stocked.
    Missing {
        /// Ingredient name as the recipe spells it.
        name: String,
    },
    /// The name is stocked, but only in other units.
    UnitMismatch {
        /// Ingredient name as the recipe spells it.
        name: String,
        /// Unit the recipe needs.
        needed: Unit,
        /// Units the ingredient is stocked in.
        stocked: Vec<Unit>,
    },
    /// Stocked in the right unit, but not enough of it.
    Insufficient {
        /// Ingredient name as the recipe spells it.
        name: String,
        /// Unit of both amounts.
        unit: Unit,
        /// Units on hand.
        have: u64,
        /// Units required, summed over the recipe.
        need: u64,
    },
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name } => write!(f, "{name}: not in stock"),
            Self::UnitMismatch {
                name,
                needed,
                stocked,
            } => {
                let stocked: Vec<&str> = stocked.iter().map(Unit::as_str).collect();
                write!(
                    f,
                    "{name}: needs {needed}, stocked as {}",
                    stocked.join(", ")
                )
            }
            Self::Insufficient {
                name,
                unit,
                have,
                need,
            } => write!(f, "{name}: need {need} {unit}, have {have}"),
        }
    }
}

/// Outcome of checking one recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feasibility {
    /// Every ingredient that could not be covered.
    pub shortfalls: Vec<Shortfall>,
    /// Summed price of the stock lots the recipe draws on.
    pub total_price: f64,
}

impl Feasibility {
    /// Check if every ingredient is covered.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.shortfalls.is_empty()
    }
}

/// A recipe that can be made right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// Recipe name.
    pub recipe: String,
    /// Summed price of the stock lots the recipe draws on.
    pub total_price: f64,
    /// Number of people the recipe serves.
    pub servings: u32,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recipe: {}, Total Price: {:.2}",
            self.recipe, self.total_price
        )
    }
}

/// One requirement per name and unit, amounts summed across the recipe.
struct Requirement<'r> {
    name: &'r str,
    unit: Unit,
    amount: u64,
}

fn requirements(recipe: &Recipe) -> Vec<Requirement<'_>> {
    let mut merged: Vec<Requirement<'_>> = Vec::with_capacity(recipe.ingredients.len());
    for ingredient in &recipe.ingredients {
        match merged
            .iter_mut()
            .find(|r| r.unit == ingredient.unit && names_match(r.name, &ingredient.name))
        {
            Some(existing) => existing.amount += u64::from(ingredient.amount),
            None => merged.push(Requirement {
                name: &ingredient.name,
                unit: ingredient.unit,
                amount: u64::from(ingredient.amount),
            }),
        }
    }
    merged
}

/// Compare a recipe's requirements with the inventory.
///
/// Requirements naming the same ingredient (ignoring case) in the same unit
/// are combined before they are matched against stock, so the matching lots
/// are counted and priced once. The cost of a requirement is the summed
/// price of the matching lots.
#[must_use]
pub fn check(recipe: &Recipe, inventory: &Inventory) -> Feasibility {
    let mut shortfalls = Vec::new();
    let mut total_price = 0.0;

    for needed in requirements(recipe) {
        let stock = inventory.available(needed.name, needed.unit);
        if stock.quantity == 0 {
            let stocked = inventory.units_of(needed.name);
            if stocked.is_empty() {
                shortfalls.push(Shortfall::Missing {
                    name: needed.name.to_string(),
                });
            } else {
                shortfalls.push(Shortfall::UnitMismatch {
                    name: needed.name.to_string(),
                    needed: needed.unit,
                    stocked,
                });
            }
        } else if stock.quantity < needed.amount {
            shortfalls.push(Shortfall::Insufficient {
                name: needed.name.to_string(),
                unit: needed.unit,
                have: stock.quantity,
                need: needed.amount,
            });
        } else {
            total_price += stock.price;
        }
    }

    Feasibility {
        shortfalls,
        total_price,
    }
}
