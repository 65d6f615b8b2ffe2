//! In-memory ingredient store.
//!
//! The inventory is a flat list of lots kept sorted by name and expiration
//! date. Several lots may share a name; lookups ignore case.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{names_match, Ingredient, Unit};

/// Aggregate stock of one ingredient in one unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Stock {
    /// Units on hand, summed over lots.
    pub quantity: u64,
    /// Prices of those lots, summed.
    pub price: f64,
}

/// The ingredient store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inventory {
    lots: Vec<Ingredient>,
}

fn sort_key(ingredient: &Ingredient) -> (String, NaiveDate) {
    (ingredient.name.to_lowercase(), ingredient.expiration_date)
}

impl Inventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lot, keeping the list sorted.
    pub fn add(&mut self, ingredient: Ingredient) {
        let key = sort_key(&ingredient);
        let index = self.lots.partition_point(|lot| sort_key(lot) <= key);
        debug!(name = %ingredient.name, quantity = ingredient.quantity, "Adding lot");
        self.lots.insert(index, ingredient);
    }

    /// Check if any lot carries the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lots.iter().any(|lot| lot.is_named(name))
    }

    /// First lot with the given name, in sorted order.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Ingredient> {
        self.lots.iter().find(|lot| lot.is_named(name))
    }

    /// Total stock of `name` counted in `unit`.
    #[must_use]
    pub fn available(&self, name: &str, unit: Unit) -> Stock {
        self.lots
            .iter()
            .filter(|lot| lot.unit == unit && lot.is_named(name))
            .fold(Stock::default(), |stock, lot| Stock {
                quantity: stock.quantity + u64::from(lot.quantity),
                price: stock.price + lot.price,
            })
    }

    /// Distinct units `name` is stocked in.
    #[must_use]
    pub fn units_of(&self, name: &str) -> Vec<Unit> {
        let mut units: Vec<Unit> = self
            .lots
            .iter()
            .filter(|lot| lot.is_named(name))
            .map(|lot| lot.unit)
            .collect();
        units.sort();
        units.dedup();
        units
    }

    /// Remove stock by name.
    ///
    /// `units == 0` drops every lot with that name. Otherwise units are taken
    /// from the lots that expire first, and emptied lots are dropped. Returns
    /// the number of units actually removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IngredientNotFound`] if no lot carries the name.
    pub fn remove(&mut self, name: &str, units: u32) -> Result<u64> {
        let name = name.trim();
        if name.is_empty() || !self.contains(name) {
            return Err(Error::ingredient_not_found(name));
        }

        let mut removed = 0u64;
        if units == 0 {
            self.lots.retain(|lot| {
                if names_match(&lot.name, name) {
                    removed += u64::from(lot.quantity);
                    false
                } else {
                    true
                }
            });
        } else {
            // Matching lots are adjacent and already ordered by expiration.
            let mut remaining = units;
            for lot in self.lots.iter_mut().filter(|lot| lot.is_named(name)) {
                if remaining == 0 {
                    break;
                }
                let taken = remaining.min(lot.quantity);
                lot.quantity -= taken;
                remaining -= taken;
                removed += u64::from(taken);
            }
            self.lots.retain(|lot| lot.quantity > 0);
        }

        info!(name, removed, "Removed stock");
        Ok(removed)
    }

    /// Lots that expired before `today`.
    #[must_use]
    pub fn expired(&self, today: NaiveDate) -> Vec<&Ingredient> {
        self.lots.iter().filter(|lot| lot.is_expired(today)).collect()
    }

    /// All lots, sorted by name then expiration date.
    #[must_use]
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.lots
    }

    /// Drop every lot.
    pub fn clear(&mut self) {
        self.lots.clear();
    }

    /// Number of lots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    /// Check if the inventory holds no lots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }
}

impl FromIterator<Ingredient> for Inventory {
    fn from_iter<I: IntoIterator<Item = Ingredient>>(iter: I) -> Self {
        let mut lots: Vec<Ingredient> = iter.into_iter().collect();
        lots.sort_by_key(sort_key);
        Self { lots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lot(name: &str, unit: Unit, quantity: u32, price: f64, expires: NaiveDate) -> Ingredient {
        Ingredient::new(name, unit, quantity, price, expires).unwrap()
    }

    fn sample() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add(lot("Sugar", Unit::Gram, 500, 2.5, date(2024, 11, 30)));
        inventory.add(lot("milk", Unit::Liter, 1, 1.5, date(2023, 11, 10)));
        inventory.add(lot("Milk", Unit::Liter, 2, 1.5, date(2023, 11, 1)));
        inventory.add(lot("Apple", Unit::Pieces, 6, 12.0, date(2024, 1, 5)));
        inventory
    }

    #[test]
    fn test_add_keeps_sorted() {
        let inventory = sample();
        let names: Vec<&str> = inventory
            .ingredients()
            .iter()
            .map(|lot| lot.name.as_str())
            .collect();
        assert_eq!(names, vec!["Apple", "Milk", "milk", "Sugar"]);
    }

    #[test]
    fn test_from_iter_sorts() {
        let inventory: Inventory = vec![
            lot("Sugar", Unit::Gram, 500, 2.5, date(2024, 11, 30)),
            lot("Apple", Unit::Pieces, 6, 12.0, date(2024, 1, 5)),
        ]
        .into_iter()
        .collect();
        assert_eq!(inventory.ingredients()[0].name, "Apple");
    }

    #[test]
    fn test_contains_and_find_ignore_case() {
        let inventory = sample();
        assert!(inventory.contains("SUGAR"));
        assert!(!inventory.contains("Salt"));
        let milk = inventory.find("MILK").unwrap();
        assert_eq!(milk.expiration_date, date(2023, 11, 1));
    }

    #[test]
    fn test_available_sums_lots() {
        let inventory = sample();
        let stock = inventory.available("milk", Unit::Liter);
        assert_eq!(stock.quantity, 3);
        assert!((stock.price - 3.0).abs() < f64::EPSILON);
        assert_eq!(inventory.available("milk", Unit::Gram), Stock::default());
    }

    #[test]
    fn test_units_of() {
        let mut inventory = sample();
        inventory.add(lot("Milk", Unit::Pieces, 1, 4.0, date(2024, 1, 1)));
        assert_eq!(inventory.units_of("milk"), vec![Unit::Liter, Unit::Pieces]);
        assert!(inventory.units_of("Salt").is_empty());
    }

    #[test]
    fn test_remove_all_units() {
        let mut inventory = sample();
        let removed = inventory.remove("Milk", 0).unwrap();
        assert_eq!(removed, 3);
        assert!(!inventory.contains("Milk"));
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_remove_takes_earliest_expiring_first() {
        let mut inventory = sample();
        let removed = inventory.remove("milk", 2).unwrap();
        assert_eq!(removed, 2);
        let left = inventory.find("milk").unwrap();
        assert_eq!(left.expiration_date, date(2023, 11, 10));
        assert_eq!(left.quantity, 1);
    }

    #[test]
    fn test_remove_partial_lot() {
        let mut inventory = sample();
        inventory.remove("Sugar", 200).unwrap();
        assert_eq!(inventory.find("Sugar").unwrap().quantity, 300);
    }

    #[test]
    fn test_remove_more_than_stocked_empties() {
        let mut inventory = sample();
        let removed = inventory.remove("Apple", 100).unwrap();
        assert_eq!(removed, 6);
        assert!(!inventory.contains("Apple"));
    }

    #[test]
    fn test_remove_unknown() {
        let mut inventory = sample();
        let err = inventory.remove("NonExistingIngredient", 1).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(inventory.len(), 4);
    }

    #[test]
    fn test_remove_blank_name() {
        let mut inventory = sample();
        assert!(inventory.remove("  ", 0).is_err());
    }

    #[test]
    fn test_expired() {
        let inventory = sample();
        let expired = inventory.expired(date(2023, 11, 5));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].name, "Milk");

        assert!(inventory.expired(date(2023, 1, 1)).is_empty());
        assert_eq!(inventory.expired(date(2025, 1, 1)).len(), 4);
    }

    #[test]
    fn test_clear() {
        let mut inventory = sample();
        inventory.clear();
        assert!(inventory.is_empty());

        let mut empty = Inventory::new();
        empty.clear();
        assert!(empty.is_empty());
    }
}
