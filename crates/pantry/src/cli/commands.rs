//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::model::{parse_date, RecipeIngredient, Unit};

/// Ingredient stock commands.
#[derive(Debug, Subcommand)]
pub enum IngredientCommand {
    /// Stock a new lot of an ingredient
    Add {
        /// Ingredient name
        name: String,

        /// Unit the quantity is counted in
        #[arg(short, long, value_enum)]
        unit: UnitArg,

        /// Number of units in stock
        #[arg(short = 'n', long)]
        quantity: u32,

        /// Price of the lot
        #[arg(short, long, value_parser = parse_price_arg)]
        price: f64,

        /// Expiration date (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date_arg)]
        expires: NaiveDate,
    },

    /// Remove stock of an ingredient
    Remove {
        /// Ingredient name (case-insensitive)
        name: String,

        /// Units to remove; 0 or omitted removes every lot
        #[arg(short, long, default_value = "0")]
        units: u32,
    },

    /// List all stocked lots
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List lots past their expiration date
    Expired {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// Cookbook commands.
#[derive(Debug, Subcommand)]
pub enum RecipeCommand {
    /// Add or replace a recipe
    Add {
        /// Recipe name
        name: String,

        /// Required ingredient as name:amount:unit:price (repeatable)
        #[arg(short, long = "ingredient", required = true, value_parser = parse_ingredient_spec)]
        ingredients: Vec<RecipeIngredient>,

        /// Preparation instructions
        #[arg(long, default_value = "")]
        instructions: String,

        /// Number of people the recipe serves
        #[arg(short, long, default_value = "1")]
        servings: u32,
    },

    /// List all recipes
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Show one recipe
    Show {
        /// Recipe name
        name: String,
    },

    /// Delete a recipe
    Remove {
        /// Recipe name
        name: String,
    },

    /// Check whether a recipe can be made from current stock
    Check {
        /// Recipe name
        name: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Suggest command arguments.
#[derive(Debug, Args)]
pub struct SuggestCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Unit argument for ingredient commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    /// Grams
    Gram,
    /// Liters
    Liter,
    /// Pieces
    Pieces,
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Gram => Self::Gram,
            UnitArg::Liter => Self::Liter,
            UnitArg::Pieces => Self::Pieces,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

fn parse_date_arg(input: &str) -> Result<NaiveDate, String> {
    parse_date(input).map_err(|e| e.to_string())
}

fn parse_price_arg(input: &str) -> Result<f64, String> {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|e| format!("invalid price '{input}': {e}"))
}

/// Parse a recipe ingredient given as `name:amount:unit:price`.
///
/// The name is everything before the last three fields, so it may itself
/// contain colons.
///
/// # Errors
///
/// Returns a message naming the malformed field.
pub fn parse_ingredient_spec(spec: &str) -> Result<RecipeIngredient, String> {
    let mut fields = spec.rsplitn(4, ':');
    let (Some(price), Some(unit), Some(amount), Some(name)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(format!("expected name:amount:unit:price, got '{spec}'"));
    };

    let amount = amount
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid amount '{amount}': {e}"))?;
    let unit = unit.parse::<Unit>().map_err(|e| e.to_string())?;
    let price = parse_price_arg(price)?;

    RecipeIngredient::new(name, amount, unit, price).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_arg_conversion() {
        assert_eq!(Unit::from(UnitArg::Gram), Unit::Gram);
        assert_eq!(Unit::from(UnitArg::Liter), Unit::Liter);
        assert_eq!(Unit::from(UnitArg::Pieces), Unit::Pieces);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_parse_ingredient_spec() {
        let ingredient = parse_ingredient_spec("Flour:200:gram:1,5").unwrap();
        assert_eq!(ingredient.name, "Flour");
        assert_eq!(ingredient.amount, 200);
        assert_eq!(ingredient.unit, Unit::Gram);
        assert!((ingredient.price - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_ingredient_spec_name_with_colon() {
        let ingredient = parse_ingredient_spec("Sauce: tomato:1:Liter:3").unwrap();
        assert_eq!(ingredient.name, "Sauce: tomato");
        assert_eq!(ingredient.unit, Unit::Liter);
    }

    #[test]
    fn test_parse_ingredient_spec_errors() {
        assert!(parse_ingredient_spec("Flour:200:gram").is_err());
        assert!(parse_ingredient_spec("Flour:lots:gram:1").is_err());
        assert!(parse_ingredient_spec("Flour:200:cups:1").is_err());
        assert!(parse_ingredient_spec("Flour:0:gram:1").is_err());
        assert!(parse_ingredient_spec(":200:gram:1").is_err());
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg("2024-11-30").unwrap(),
            NaiveDate::from_ymd_opt(2024, 11, 30).unwrap()
        );
        assert!(parse_date_arg("30.11.2024").is_err());
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
