//! `pantry` - Food inventory and recipe suggestions
//!
//! This library tracks stocked ingredients with their expiration dates, keeps
//! a cookbook of recipes, and works out which recipes can be made from what
//! is currently in stock. Both stores persist as line-based text files.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod cookbook;
pub mod error;
pub mod format;
pub mod inventory;
pub mod logging;
pub mod menu;
pub mod model;
pub mod report;
pub mod store;

pub use app::Pantry;
pub use config::Config;
pub use cookbook::CookBook;
pub use error::{Error, Result};
pub use inventory::Inventory;
pub use logging::init_logging;
pub use model::{Ingredient, Recipe, RecipeIngredient, Unit};
pub use store::DataFiles;
