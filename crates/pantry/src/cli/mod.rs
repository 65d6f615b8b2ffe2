//! Command-line interface for pantry.
//!
//! This module provides the CLI structure for the `pantry` binary. Running
//! it without a subcommand starts the interactive menu.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    parse_ingredient_spec, ConfigCommand, IngredientCommand, OutputFormat, RecipeCommand,
    SuggestCommand, UnitArg,
};

/// pantry - Keep track of food at home
///
/// Records stocked ingredients with their expiration dates, keeps a
/// cookbook of recipes and suggests what can be cooked from current stock.
#[derive(Debug, Parser)]
#[command(name = "pantry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive menu
    Menu,

    /// Manage stocked ingredients
    #[command(subcommand)]
    Ingredient(IngredientCommand),

    /// Manage the cookbook
    #[command(subcommand)]
    Recipe(RecipeCommand),

    /// Suggest recipes that can be made from current stock
    Suggest(SuggestCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                2 => crate::logging::Verbosity::Debug,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
