//! `pantry` - CLI for the food inventory
//!
//! This binary runs the interactive menu or a single one-shot command
//! against the configured data files.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, IsTerminal, Write};

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::Parser;

use pantry::cli::{Cli, Command, ConfigCommand, IngredientCommand, OutputFormat, RecipeCommand};
use pantry::menu::Menu;
use pantry::model::{Ingredient, Recipe};
use pantry::report::{self, Style};
use pantry::{init_logging, Config, Pantry};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    let pantry = Pantry::from_config(&config);
    let style = Style {
        color: config.display.color && io::stdout().is_terminal(),
    };
    let today = Local::now().date_naive();

    match cli.command {
        None | Some(Command::Menu) => run_menu(&pantry, style, today),
        Some(Command::Ingredient(cmd)) => handle_ingredient(&pantry, cmd, style, today),
        Some(Command::Recipe(cmd)) => handle_recipe(&pantry, cmd),
        Some(Command::Suggest(cmd)) => handle_suggest(&pantry, cmd.format, style),
        Some(Command::Config(cmd)) => handle_config(&config, cmd),
    }
}

fn run_menu(pantry: &Pantry, style: Style, today: NaiveDate) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(pantry, stdin.lock(), stdout.lock(), style, today)
        .run()
        .context("interactive menu failed")
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    report::json(&mut out, value)?;
    out.flush()?;
    Ok(())
}

fn print_lots(
    lots: &[&Ingredient],
    format: OutputFormat,
    style: Style,
    expired: bool,
) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => report::json(&mut out, lots)?,
        OutputFormat::Table => {
            report::ingredient_table(&mut out, lots.iter().copied(), style, expired)?;
        }
        OutputFormat::Plain => report::ingredient_lines(&mut out, lots.iter().copied())?,
    }
    out.flush()?;
    Ok(())
}

fn handle_ingredient(
    pantry: &Pantry,
    cmd: IngredientCommand,
    style: Style,
    today: NaiveDate,
) -> anyhow::Result<()> {
    match cmd {
        IngredientCommand::Add {
            name,
            unit,
            quantity,
            price,
            expires,
        } => {
            let ingredient = Ingredient::new(name, unit.into(), quantity, price, expires)?;
            pantry.add_ingredient(&ingredient)?;
            println!("Ingredient added successfully!");
        }
        IngredientCommand::Remove { name, units } => {
            let removed = pantry
                .remove_ingredient(&name, units)
                .with_context(|| format!("failed to remove '{name}'"))?;
            println!("Ingredient removed! ({removed} units)");
        }
        IngredientCommand::List { format } => {
            let inventory = pantry.inventory()?;
            if inventory.is_empty() && format != OutputFormat::Json {
                println!("No ingredients added yet");
                return Ok(());
            }
            let lots: Vec<&Ingredient> = inventory.ingredients().iter().collect();
            print_lots(&lots, format, style, false)?;
        }
        IngredientCommand::Expired { format } => {
            let expired = pantry.expired(today)?;
            if expired.is_empty() && format != OutputFormat::Json {
                println!("No expired goods.");
                return Ok(());
            }
            let lots: Vec<&Ingredient> = expired.iter().collect();
            print_lots(&lots, format, style, true)?;
        }
    }
    Ok(())
}

fn handle_recipe(pantry: &Pantry, cmd: RecipeCommand) -> anyhow::Result<()> {
    match cmd {
        RecipeCommand::Add {
            name,
            ingredients,
            instructions,
            servings,
        } => {
            let recipe = Recipe::new(name, instructions, ingredients, servings)?;
            let name = recipe.name.clone();
            if pantry.add_recipe(recipe)?.is_some() {
                println!("Recipe '{name}' replaced.");
            } else {
                println!("Recipe added successfully!");
            }
        }
        RecipeCommand::List { format } => {
            let cookbook = pantry.cookbook()?;
            match format {
                OutputFormat::Json => {
                    let recipes: Vec<&Recipe> = cookbook.recipes().collect();
                    print_json(&recipes)?;
                }
                OutputFormat::Table | OutputFormat::Plain if cookbook.is_empty() => {
                    println!("No recipes made yet");
                }
                OutputFormat::Table => {
                    println!("{:<30} {:<12} {:<8}", "Recipe", "Ingredients", "Serves");
                    for recipe in cookbook.recipes() {
                        println!(
                            "{:<30} {:<12} {:<8}",
                            recipe.name,
                            recipe.ingredients.len(),
                            recipe.servings
                        );
                    }
                }
                OutputFormat::Plain => {
                    for recipe in cookbook.recipes() {
                        println!("{recipe}");
                    }
                }
            }
        }
        RecipeCommand::Show { name } => {
            let cookbook = pantry.cookbook()?;
            print!("{}", cookbook.require(&name)?);
        }
        RecipeCommand::Remove { name } => {
            let removed = pantry.remove_recipe(&name)?;
            println!("Recipe '{}' removed.", removed.name);
        }
        RecipeCommand::Check { name, json } => {
            let (recipe, result) = pantry.check_recipe(&name)?;
            if json {
                print_json(&result)?;
            } else if result.is_feasible() {
                println!(
                    "'{}' can be made. Total Price: {:.2}",
                    recipe.name, result.total_price
                );
            } else {
                println!("'{}' cannot be made:", recipe.name);
                for shortfall in &result.shortfalls {
                    println!("  - {shortfall}");
                }
            }
        }
    }
    Ok(())
}

fn handle_suggest(pantry: &Pantry, format: OutputFormat, style: Style) -> anyhow::Result<()> {
    if format != OutputFormat::Json && pantry.cookbook()?.is_empty() {
        println!("No recipes added yet");
        return Ok(());
    }
    let suggestions = pantry.suggest()?;
    match format {
        OutputFormat::Json => print_json(&suggestions)?,
        OutputFormat::Table | OutputFormat::Plain if suggestions.is_empty() => {
            println!("No recipes can be made with the available ingredients.");
        }
        OutputFormat::Table => {
            println!("{:<30} {:<12} {:<8}", "Recipe", "Total Price", "Serves");
            for suggestion in &suggestions {
                println!(
                    "{:<30} {:<12.2} {:<8}",
                    suggestion.recipe, suggestion.total_price, suggestion.servings
                );
            }
        }
        OutputFormat::Plain => {
            println!("You can make the following recipes: ");
            println!();
            let mut out = io::stdout().lock();
            report::suggestions(&mut out, &suggestions, style)?;
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                print_json(config)?;
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data directory:     {}", config.data_dir().display());
                println!("  Ingredients file:   {}", config.ingredients_path().display());
                println!("  Recipes file:       {}", config.recipes_path().display());
                println!();
                println!("[Cookbook]");
                println!("  Name:               {}", config.cookbook.name);
                println!();
                println!("[Display]");
                println!("  Color:              {}", config.display.color);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
