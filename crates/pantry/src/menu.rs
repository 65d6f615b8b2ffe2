//! Interactive console menu.
//!
//! [`Menu`] runs the numbered menu loop over any line-based input and
//! output, so the same code drives a terminal session and the tests.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use tracing::{debug, error};

use crate::app::Pantry;
use crate::error::Result;
use crate::model::{parse_date, Ingredient, Recipe, RecipeIngredient, Unit};
use crate::report::{self, Style};

const MENU: &str = "What do you want to do?
1: Add ingredient
2: Remove ingredient
3: Show all ingredients
4: Expired goods
5: Add recipe
6: Show recipe
7: Recommend dishes based on current ingredients
8: Exit";

const UNIT_PROMPT: &str = "What unit? \n 1. Gram \n 2. Liter \n 3. Pieces";

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Stock a new ingredient.
    AddIngredient,
    /// Remove stock.
    RemoveIngredient,
    /// List the inventory.
    ShowIngredients,
    /// List expired lots.
    ExpiredGoods,
    /// Enter a recipe.
    AddRecipe,
    /// Print every recipe.
    ShowRecipes,
    /// Suggest recipes that can be made now.
    RecommendDishes,
    /// Leave the menu.
    Exit,
}

impl Choice {
    /// Map a menu number to its entry.
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(Self::AddIngredient),
            2 => Some(Self::RemoveIngredient),
            3 => Some(Self::ShowIngredients),
            4 => Some(Self::ExpiredGoods),
            5 => Some(Self::AddRecipe),
            6 => Some(Self::ShowRecipes),
            7 => Some(Self::RecommendDishes),
            8 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Outcome of an answer that may be invalid.
enum Answer<T> {
    Value(T),
    Invalid,
    EndOfInput,
}

/// The interactive menu loop.
#[derive(Debug)]
pub struct Menu<'p, R, W> {
    pantry: &'p Pantry,
    input: R,
    out: W,
    style: Style,
    today: NaiveDate,
}

impl<'p, R: BufRead, W: Write> Menu<'p, R, W> {
    /// Create a menu reading answers from `input` and writing to `out`.
    ///
    /// `today` decides which lots count as expired.
    pub fn new(pantry: &'p Pantry, input: R, out: W, style: Style, today: NaiveDate) -> Self {
        Self {
            pantry,
            input,
            out,
            style,
            today,
        }
    }

    /// Run until the user exits or input ends.
    ///
    /// Failures of individual operations are reported to the user and the
    /// loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "Welcome to the Food Storage System!")?;
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "{MENU}")?;
            let Some(line) = self.read_line()? else {
                debug!("Input ended, leaving menu");
                return Ok(());
            };

            let Ok(number) = line.trim().parse::<u32>() else {
                writeln!(self.out, "Invalid input, please try again")?;
                continue;
            };
            let Some(choice) = Choice::from_number(number) else {
                writeln!(self.out, "Invalid choice")?;
                continue;
            };
            if choice == Choice::Exit {
                writeln!(self.out, "Exiting")?;
                return Ok(());
            }

            if let Err(e) = self.dispatch(choice) {
                error!(?choice, error = %e, "Menu operation failed");
                writeln!(self.out, "Error: {e}")?;
            }
        }
    }

    fn dispatch(&mut self, choice: Choice) -> Result<()> {
        debug!(?choice, "Menu choice");
        match choice {
            Choice::AddIngredient => self.add_ingredient(),
            Choice::RemoveIngredient => {
                writeln!(self.out, "Removing ingredient")?;
                self.remove_ingredient()
            }
            Choice::ShowIngredients => {
                writeln!(self.out, "Showing all ingredients")?;
                self.show_ingredients()
            }
            Choice::ExpiredGoods => {
                writeln!(self.out, "Food storage: ")?;
                self.show_expired()
            }
            Choice::AddRecipe => {
                writeln!(self.out, "Add recipes to the cooking book:")?;
                self.add_recipe()
            }
            Choice::ShowRecipes => {
                writeln!(self.out, "Showing recipes: ")?;
                writeln!(self.out)?;
                self.show_recipes()
            }
            Choice::RecommendDishes => {
                writeln!(self.out, "Recommend dishes based on these current ingredients: ")?;
                writeln!(self.out)?;
                self.recommend()
            }
            Choice::Exit => Ok(()),
        }
    }

    // === Input helpers ===

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        writeln!(self.out, "{question}")?;
        self.read_line()
    }

    /// Ask for a value; on a parse failure print `complaint`.
    fn ask_parsed<T>(
        &mut self,
        question: &str,
        complaint: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Answer<T>> {
        let Some(answer) = self.ask(question)? else {
            return Ok(Answer::EndOfInput);
        };
        if let Some(value) = parse(&answer) {
            Ok(Answer::Value(value))
        } else {
            writeln!(self.out, "{complaint}")?;
            Ok(Answer::Invalid)
        }
    }

    fn ask_unit(&mut self, complaint: &str) -> Result<Answer<Unit>> {
        self.ask_parsed(UNIT_PROMPT, complaint, Unit::from_menu_choice)
    }

    fn ask_price(&mut self, question: &str) -> Result<Answer<f64>> {
        self.ask_parsed(
            question,
            "Invalid price. Please enter a positive number.",
            parse_price,
        )
    }

    // === Operations ===

    fn add_ingredient(&mut self) -> Result<()> {
        let Some(name) = self.ask("What's your ingredient name?")? else {
            return Ok(());
        };

        let Answer::Value(unit) =
            self.ask_unit("Invalid unit choice. Please enter 1, 2, or 3.")?
        else {
            return Ok(());
        };

        let Answer::Value(quantity) = self.ask_parsed(
            &format!("How many {unit} do you have?"),
            "Invalid number of units. Please enter a valid integer.",
            |s| s.parse::<u32>().ok(),
        )?
        else {
            return Ok(());
        };

        let Answer::Value(price) = self.ask_price("What price? Just the number")? else {
            return Ok(());
        };

        let Answer::Value(expires) = self.ask_parsed(
            "What is the expiration date? (YYYY-MM-DD)",
            "Invalid date format. Please enter a date in the format YYYY-MM-DD.",
            |s| parse_date(s).ok(),
        )?
        else {
            return Ok(());
        };

        match Ingredient::new(&name, unit, quantity, price, expires) {
            Ok(ingredient) => {
                self.pantry.add_ingredient(&ingredient)?;
                writeln!(self.out, "Ingredient added successfully!")?;
            }
            Err(e) => {
                writeln!(self.out, "Failed to add ingredient: {e}")?;
            }
        }
        Ok(())
    }

    fn remove_ingredient(&mut self) -> Result<()> {
        let Some(name) = self.ask("Enter the name of the ingredient you want to remove: ")?
        else {
            return Ok(());
        };
        if name.is_empty() {
            writeln!(self.out, "Ingredient name cannot be empty.")?;
            return Ok(());
        }
        if !self.pantry.inventory()?.contains(&name) {
            writeln!(self.out, "Ingredient not found.")?;
            return Ok(());
        }

        let Some(answer) = self.ask("Do you want to remove this ingredient? (yes/no)")? else {
            return Ok(());
        };
        match answer.to_lowercase().as_str() {
            "yes" => {}
            "no" => {
                writeln!(self.out, "Ingredient not removed!")?;
                return Ok(());
            }
            _ => {
                writeln!(self.out, "Invalid input!")?;
                return Ok(());
            }
        }

        let Some(units) = self.ask("How many units do you want to remove? (0 to remove all)")?
        else {
            return Ok(());
        };
        let units = match units.parse::<i64>() {
            Ok(n) if n < 0 => {
                writeln!(self.out, "Number of units must be a positive integer.")?;
                return Ok(());
            }
            Ok(n) => match u32::try_from(n) {
                Ok(n) => n,
                Err(_) => {
                    writeln!(self.out, "Invalid number of units. Please enter a valid integer.")?;
                    return Ok(());
                }
            },
            Err(_) => {
                writeln!(self.out, "Invalid number of units. Please enter a valid integer.")?;
                return Ok(());
            }
        };

        match self.pantry.remove_ingredient(&name, units) {
            Ok(removed) => writeln!(self.out, "Ingredient removed! ({removed} units)")?,
            Err(e) if e.is_not_found() => writeln!(self.out, "Failed to remove ingredient.")?,
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn show_ingredients(&mut self) -> Result<()> {
        let inventory = self.pantry.inventory()?;
        if inventory.is_empty() {
            writeln!(self.out, "No ingredients added yet")?;
            writeln!(self.out)?;
            return Ok(());
        }
        report::ingredient_table(&mut self.out, inventory.ingredients(), self.style, false)?;
        Ok(())
    }

    fn show_expired(&mut self) -> Result<()> {
        let inventory = self.pantry.inventory()?;
        if inventory.is_empty() {
            writeln!(self.out, "No ingredients added yet")?;
            writeln!(self.out)?;
            return Ok(());
        }
        let expired = inventory.expired(self.today);
        if expired.is_empty() {
            writeln!(self.out, "No expired goods.")?;
            return Ok(());
        }
        writeln!(self.out, "Expired goods: ")?;
        report::ingredient_table(&mut self.out, expired, self.style, true)?;
        Ok(())
    }

    /// Read one recipe ingredient; `None` means the entry was rejected and
    /// should be asked for again.
    fn ask_recipe_ingredient(&mut self) -> Result<Answer<Option<RecipeIngredient>>> {
        let Some(name) = self.ask("Enter the ingredient name: ")? else {
            return Ok(Answer::EndOfInput);
        };
        if name.is_empty() {
            writeln!(self.out, "Ingredient name cannot be empty.")?;
            return Ok(Answer::Value(None));
        }

        let unit = match self.ask_unit("Invalid choice. Please enter 1, 2, or 3.")? {
            Answer::Value(unit) => unit,
            Answer::Invalid => return Ok(Answer::Value(None)),
            Answer::EndOfInput => return Ok(Answer::EndOfInput),
        };

        let amount = match self.ask_parsed(
            &format!("How many {unit} do you need?"),
            "Amount must be a positive integer.",
            |s| s.parse::<u32>().ok().filter(|n| *n > 0),
        )? {
            Answer::Value(amount) => amount,
            Answer::Invalid => return Ok(Answer::Value(None)),
            Answer::EndOfInput => return Ok(Answer::EndOfInput),
        };

        let price = match self.ask_price("Enter the price per unit: ")? {
            Answer::Value(price) => price,
            Answer::Invalid => return Ok(Answer::Value(None)),
            Answer::EndOfInput => return Ok(Answer::EndOfInput),
        };

        match RecipeIngredient::new(&name, amount, unit, price) {
            Ok(ingredient) => Ok(Answer::Value(Some(ingredient))),
            Err(e) => {
                writeln!(self.out, "{e}")?;
                Ok(Answer::Value(None))
            }
        }
    }

    fn add_recipe(&mut self) -> Result<()> {
        let Some(recipe_name) = self.ask("Enter the name of the recipe: ")? else {
            return Ok(());
        };
        if recipe_name.is_empty() {
            writeln!(self.out, "Recipe name cannot be empty.")?;
            return Ok(());
        }

        let mut ingredients = Vec::new();
        loop {
            match self.ask_recipe_ingredient()? {
                Answer::Value(Some(ingredient)) => ingredients.push(ingredient),
                Answer::Value(None) | Answer::Invalid => continue,
                Answer::EndOfInput => return Ok(()),
            }

            let Some(more) = self.ask("Do you want to add more ingredients? (yes/no)")? else {
                return Ok(());
            };
            match more.to_lowercase().as_str() {
                "yes" => {}
                "no" => break,
                _ => {
                    writeln!(self.out, "Invalid input!")?;
                    return Ok(());
                }
            }
        }

        let Some(instructions) = self.ask("Enter the instructions for the recipe: ")? else {
            return Ok(());
        };

        let servings = match self.ask_parsed(
            "Enter the number of people: ",
            "Invalid number of people. Please enter a positive integer.",
            |s| s.parse::<u32>().ok().filter(|n| *n > 0),
        )? {
            Answer::Value(servings) => servings,
            Answer::Invalid | Answer::EndOfInput => return Ok(()),
        };

        match Recipe::new(&recipe_name, instructions, ingredients, servings) {
            Ok(recipe) => {
                if self.pantry.add_recipe(recipe)?.is_some() {
                    writeln!(self.out, "Recipe '{recipe_name}' replaced.")?;
                } else {
                    writeln!(self.out, "Recipe added successfully!")?;
                }
            }
            Err(e) => writeln!(self.out, "Failed to add recipe: {e}")?,
        }
        Ok(())
    }

    fn show_recipes(&mut self) -> Result<()> {
        let cookbook = self.pantry.cookbook()?;
        if cookbook.is_empty() {
            writeln!(self.out, "No recipes made yet")?;
            return Ok(());
        }
        for recipe in cookbook.recipes() {
            writeln!(self.out, "{recipe}")?;
        }
        Ok(())
    }

    fn recommend(&mut self) -> Result<()> {
        if self.pantry.cookbook()?.is_empty() {
            writeln!(self.out, "No recipes added yet")?;
            return Ok(());
        }
        let suggestions = self.pantry.suggest()?;
        if suggestions.is_empty() {
            writeln!(
                self.out,
                "No recipes can be made with the available ingredients."
            )?;
        } else {
            writeln!(self.out, "You can make the following recipes: ")?;
            writeln!(self.out)?;
            report::suggestions(&mut self.out, &suggestions, self.style)?;
        }
        Ok(())
    }
}

/// Parse a positive price, accepting `,` as the decimal separator.
fn parse_price(input: &str) -> Option<f64> {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{date, temp_pantry};
    use std::io::Cursor;

    fn run(pantry: &Pantry, script: &str) -> String {
        crate::logging::init_test_logging();
        let mut out = Vec::new();
        Menu::new(
            pantry,
            Cursor::new(script.to_string()),
            &mut out,
            Style::plain(),
            date(2024, 1, 1),
        )
        .run()
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_choice_from_number() {
        assert_eq!(Choice::from_number(1), Some(Choice::AddIngredient));
        assert_eq!(Choice::from_number(8), Some(Choice::Exit));
        assert_eq!(Choice::from_number(0), None);
        assert_eq!(Choice::from_number(9), None);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("2,5"), Some(2.5));
        assert_eq!(parse_price(" 3 "), Some(3.0));
        assert_eq!(parse_price("0"), None);
        assert_eq!(parse_price("-1"), None);
        assert_eq!(parse_price("abc"), None);
    }

    #[test]
    fn test_exit() {
        let (_dir, pantry) = temp_pantry();
        let out = run(&pantry, "8\n");
        assert!(out.starts_with("Welcome to the Food Storage System!"));
        assert!(out.trim_end().ends_with("Exiting"));
    }

    #[test]
    fn test_end_of_input_leaves_loop() {
        let (_dir, pantry) = temp_pantry();
        let out = run(&pantry, "");
        assert!(out.contains("What do you want to do?"));
    }

    #[test]
    fn test_invalid_choices() {
        let (_dir, pantry) = temp_pantry();
        let out = run(&pantry, "abc\n42\n8\n");
        assert!(out.contains("Invalid input, please try again"));
        assert!(out.contains("Invalid choice"));
    }

    #[test]
    fn test_add_ingredient() {
        let (_dir, pantry) = temp_pantry();
        let out = run(&pantry, "1\nSugar\n1\n500\n2,5\n2024-11-30\n8\n");
        assert!(out.contains("How many Gram do you have?"));
        assert!(out.contains("Ingredient added successfully!"));

        let sugar = pantry.inventory().unwrap().find("sugar").cloned().unwrap();
        assert_eq!(sugar.quantity, 500);
        assert!((sugar.price - 2.5).abs() < f64::EPSILON);
        assert_eq!(sugar.expiration_date, date(2024, 11, 30));
    }

    #[test]
    fn test_add_invalid_ingredient() {
        let (_dir, pantry) = temp_pantry();
        let out = run(&pantry, "1\nSugar\n1\nabc\n8\n");
        assert!(out.contains("Invalid number of units"));
        assert!(pantry.inventory().unwrap().is_empty());

        let out = run(&pantry, "1\nSugar\n1\n500\n2.5\n30/11/2024\n8\n");
        assert!(out.contains("Invalid date format"));
        assert!(pantry.inventory().unwrap().is_empty());

        let out = run(&pantry, "1\n\n1\n500\n2.5\n2024-11-30\n8\n");
        assert!(out.contains("Failed to add ingredient"));
        assert!(pantry.inventory().unwrap().is_empty());
    }

    #[test]
    fn test_remove_ingredient() {
        let (_dir, pantry) = temp_pantry();
        run(&pantry, "1\nSugar\n1\n500\n2.5\n2024-11-30\n8\n");

        let out = run(&pantry, "2\nSugar\nyes\n200\n8\n");
        assert!(out.contains("Ingredient removed! (200 units)"));
        assert_eq!(pantry.inventory().unwrap().find("Sugar").unwrap().quantity, 300);

        let out = run(&pantry, "2\nsugar\nyes\n0\n8\n");
        assert!(out.contains("Ingredient removed! (300 units)"));
        assert!(pantry.inventory().unwrap().is_empty());
    }

    #[test]
    fn test_remove_ingredient_rejections() {
        let (_dir, pantry) = temp_pantry();
        run(&pantry, "1\nSugar\n1\n500\n2.5\n2024-11-30\n8\n");

        assert!(run(&pantry, "2\n\n8\n").contains("Ingredient name cannot be empty."));
        assert!(run(&pantry, "2\nSalt\n8\n").contains("Ingredient not found."));
        assert!(run(&pantry, "2\nSugar\nno\n8\n").contains("Ingredient not removed!"));
        assert!(run(&pantry, "2\nSugar\nmaybe\n8\n").contains("Invalid input!"));
        assert!(run(&pantry, "2\nSugar\nyes\n-3\n8\n").contains("must be a positive integer"));
        assert_eq!(pantry.inventory().unwrap().find("Sugar").unwrap().quantity, 500);
    }

    #[test]
    fn test_show_ingredients() {
        let (_dir, pantry) = temp_pantry();
        assert!(run(&pantry, "3\n8\n").contains("No ingredients added yet"));

        run(&pantry, "1\nSugar\n1\n500\n2.5\n2024-11-30\n8\n");
        let out = run(&pantry, "3\n8\n");
        assert!(out.contains("Number of Units"));
        assert!(out.contains("Sugar"));
        assert!(out.contains("2024-11-30"));
    }

    #[test]
    fn test_expired_goods() {
        let (_dir, pantry) = temp_pantry();
        run(&pantry, "1\nMilk\n2\n2\n1.5\n2023-11-01\n8\n");
        run(&pantry, "1\nSugar\n1\n500\n2.5\n2024-11-30\n8\n");

        let out = run(&pantry, "4\n8\n");
        assert!(out.contains("Expired goods:"));
        assert!(out.contains("Milk"));
        assert!(!out.contains("Sugar"));
    }

    #[test]
    fn test_add_show_and_recommend_recipe() {
        let (_dir, pantry) = temp_pantry();
        assert!(run(&pantry, "6\n8\n").contains("No recipes made yet"));
        assert!(run(&pantry, "7\n8\n").contains("No recipes added yet"));

        let out = run(
            &pantry,
            "5\nOmelette\nEgg\n3\n3\n2\nyes\nMilk\n2\n1\n1,5\nno\nBeat and fry\n2\n8\n",
        );
        assert!(out.contains("Recipe added successfully!"));

        let out = run(&pantry, "6\n8\n");
        assert!(out.contains("Recipe Name: Omelette"));
        assert!(out.contains("Ingredient: Egg, Amount: 3 Pieces, Price: 2.0"));
        assert!(out.contains("Number of people: 2"));

        let out = run(&pantry, "7\n8\n");
        assert!(out.contains("No recipes can be made with the available ingredients."));

        run(&pantry, "1\nEgg\n3\n6\n30\n2030-01-01\n8\n");
        run(&pantry, "1\nmilk\n2\n1\n12\n2030-01-01\n8\n");
        let out = run(&pantry, "7\n8\n");
        assert!(out.contains("You can make the following recipes:"));
        assert!(out.contains("Recipe: Omelette, Total Price: 42.00"));
    }

    #[test]
    fn test_add_recipe_reprompts_bad_ingredient() {
        let (_dir, pantry) = temp_pantry();
        let out = run(
            &pantry,
            "5\nToast\n\nBread\n9\nBread\n3\n0\nBread\n3\n2\n1\nno\nToast it\n1\n8\n",
        );
        assert!(out.contains("Ingredient name cannot be empty."));
        assert!(out.contains("Invalid choice. Please enter 1, 2, or 3."));
        assert!(out.contains("Amount must be a positive integer."));
        assert!(out.contains("Recipe added successfully!"));

        let cookbook = pantry.cookbook().unwrap();
        assert_eq!(cookbook.get("Toast").unwrap().ingredients.len(), 1);
    }

    #[test]
    fn test_add_recipe_rejections() {
        let (_dir, pantry) = temp_pantry();
        assert!(run(&pantry, "5\n\n8\n").contains("Recipe name cannot be empty."));
        assert!(run(&pantry, "5\nToast\nBread\n3\n2\n1\nperhaps\n8\n").contains("Invalid input!"));
        assert!(run(&pantry, "5\nToast\nBread\n3\n2\n1\nno\nToast it\n0\n8\n")
            .contains("Invalid number of people"));
        assert!(pantry.cookbook().unwrap().is_empty());
    }

    #[test]
    fn test_replacing_recipe() {
        let (_dir, pantry) = temp_pantry();
        let script = "5\nToast\nBread\n3\n2\n1\nno\nToast it\n1\n8\n";
        run(&pantry, script);
        let out = run(&pantry, script);
        assert!(out.contains("Recipe 'Toast' replaced."));
        assert_eq!(pantry.cookbook().unwrap().len(), 1);
    }
}
