//! Recipe file format.
//!
//! ```text
//! Recipe Name: Pancakes
//! Ingredient: Flour, Amount: 200 Gram, Price: 0.02
//! Ingredient: Milk, Amount: 1 Liter, Price: 1.5
//! Instructions: Whisk and fry
//! Number of people: 4
//!
//! ```

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{numbered_lines, single_line, Parsed};
use crate::model::{format_price, Recipe, RecipeIngredient, Unit};

static RECIPE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Recipe Name:\s*(?P<name>.+)$").expect("recipe name pattern is valid")
});

static INGREDIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Ingredient: (?P<name>.+), Amount: (?P<amount>\d+) (?P<unit>\S+), Price: (?P<price>\d+(?:\.\d+)?)$",
    )
    .expect("recipe ingredient pattern is valid")
});

static INSTRUCTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Instructions:\s?(?P<text>.*)$").expect("instructions pattern is valid")
});

static SERVINGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Number of people:\s*(?P<servings>\d+)$").expect("servings pattern is valid")
});

/// Header line of the display form; carries no data.
const INGREDIENTS_HEADER: &str = "Ingredients:";

/// Render one recipe block, including the blank separator line.
#[must_use]
pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Recipe Name: {}", single_line(&recipe.name));
    for ingredient in &recipe.ingredients {
        let _ = writeln!(
            out,
            "Ingredient: {}, Amount: {} {}, Price: {}",
            single_line(&ingredient.name),
            ingredient.amount,
            ingredient.unit,
            format_price(ingredient.price)
        );
    }
    let _ = writeln!(out, "Instructions: {}", single_line(&recipe.instructions));
    let _ = writeln!(out, "Number of people: {}", recipe.servings);
    out.push('\n');
    out
}

/// Render a whole recipe file.
#[must_use]
pub fn render<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> String {
    recipes.into_iter().map(render_recipe).collect()
}

fn parse_ingredient(line: &str) -> Option<Result<RecipeIngredient, String>> {
    INGREDIENT
        .captures(line)
        .map(|caps| ingredient_from_captures(&caps))
}

fn ingredient_from_captures(caps: &Captures<'_>) -> Result<RecipeIngredient, String> {
    let unit: Unit = caps["unit"].parse().map_err(|e| format!("{e}"))?;
    let amount: u32 = caps["amount"]
        .parse()
        .map_err(|e| format!("bad amount '{}': {e}", &caps["amount"]))?;
    let price: f64 = caps["price"]
        .parse()
        .map_err(|e| format!("bad price '{}': {e}", &caps["price"]))?;
    RecipeIngredient::new(&caps["name"], amount, unit, price).map_err(|e| e.to_string())
}

/// A recipe block being read.
#[derive(Debug)]
struct Draft {
    line: usize,
    name: String,
    ingredients: Vec<RecipeIngredient>,
    instructions: Option<String>,
    servings: Option<u32>,
}

impl Draft {
    fn new(line: usize, name: &str) -> Self {
        Self {
            line,
            name: name.trim().to_string(),
            ingredients: Vec::new(),
            instructions: None,
            servings: None,
        }
    }

    fn finish(self, parsed: &mut Parsed<Recipe>) {
        let line = self.line;
        match Recipe::new(
            &self.name,
            self.instructions.unwrap_or_default(),
            self.ingredients,
            self.servings.unwrap_or(1),
        ) {
            Ok(recipe) => parsed.items.push(recipe),
            Err(e) => parsed.skip(line, e.to_string()),
        }
    }
}

/// Parse a whole recipe file.
///
/// A `Recipe Name:` line starts a new recipe and finishes the previous one.
/// Recipe lines that appear before any name are skipped.
#[must_use]
pub fn parse(text: &str) -> Parsed<Recipe> {
    let mut parsed = Parsed::default();
    let mut draft: Option<Draft> = None;

    for (number, line) in numbered_lines(text) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == INGREDIENTS_HEADER {
            continue;
        }

        if let Some(caps) = RECIPE_NAME.captures(line) {
            if let Some(done) = draft.take() {
                done.finish(&mut parsed);
            }
            draft = Some(Draft::new(number, &caps["name"]));
            continue;
        }

        let Some(current) = draft.as_mut() else {
            parsed.skip(number, "line outside of any recipe");
            continue;
        };

        if let Some(result) = parse_ingredient(line) {
            match result {
                Ok(ingredient) => current.ingredients.push(ingredient),
                Err(reason) => parsed.skip(number, reason),
            }
        } else if let Some(caps) = INSTRUCTIONS.captures(line) {
            current.instructions = Some(caps["text"].trim().to_string());
        } else if let Some(caps) = SERVINGS.captures(line) {
            match caps["servings"].parse::<u32>() {
                Ok(servings) => current.servings = Some(servings),
                Err(e) => parsed.skip(number, format!("bad number of people: {e}")),
            }
        } else {
            parsed.skip(number, "not a recipe record");
        }
    }

    if let Some(done) = draft {
        done.finish(&mut parsed);
    }
    parsed
}
