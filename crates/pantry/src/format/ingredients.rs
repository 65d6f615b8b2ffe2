//! Ingredient file format.
//!
//! ```text
//! Ingredient{name='Milk', unit='Liter', numberOfUnits=2, price=1.5, expirationDate=2023-11-01}
//! ```

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{numbered_lines, single_line, Parsed};
use crate::model::{format_price, parse_date, Ingredient, Unit};

// The name group is greedy so names containing `'` still parse. Older files
// spell the quantity key `numberOfItems`.
static INGREDIENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Ingredient\{name='(?P<name>.+)', unit='(?P<unit>[^']*)', (?:numberOfUnits|numberOfItems)=(?P<quantity>\d+), price=(?P<price>\d+(?:\.\d+)?), expirationDate=(?P<date>\d{4}-\d{2}-\d{2})\}$",
    )
    .expect("ingredient line pattern is valid")
});

/// Render one lot as a data line (without the trailing newline).
#[must_use]
pub fn to_line(ingredient: &Ingredient) -> String {
    format!(
        "Ingredient{{name='{}', unit='{}', numberOfUnits={}, price={}, expirationDate={}}}",
        single_line(&ingredient.name),
        ingredient.unit,
        ingredient.quantity,
        format_price(ingredient.price),
        ingredient.expiration_date.format(crate::model::DATE_FORMAT)
    )
}

/// Render a whole file, one line per lot.
#[must_use]
pub fn render<'a>(ingredients: impl IntoIterator<Item = &'a Ingredient>) -> String {
    let mut out = String::new();
    for ingredient in ingredients {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}", to_line(ingredient));
    }
    out
}

/// Parse one data line.
///
/// # Errors
///
/// Returns a human-readable reason when the line is not a valid lot.
pub fn parse_line(line: &str) -> Result<Ingredient, String> {
    let caps = INGREDIENT_LINE
        .captures(line)
        .ok_or_else(|| "not an ingredient record".to_string())?;
    from_captures(&caps)
}

fn from_captures(caps: &Captures<'_>) -> Result<Ingredient, String> {
    let unit: Unit = caps["unit"].parse().map_err(|e| format!("{e}"))?;
    let quantity: u32 = caps["quantity"]
        .parse()
        .map_err(|e| format!("bad quantity '{}': {e}", &caps["quantity"]))?;
    let price: f64 = caps["price"]
        .parse()
        .map_err(|e| format!("bad price '{}': {e}", &caps["price"]))?;
    let expires = parse_date(&caps["date"]).map_err(|e| e.to_string())?;

    Ingredient::new(&caps["name"], unit, quantity, price, expires).map_err(|e| e.to_string())
}

/// Parse a whole ingredient file. Blank lines are ignored silently.
#[must_use]
pub fn parse(text: &str) -> Parsed<Ingredient> {
    let mut parsed = Parsed::default();
    for (number, line) in numbered_lines(text) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(ingredient) => parsed.items.push(ingredient),
            Err(reason) => parsed.skip(number, reason),
        }
    }
    parsed
}
