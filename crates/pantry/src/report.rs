//! Terminal rendering of inventory listings and suggestions.

use std::io::{self, Write};

use serde::Serialize;

use crate::cookbook::Suggestion;
use crate::error::Result;
use crate::model::Ingredient;

const RED: &str = "\u{1b}[31m";
const GREEN: &str = "\u{1b}[32m";
const RESET: &str = "\u{1b}[0m";

const RULE_WIDTH: usize = 86;

/// How a listing is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Emit ANSI colour codes.
    pub color: bool,
}

impl Style {
    /// Plain style, no colours.
    #[must_use]
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(self, text: &str, code: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

/// Write lots as a fixed-width table.
///
/// With `expired_in_red` the expiration column is painted red (when the style
/// allows colour).
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn ingredient_table<'a, W: Write>(
    out: &mut W,
    lots: impl IntoIterator<Item = &'a Ingredient>,
    style: Style,
    expired_in_red: bool,
) -> io::Result<()> {
    writeln!(
        out,
        "{:<20} {:<20} {:<10} {:<10} {:<15}",
        "Name", "Number of Units", "Unit", "Price", "Expiration Date"
    )?;
    rule(out)?;
    for lot in lots {
        let date = format!("{:<15}", lot.expiration_date.to_string());
        let date = if expired_in_red {
            style.paint(&date, RED)
        } else {
            date
        };
        writeln!(
            out,
            "{:<20} {:<20} {:<10} {:<10.2} {}",
            lot.name, lot.quantity, lot.unit.as_str(), lot.price, date
        )?;
    }
    rule(out)?;
    writeln!(out)
}

/// Write one line per lot, without table framing.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn ingredient_lines<'a, W: Write>(
    out: &mut W,
    lots: impl IntoIterator<Item = &'a Ingredient>,
) -> io::Result<()> {
    for lot in lots {
        writeln!(out, "{lot}")?;
    }
    Ok(())
}

/// Write suggestions, one per paragraph, green when the style allows.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn suggestions<W: Write>(out: &mut W, items: &[Suggestion], style: Style) -> io::Result<()> {
    for item in items {
        writeln!(out, "{}", style.paint(&item.to_string(), GREEN))?;
        writeln!(out)?;
    }
    Ok(())
}

/// Write any listing as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns [`crate::Error::Json`] if the value cannot be serialized, or an
/// I/O error if writing to `out` fails.
pub fn json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
