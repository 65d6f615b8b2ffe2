//! Line-oriented text formats for the data files.
//!
//! Both stores are written as human-readable text records and read back by
//! matching each line against anchored regular expressions:
//!
//! - **Ingredients**: one `Ingredient{name='..', unit='..', ...}` line per lot.
//! - **Recipes**: a block of `Recipe Name:`, `Ingredient:`, `Instructions:`
//!   and `Number of people:` lines, followed by a blank line.
//!
//! Lines that cannot be understood are skipped rather than failing the whole
//! file; every skipped line is reported in [`Parsed::skipped`].
//!
//! # Example
//!
//! ```
//! use pantry::format::ingredients;
//!
//! let text = "Ingredient{name='Sugar', unit='Gram', numberOfUnits=500, \
//!             price=2.5, expirationDate=2024-11-30}\n";
//! let parsed = ingredients::parse(text);
//! assert_eq!(parsed.items.len(), 1);
//! assert!(parsed.skipped.is_empty());
//! ```

pub mod ingredients;
pub mod recipes;

use tracing::warn;

/// A line that was ignored while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line: usize,
    /// Why the line was ignored.
    pub reason: String,
}

/// Result of parsing a data file.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    /// Records that were read successfully, in file order.
    pub items: Vec<T>,
    /// Lines that were ignored.
    pub skipped: Vec<SkippedLine>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> Parsed<T> {
    fn skip(&mut self, line: usize, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(line, %reason, "Skipping unreadable line");
        self.skipped.push(SkippedLine { line, reason });
    }
}

/// Flatten text onto one line so it cannot break the record structure.
#[must_use]
pub fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Iterate over numbered lines with any trailing `\r` removed.
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim_end_matches('\r')))
}
