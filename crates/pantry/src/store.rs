//! File persistence for the ingredient and recipe stores.
//!
//! Each store lives in its own text file (see [`crate::format`]). Whole-file
//! saves go through a uniquely named temporary file in the same directory
//! that is synced and renamed into place, so an interrupted save leaves the
//! previous contents intact.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::cookbook::CookBook;
use crate::error::{Error, Result};
use crate::format::{self, Parsed};
use crate::inventory::Inventory;
use crate::model::Ingredient;

/// Locations of the two data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    /// Ingredient store.
    pub ingredients: PathBuf,
    /// Recipe store.
    pub recipes: PathBuf,
}

impl DataFiles {
    /// Both files inside `dir` with their default names.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            ingredients: dir.join("ingredients.txt"),
            recipes: dir.join("recipes.txt"),
        }
    }
}

/// Read a data file; a missing file reads as empty.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn read_raw(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No data file at {}", path.display());
            Ok(String::new())
        }
        Err(e) => Err(Error::data_file(path, e)),
    }
}

fn report_skipped<T>(path: &Path, parsed: &Parsed<T>) {
    if !parsed.skipped.is_empty() {
        warn!(
            "Ignored {} unreadable line(s) in {}",
            parsed.skipped.len(),
            path.display()
        );
    }
}

/// Load the ingredient store.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_inventory(path: &Path) -> Result<Inventory> {
    let parsed = format::ingredients::parse(&read_raw(path)?);
    report_skipped(path, &parsed);
    debug!(lots = parsed.items.len(), "Loaded inventory from {}", path.display());
    Ok(parsed.items.into_iter().collect())
}

/// Load the recipe store.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_cookbook(path: &Path, name: &str) -> Result<CookBook> {
    let parsed = format::recipes::parse(&read_raw(path)?);
    report_skipped(path, &parsed);
    debug!(recipes = parsed.items.len(), "Loaded cookbook from {}", path.display());
    let mut cookbook = CookBook::new(name);
    cookbook.extend(parsed.items);
    Ok(cookbook)
}

/// Create the directory holding `path` if needed and return it.
fn ensure_parent(path: &Path) -> Result<PathBuf> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !parent.exists() {
        fs::create_dir_all(&parent).map_err(|source| Error::DirectoryCreate {
            path: parent.clone(),
            source,
        })?;
    }
    Ok(parent)
}

/// Replace a file's contents through a temporary file in the same directory.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = ensure_parent(path)?;
    let mut temp = NamedTempFile::new_in(&dir).map_err(|e| Error::data_file(&dir, e))?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| Error::data_file(path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::data_file(path, e))?;
    temp.persist(path)
        .map_err(|e| Error::data_file(path, e.error))?;
    Ok(())
}

/// Check whether a non-empty file lacks a trailing newline.
fn missing_final_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Rewrite the ingredient store.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_inventory(path: &Path, inventory: &Inventory) -> Result<()> {
    write_atomic(path, &format::ingredients::render(inventory.ingredients()))?;
    info!(lots = inventory.len(), "Saved inventory to {}", path.display());
    Ok(())
}

/// Rewrite the recipe store.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_cookbook(path: &Path, cookbook: &CookBook) -> Result<()> {
    write_atomic(path, &format::recipes::render(cookbook.recipes()))?;
    info!(recipes = cookbook.len(), "Saved cookbook to {}", path.display());
    Ok(())
}

/// Append one lot to the ingredient store.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn append_ingredient(path: &Path, ingredient: &Ingredient) -> Result<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::data_file(path, e))?;

    let mut record = String::new();
    if missing_final_newline(&mut file).map_err(|e| Error::data_file(path, e))? {
        debug!("Terminating last line of {}", path.display());
        record.push('\n');
    }
    record.push_str(&format::ingredients::to_line(ingredient));
    record.push('\n');
    file.write_all(record.as_bytes())
        .map_err(|e| Error::data_file(path, e))?;
    info!(name = %ingredient.name, "Appended ingredient to {}", path.display());
    Ok(())
}
