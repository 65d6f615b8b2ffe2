//! Error types for pantry.
//!
//! This module defines all error types used throughout the pantry crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for pantry operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Inventory Errors ===
    /// An ingredient was rejected before it reached the inventory.
    #[error("invalid ingredient: {message}")]
    InvalidIngredient {
        /// Description of the validation failure.
        message: String,
    },

    /// No stocked ingredient carries the requested name.
    #[error("ingredient not found: {name}")]
    IngredientNotFound {
        /// The name that was looked up.
        name: String,
    },

    // === Cookbook Errors ===
    /// A recipe was rejected before it reached the cookbook.
    #[error("invalid recipe: {message}")]
    InvalidRecipe {
        /// Description of the validation failure.
        message: String,
    },

    /// No recipe carries the requested name.
    #[error("recipe not found: {name}")]
    RecipeNotFound {
        /// The name that was looked up.
        name: String,
    },

    // === Parsing Errors ===
    /// A unit string is not one of the known units.
    #[error("unknown unit '{0}' (expected Gram, Liter or Pieces)")]
    InvalidUnit(String),

    /// A date string is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date '{input}': {source}")]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// The underlying error.
        #[source]
        source: chrono::ParseError,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or write a data file.
    #[error("failed to access {path}: {source}")]
    DataFile {
        /// Path of the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for pantry operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid ingredient error.
    #[must_use]
    pub fn invalid_ingredient(message: impl Into<String>) -> Self {
        Self::InvalidIngredient {
            message: message.into(),
        }
    }

    /// Create an invalid recipe error.
    #[must_use]
    pub fn invalid_recipe(message: impl Into<String>) -> Self {
        Self::InvalidRecipe {
            message: message.into(),
        }
    }

    /// Create an ingredient not found error.
    #[must_use]
    pub fn ingredient_not_found(name: impl Into<String>) -> Self {
        Self::IngredientNotFound { name: name.into() }
    }

    /// Create a recipe not found error.
    #[must_use]
    pub fn recipe_not_found(name: impl Into<String>) -> Self {
        Self::RecipeNotFound { name: name.into() }
    }

    /// Create a data file error for the given path.
    #[must_use]
    pub fn data_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DataFile {
            path: path.into(),
            source,
        }
    }

    /// Check if this error means a looked-up ingredient or recipe is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::IngredientNotFound { .. } | Self::RecipeNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ingredient_not_found("Sugar");
        assert_eq!(err.to_string(), "ingredient not found: Sugar");

        let err = Error::recipe_not_found("Apple Pie");
        assert_eq!(err.to_string(), "recipe not found: Apple Pie");
    }

    #[test]
    fn test_error_is_not_found() {
        assert!(Error::ingredient_not_found("x").is_not_found());
        assert!(Error::recipe_not_found("x").is_not_found());
        assert!(!Error::invalid_recipe("x").is_not_found());
    }

    #[test]
    fn test_invalid_unit_display() {
        let err = Error::InvalidUnit("Cups".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Cups"));
        assert!(msg.contains("Gram"));
    }

    #[test]
    fn test_invalid_date_display() {
        let source = chrono::NaiveDate::parse_from_str("2024-13-01", "%Y-%m-%d").unwrap_err();
        let err = Error::InvalidDate {
            input: "2024-13-01".to_string(),
            source,
        };
        assert!(err.to_string().contains("2024-13-01"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "recipes_file must not be empty".to_string(),
        };
        assert!(err.to_string().contains("recipes_file"));
    }

    #[test]
    fn test_data_file_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::data_file("/root/ingredients.txt", io_err);
        let msg = err.to_string();
        assert!(msg.contains("/root/ingredients.txt"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
