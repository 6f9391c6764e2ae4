//! Error handling for streamplot
//!
//! This module defines custom error types and a Result alias for use
//! throughout the crate.

use thiserror::Error;

/// Main error type for streamplot operations
#[derive(Error, Debug)]
pub enum PlotError {
    /// A row was inserted with the wrong number of values
    #[error("Row width mismatch: table has {expected} columns, got {actual} values")]
    RowWidthMismatch { expected: usize, actual: usize },

    /// A named column was added twice
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column lookup by name found nothing
    #[error("No column named '{0}'")]
    ColumnNotFound(String),

    /// A configuration call arrived after streaming had started
    #[error("Plotter already started")]
    AlreadyStarted,

    /// Errors reported by the render surface
    #[error("Surface error: {0}")]
    Surface(String),

    /// The render thread exited abnormally
    #[error("Render thread error: {0}")]
    RenderThread(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PlotError>,
    },
}

impl PlotError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PlotError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for streamplot operations
pub type Result<T> = std::result::Result<T, PlotError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlotError::ColumnNotFound("Sine".to_string());
        assert_eq!(err.to_string(), "No column named 'Sine'");
    }

    #[test]
    fn test_row_width_mismatch_display() {
        let err = PlotError::RowWidthMismatch {
            expected: 3,
            actual: 2,
        };
        assert!(err.to_string().contains("3 columns"));
        assert!(err.to_string().contains("2 values"));
    }

    #[test]
    fn test_error_with_context() {
        let err = PlotError::Config("missing field".to_string());
        let with_ctx = err.with_context("Failed to load plotter config");
        assert!(with_ctx.to_string().contains("Failed to load plotter config"));
    }
}
