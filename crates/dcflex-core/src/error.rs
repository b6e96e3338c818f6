//! Unified error types for the dcflex ecosystem
//!
//! This module provides a common error type [`DcflexError`] that can represent
//! errors from any part of the system. Domain-specific error types can be
//! converted to `DcflexError` for uniform error handling at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use dcflex_core::{DcflexError, DcflexResult};
//!
//! fn run_scenario(path: &str) -> DcflexResult<()> {
//!     let scenario = load_scenario(path)?;
//!     solve(&scenario, None)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all dcflex operations.
///
/// This enum provides a common error representation across scenario loading,
/// validation, model building, and solving, allowing errors to be handled
/// uniformly at the CLI boundary.
#[derive(Error, Debug)]
pub enum DcflexError {
    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Scenario validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Solver backend errors
    #[error("Solver error: {0}")]
    Solver(String),

    /// The optimization model has no feasible solution
    #[error("Infeasible: {0}")]
    Infeasible(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using DcflexError.
pub type DcflexResult<T> = Result<T, DcflexError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for DcflexError {
    fn from(err: anyhow::Error) -> Self {
        DcflexError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for DcflexError {
    fn from(s: String) -> Self {
        DcflexError::Other(s)
    }
}

impl From<&str> for DcflexError {
    fn from(s: &str) -> Self {
        DcflexError::Other(s.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for DcflexError {
    fn from(err: serde_json::Error) -> Self {
        DcflexError::Parse(err.to_string())
    }
}
