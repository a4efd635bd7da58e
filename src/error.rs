//! Error handling for lab data processing operations.
//!
//! Parse-level problems (short lines, unparseable cells) are never errors:
//! they become missing values. The variants here cover the failures that
//! abort a run: unreadable inputs, headers that cannot drive the parser,
//! invalid configuration, and output sinks that fail.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid header in file: {path} - {reason}")]
    InvalidHeader { path: PathBuf, reason: String },

    #[error("Required column '{column}' not found in {context}")]
    MissingColumn { column: String, context: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Statistics collaborator failed: {reason}")]
    Statistics { reason: String },

    #[error("Chart rendering failed for {path}: {reason}")]
    Chart { path: PathBuf, reason: String },
}

impl LabError {
    pub fn missing_column(column: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            context: context.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LabError>;
