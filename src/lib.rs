//! Biolab Processor Library
//!
//! Tidy-up and analysis of classroom biology lab exports.
//!
//! This library provides tools for:
//! - Reconstructing tidy records from block-structured CSV exports where
//!   metadata is only written on the first line of each block
//! - Locale-aware numeric cleaning, category remapping and forward-fill
//! - Joining measurements with participant lists
//! - Descriptive statistics, t-tests, one-way ANOVA and correlations
//! - Writing CSV tables, PNG charts and plain-text reports

pub mod analysis;
pub mod block_parser;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::AnalysisConfig;
pub use error::{LabError, Result};
pub use models::{Experiment, ProcessingStats};
pub use pipeline::LabProcessor;
