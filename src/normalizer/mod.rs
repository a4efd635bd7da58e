//! Normalization of parsed records into typed rows
//!
//! ## Architecture
//!
//! - [`numeric`] - Locale-aware number parsing, missing-value tokens
//! - [`dates`] - German and ISO date parsing, join-key dates
//! - [`categories`] - Finite lookup tables with fallbacks, age groups, region labels
//! - [`fill`] - Forward-fill of sparse metadata columns
//! - [`lipase`] - Group keys for block measurements
//! - [`participants`] - Participant lists and the tactile join
//!
//! After this stage every missing value is `None`.

pub mod categories;
pub mod dates;
pub mod fill;
pub mod lipase;
pub mod numeric;
pub mod participants;

#[cfg(test)]
pub mod tests;

pub use categories::{CategoryTable, age_group, remap_category};
pub use dates::{date_key, parse_date};
pub use fill::forward_fill_records;
pub use lipase::{lipase_readings, resolve_group_columns};
pub use numeric::{canonical_identifier, parse_locale_number};
pub use participants::{JoinStats, index_participants, normalize_participants, tactile_observations};
