//! Finite lookup tables re-encoding categorical codes

use crate::constants::categories::{self, AGE_GROUPS, UNKNOWN};

/// Explicit code -> label mapping with a fallback label
///
/// Codes are compared trimmed and lowercased.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTable {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
    fallback: &'static str,
}

impl CategoryTable {
    pub const fn new(
        name: &'static str,
        entries: &'static [(&'static str, &'static str)],
        fallback: &'static str,
    ) -> Self {
        Self {
            name,
            entries,
            fallback,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn lookup(&self, raw: &str) -> Option<&'static str> {
        let code = raw.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, label)| *label)
    }

    /// Label for a raw code, the fallback when the code is not listed
    pub fn label(&self, raw: &str) -> &'static str {
        self.lookup(raw).unwrap_or(self.fallback)
    }

    pub fn is_known(&self, raw: &str) -> bool {
        self.lookup(raw).is_some()
    }
}

pub const GENDER: CategoryTable = CategoryTable::new("gender", categories::GENDER_CODES, UNKNOWN);

pub const SMOKER: CategoryTable = CategoryTable::new("smoker", categories::SMOKER_CODES, UNKNOWN);

pub const VISUAL_AID: CategoryTable =
    CategoryTable::new("visual aid", categories::VISUAL_AID_CODES, UNKNOWN);

/// Re-encode a raw code through one of the lookup tables
pub fn remap_category(table: &CategoryTable, raw: &str) -> String {
    table.label(raw).to_string()
}

/// Age group label for right-inclusive bins; ages outside every bin have none
pub fn age_group(age: f64) -> Option<&'static str> {
    AGE_GROUPS
        .iter()
        .find(|(lower, upper, _)| age > *lower && age <= *upper)
        .map(|(_, _, label)| *label)
}
