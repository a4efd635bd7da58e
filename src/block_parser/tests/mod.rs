//! Test fixtures for block parser testing
//!
//! Provides the lipase header layout and helpers to turn inline CSV text
//! into raw lines the way the loader would.

use super::BlockParser;
use crate::models::HeaderSchema;


/// Header of the classroom lipase export
pub const LIPASE_HEADER: &str = "Datum,Stdgang,Gruppe,Zeit,gekocht,ungekocht";

/// Split inline content into owned raw lines
pub fn raw_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

/// Parser over the lipase header with comma delimiter
pub fn lipase_parser() -> BlockParser {
    let schema = HeaderSchema::new(
        LIPASE_HEADER
            .split(',')
            .map(str::to_string)
            .collect(),
    );
    BlockParser::new(schema, "Zeit", b',').unwrap()
}
