/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for SJSON parsing.

use sjson_source_map::Range;
use thiserror::Error;

/// Stable diagnostic codes emitted by this crate.
///
/// The titles and message templates live in the error catalog of
/// `sjson-error-reporting`.
pub mod codes {
    pub const UNEXPECTED_CHARACTER: &str = "S-1-1";
    pub const UNTERMINATED_STRING: &str = "S-1-2";
    pub const UNTERMINATED_COMMENT: &str = "S-1-3";
    pub const MISSING_SEPARATOR: &str = "S-1-4";
    pub const UNTERMINATED_CONTAINER: &str = "S-1-5";
    pub const DUPLICATE_KEY: &str = "S-1-6";
    pub const INVALID_NUMBER: &str = "S-1-7";
    pub const LIMIT_EXCEEDED: &str = "S-1-8";
    pub const TRAILING_CONTENT: &str = "S-1-9";

    pub const INVALID_SECTION_NAME: &str = "S-2-1";
    pub const HEADER_NOT_ARRAY: &str = "S-2-2";
    pub const ROW_TOO_LONG: &str = "S-2-3";
    pub const MISSING_CELL: &str = "S-2-4";
    pub const PART_NOT_OBJECT: &str = "S-2-5";
    pub const DUPLICATE_ROW_ID: &str = "S-2-6";
    pub const ROOT_NOT_OBJECT: &str = "S-2-7";
}

/// The first fatal condition hit while parsing.
///
/// Accumulating parses store it on the document; strict parses return it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {}:{}", .range.start.row + 1, .range.start.column + 1)]
pub struct ParseError {
    pub message: String,
    pub code: String,
    pub range: Range,
}

/// Errors returned by the fallible entry points of this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for SJSON operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use sjson_source_map::Location;

    #[test]
    fn test_display_is_one_based() {
        let err = ParseError {
            message: "Unterminated string".to_string(),
            code: codes::UNTERMINATED_STRING.to_string(),
            range: Range::new(Location::new(4, 0, 4), Location::new(9, 0, 9)),
        };
        assert_eq!(err.to_string(), "Unterminated string at 1:5");
        assert_eq!(
            Error::from(err).to_string(),
            "Parse error: Unterminated string at 1:5"
        );
    }
}
