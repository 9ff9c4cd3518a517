//! Utility functions for working with source positions

use crate::types::Location;

/// Convert a byte offset to a Location with line and column info
///
/// Columns are counted in UTF-16 code units. Returns None if the offset is
/// out of bounds or does not fall on a character boundary.
pub fn offset_to_location(source: &str, offset: usize) -> Option<Location> {
    if offset > source.len() || !source.is_char_boundary(offset) {
        return None;
    }

    let mut row = 0;
    let mut column = 0;

    for ch in source[..offset].chars() {
        if ch == '\n' {
            row += 1;
            column = 0;
        } else {
            column += ch.len_utf16();
        }
    }

    Some(Location {
        offset,
        row,
        column,
    })
}

/// Convert line and UTF-16 column numbers to a byte offset
///
/// Line and column are 0-indexed. Returns None if out of bounds.
pub fn line_col_to_offset(source: &str, line: usize, col: usize) -> Option<usize> {
    let mut current_line = 0;
    let mut current_col = 0;
    let mut offset = 0;

    for ch in source.chars() {
        if current_line == line && current_col == col {
            return Some(offset);
        }

        if ch == '\n' {
            if current_line == line {
                return None;
            }
            current_line += 1;
            current_col = 0;
        } else {
            current_col += ch.len_utf16();
        }

        offset += ch.len_utf8();
    }

    if current_line == line && current_col == col {
        return Some(offset);
    }

    None
}

/// Convert a byte offset to a character (code point) offset.
///
/// Terminal renderers index sources by character rather than by byte.
pub fn char_offset(source: &str, byte_offset: usize) -> usize {
    let end = byte_offset.min(source.len());
    source
        .char_indices()
        .take_while(|(idx, _)| *idx < end)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_to_location_simple() {
        let source = "hello\nworld";

        let loc = offset_to_location(source, 0).unwrap();
        assert_eq!((loc.row, loc.column), (0, 0));

        let loc = offset_to_location(source, 3).unwrap();
        assert_eq!((loc.row, loc.column), (0, 3));

        let loc = offset_to_location(source, 6).unwrap();
        assert_eq!((loc.row, loc.column), (1, 0));

        let loc = offset_to_location(source, 9).unwrap();
        assert_eq!(loc.offset, 9);
        assert_eq!((loc.row, loc.column), (1, 3));
    }

    #[test]
    fn test_offset_to_location_out_of_bounds() {
        assert!(offset_to_location("hello", 100).is_none());
    }

    #[test]
    fn test_offset_to_location_utf16_columns() {
        // '𝄞' is one code point, four bytes, two UTF-16 units
        let source = "a𝄞b";
        let loc = offset_to_location(source, 5).unwrap();
        assert_eq!(loc.column, 3);
        assert!(offset_to_location(source, 2).is_none());
    }

    #[test]
    fn test_line_col_to_offset_simple() {
        let source = "hello\nworld";
        assert_eq!(line_col_to_offset(source, 0, 0), Some(0));
        assert_eq!(line_col_to_offset(source, 0, 3), Some(3));
        assert_eq!(line_col_to_offset(source, 1, 0), Some(6));
        assert_eq!(line_col_to_offset(source, 1, 3), Some(9));
    }

    #[test]
    fn test_line_col_to_offset_out_of_bounds() {
        let source = "hello\nworld";
        assert!(line_col_to_offset(source, 10, 0).is_none());
        assert!(line_col_to_offset(source, 0, 100).is_none());
    }

    #[test]
    fn test_line_col_to_offset_end() {
        assert_eq!(line_col_to_offset("hello", 0, 5), Some(5));
    }

    #[test]
    fn test_roundtrip() {
        let source = "hello\nwörld\ntest";
        for offset in [0, 3, 6, 10, 17] {
            let loc = offset_to_location(source, offset).unwrap();
            let back = line_col_to_offset(source, loc.row, loc.column).unwrap();
            assert_eq!(offset, back);
        }
    }

    #[test]
    fn test_char_offset() {
        let source = "aé𝄞b";
        assert_eq!(char_offset(source, 0), 0);
        assert_eq!(char_offset(source, 1), 1);
        assert_eq!(char_offset(source, 3), 2);
        assert_eq!(char_offset(source, 7), 3);
        assert_eq!(char_offset(source, 100), 4);
    }
}
