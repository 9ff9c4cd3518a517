//! Core types for source positions

use serde::{Deserialize, Serialize};

/// A unique identifier for a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub usize);

/// A location in source text (0-indexed)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Location {
    /// Byte offset from start of source
    pub offset: usize,
    /// Row number (0-indexed)
    pub row: usize,
    /// Column number (0-indexed, in UTF-16 code units)
    pub column: usize,
}

impl Location {
    /// Create a location from its three coordinates.
    pub fn new(offset: usize, row: usize, column: usize) -> Self {
        Self {
            offset,
            row,
            column,
        }
    }
}

/// A range in source text from start to end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    /// Start location (inclusive)
    pub start: Location,
    /// End location (just past the last character)
    pub end: Location,
}

impl Range {
    /// Create a range from two locations.
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// A zero-width range at `location`.
    pub fn point(location: Location) -> Self {
        Self {
            start: location,
            end: location,
        }
    }

    /// Check whether a (row, column) position falls inside this range.
    ///
    /// The row must lie in `[start.row, end.row]`. On the start row the
    /// column must be at or after `start.column`; on the end row it must be
    /// at or before `end.column`, so the end column is inclusive.
    pub fn contains(&self, row: usize, column: usize) -> bool {
        if row < self.start.row || row > self.end.row {
            return false;
        }
        if row == self.start.row && column < self.start.column {
            return false;
        }
        if row == self.end.row && column > self.end.column {
            return false;
        }
        true
    }

    /// Check whether `other` lies entirely within this range.
    pub fn encloses(&self, other: &Range) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }

    /// Whether the range spans more than one line.
    pub fn is_multiline(&self) -> bool {
        self.end.row > self.start.row
    }

    /// Length of the range in bytes.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Check if this range is empty (zero-width).
    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// `[startLine, startCol, endLine, endCol]`, the shape editors consume.
    pub fn to_array(&self) -> [usize; 4] {
        [
            self.start.row,
            self.start.column,
            self.end.row,
            self.end.column,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(sr: usize, sc: usize, er: usize, ec: usize) -> Range {
        Range {
            start: Location {
                offset: 0,
                row: sr,
                column: sc,
            },
            end: Location {
                offset: 0,
                row: er,
                column: ec,
            },
        }
    }

    #[test]
    fn test_file_id_equality() {
        assert_eq!(FileId(0), FileId(0));
        assert_ne!(FileId(0), FileId(1));
    }

    #[test]
    fn test_location_ordering() {
        let loc1 = Location::new(0, 0, 0);
        let loc2 = Location::new(5, 0, 5);
        let loc3 = Location::new(10, 1, 0);

        assert!(loc1 < loc2);
        assert!(loc2 < loc3);
        assert!(loc1 < loc3);
    }

    #[test]
    fn test_contains_single_line() {
        let r = range(2, 4, 2, 9);
        assert!(r.contains(2, 4));
        assert!(r.contains(2, 6));
        assert!(r.contains(2, 9));
        assert!(!r.contains(2, 3));
        assert!(!r.contains(2, 10));
        assert!(!r.contains(1, 5));
        assert!(!r.contains(3, 5));
    }

    #[test]
    fn test_contains_multi_line() {
        let r = range(1, 10, 4, 2);
        assert!(r.contains(1, 10));
        assert!(r.contains(2, 0));
        assert!(r.contains(3, 500));
        assert!(r.contains(4, 2));
        assert!(!r.contains(1, 9));
        assert!(!r.contains(4, 3));
    }

    #[test]
    fn test_encloses() {
        let outer = Range::new(Location::new(0, 0, 0), Location::new(20, 1, 5));
        let inner = Range::new(Location::new(3, 0, 3), Location::new(8, 0, 8));
        assert!(outer.encloses(&inner));
        assert!(!inner.encloses(&outer));
        assert!(outer.encloses(&outer));
    }

    #[test]
    fn test_len_and_empty() {
        let r = Range::new(Location::new(3, 0, 3), Location::new(8, 0, 8));
        assert_eq!(r.len(), 5);
        assert!(!r.is_empty());
        assert!(Range::point(Location::new(3, 0, 3)).is_empty());
    }

    #[test]
    fn test_to_array() {
        assert_eq!(range(1, 2, 3, 4).to_array(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_serialization_range() {
        let range = Range::new(Location::new(0, 0, 0), Location::new(50, 2, 10));
        let json = serde_json::to_string(&range).unwrap();
        let deserialized: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(range, deserialized);
    }
}
