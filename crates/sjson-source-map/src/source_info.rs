//! Source information attached to diagnostics

use crate::types::{FileId, Location, Range};
use serde::{Deserialize, Serialize};

/// A range in a (possibly anonymous) source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceInfo {
    /// The file the range belongs to, when it was registered in a [`SourceContext`](crate::SourceContext)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<FileId>,
    /// The range in that file
    pub range: Range,
}

impl SourceInfo {
    /// Create source info for a range, optionally tied to a file.
    pub fn new(file_id: Option<FileId>, range: Range) -> Self {
        SourceInfo { file_id, range }
    }

    /// Create source info for a range in a registered file.
    pub fn original(file_id: FileId, range: Range) -> Self {
        SourceInfo {
            file_id: Some(file_id),
            range,
        }
    }

    /// Source info that is not tied to any registered file.
    pub fn anonymous(range: Range) -> Self {
        SourceInfo {
            file_id: None,
            range,
        }
    }

    /// Start byte offset.
    pub fn start_offset(&self) -> usize {
        self.range.start.offset
    }

    /// End byte offset.
    pub fn end_offset(&self) -> usize {
        self.range.end.offset
    }

    /// Length in bytes.
    pub fn length(&self) -> usize {
        self.range.len()
    }

    /// Start location.
    pub fn start(&self) -> Location {
        self.range.start
    }
}

impl From<Range> for SourceInfo {
    fn from(range: Range) -> Self {
        SourceInfo::anonymous(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original() {
        let range = Range::new(Location::new(2, 0, 2), Location::new(7, 0, 7));
        let info = SourceInfo::original(FileId(3), range);
        assert_eq!(info.file_id, Some(FileId(3)));
        assert_eq!(info.start_offset(), 2);
        assert_eq!(info.end_offset(), 7);
        assert_eq!(info.length(), 5);
    }

    #[test]
    fn test_anonymous_skips_file_id_in_json() {
        let info = SourceInfo::from(Range::default());
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("file_id"));
    }
}
