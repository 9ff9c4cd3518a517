//! Source positions for SJSON documents
//!
//! This crate provides the location types shared by the SJSON parser, the
//! table interpreter and the diagnostics layer. Every parsed node and every
//! diagnostic carries one of these ranges so that an editor can map data
//! back to the text it came from.
//!
//! # Overview
//!
//! The core types are:
//! - [`Location`]: A byte offset plus a 0-based row and UTF-16 column
//! - [`Range`]: A start/end pair of locations
//! - [`SourceInfo`]: A range tagged with the file it belongs to
//! - [`SourceContext`]: Registers files so that ranges can be rendered
//!
//! # Example
//!
//! ```rust
//! use sjson_source_map::*;
//!
//! let mut ctx = SourceContext::new();
//! let file_id = ctx.add_file("truck.jbeam".into(), Some("{a:1}".into()));
//!
//! let range = Range {
//!     start: Location { offset: 0, row: 0, column: 0 },
//!     end: Location { offset: 5, row: 0, column: 5 },
//! };
//! let info = SourceInfo::new(Some(file_id), range);
//!
//! assert_eq!(info.range, range);
//! assert!(info.range.contains(0, 5));
//! ```

pub mod context;
pub mod source_info;
pub mod types;
pub mod utils;

pub use context::{SourceContext, SourceFile};
pub use source_info::SourceInfo;
pub use types::{FileId, Location, Range};
pub use utils::{char_offset, line_col_to_offset, offset_to_location};
