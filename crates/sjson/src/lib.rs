/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! # sjson
//!
//! Parser and table interpreter for SJSON, the relaxed JSON dialect used for
//! vehicle part definitions: comments are allowed, commas are optional, keys
//! may be unquoted and `=` works as well as `:`.
//!
//! ## Design
//!
//! - [`parse`] produces a [`Document`]: the data tree, a flat arena of
//!   [`Node`] records in emission order with exact source ranges, a line
//!   index over that arena, and every diagnostic. Bad input never panics;
//!   the parse stops at the first fatal error and keeps the partial tree.
//! - [`position`] and [`breadcrumbs`] answer "what is under the cursor" on
//!   the raw parse; [`structured`] does the same on materialized output.
//! - [`tables`] turns table sections into keyed rows, as a pure transform.
//!
//! ## Example
//!
//! ```rust
//! let doc = sjson::parse(r#"
//! body: {
//!     nodes: [
//!         ["id" "posX" "posY" "posZ"]
//!         ["n1" 0 1 2]
//!     ]
//! }
//! "#);
//! assert!(doc.diagnostics().is_empty());
//!
//! let materialized = sjson::materialize_all(&doc);
//! let nodes = materialized.part("body").and_then(|p| p.table("nodes")).unwrap();
//! assert_eq!(nodes.rows["n1"].get("posY").and_then(|v| v.as_f64()), Some(1.0));
//! ```

pub mod breadcrumbs;
pub mod document;
pub mod error;
pub mod node;
pub mod options;
pub mod parser;
pub mod position;
pub mod structured;
pub mod tables;
pub mod value;

pub use breadcrumbs::{BreadcrumbCache, BreadcrumbItem, Breadcrumbs, breadcrumbs, breadcrumbs_at};
pub use document::Document;
pub use error::{Error, ParseError, Result, codes};
pub use node::{Node, NodeId, NodeKind, PathSegment};
pub use options::ParseOptions;
pub use parser::{parse, parse_strict, parse_value, parse_with_options};
pub use position::{LineIndex, previous_node, query_at};
pub use tables::{
    MaterializedDocument, Materializer, Part, Section, Table, materialize_all, materialize_part,
};
pub use value::{META_KEY, NodeRef, Object, Value, ValueKind};

// Re-exported so callers can hold diagnostics and locations without extra
// dependencies.
pub use sjson_error_reporting::{DiagnosticCollector, DiagnosticKind, DiagnosticMessage};
pub use sjson_source_map::{FileId, Location, Range, SourceInfo};
