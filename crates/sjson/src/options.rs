/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parser configuration.

use sjson_source_map::FileId;

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default limit on the number of emitted nodes.
pub const DEFAULT_MAX_NODES: usize = 4_000_000;

/// Options controlling a parse.
///
/// ```
/// use sjson::ParseOptions;
///
/// let options = ParseOptions::new()
///     .with_origin("vehicles/car/body.jbeam")
///     .with_back_references(true);
/// assert!(options.cyclic);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Label used in logs for this document.
    pub origin: String,
    /// File stamped onto every diagnostic location.
    pub file_id: Option<FileId>,
    /// Attach parent/value back-references to every node.
    pub cyclic: bool,
    /// Deepest container nesting accepted before the parse aborts.
    pub max_depth: usize,
    /// Most nodes emitted before the parse aborts.
    pub max_nodes: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            origin: "<anonymous>".to_string(),
            file_id: None,
            cyclic: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_file_id(mut self, file_id: FileId) -> Self {
        self.file_id = Some(file_id);
        self
    }

    /// Record parent and value links so breadcrumbs can be derived.
    pub fn with_back_references(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}
