/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Flat node records emitted by the parser.
//!
//! Every token and container becomes one [`Node`] in a single arena, in
//! pre-order. Back-references are plain [`NodeId`] indices into that arena.

use serde::{Deserialize, Serialize};
use sjson_source_map::Range;
use std::fmt;

/// Index of a node in its document's arena. Ids follow emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// What a node record stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    /// A scalar: string, number, boolean or null
    Value,
    Key,
    Separator,
    Comment,
}

impl NodeKind {
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }
}

/// Where a node lives inside its parent container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// One emitted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub range: Range,
    /// Nesting depth; the root container is at 0.
    pub depth: usize,
    /// Comment text for comment nodes, or the documentation comment that
    /// directly precedes a key or array element. A key's comment is
    /// repeated on its value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Segment under which this node lives in its parent container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<PathSegment>,
    /// Enclosing container (back-reference mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    /// Node holding the value this record introduces (back-reference mode
    /// only). Keys and separators point at their value, values and
    /// containers at themselves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<NodeId>,
}

impl Node {
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }
}
