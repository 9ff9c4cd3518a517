/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The result of one full parse.

use crate::error::ParseError;
use crate::node::{Node, NodeId};
use crate::position::LineIndex;
use crate::value::{Value, annotate};
use sjson_error_reporting::{DiagnosticKind, DiagnosticMessage};
use sjson_source_map::FileId;

/// A parsed SJSON document.
///
/// Holds the data tree, the flat node arena in emission order, the line
/// index over that arena, and every diagnostic the parser emitted. A
/// document is rebuilt from scratch on each parse.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) origin: String,
    pub(crate) file_id: Option<FileId>,
    pub(crate) cyclic: bool,
    pub(crate) root: Value,
    pub(crate) nodes: Vec<Node>,
    pub(crate) line_index: LineIndex,
    pub(crate) diagnostics: Vec<DiagnosticMessage>,
    pub(crate) fatal: Option<ParseError>,
}

impl Document {
    /// Label the document was parsed under.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn file_id(&self) -> Option<FileId> {
        self.file_id
    }

    /// Whether parent/value back-references were recorded.
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Root of the data tree (an object or an array).
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Take the data tree out of the document.
    pub fn into_root(self) -> Value {
        self.root
    }

    /// Record for the root container. It spans the whole input.
    pub fn root_node(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Every node, in emission order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Errors and warnings in the order they were emitted.
    pub fn diagnostics(&self) -> &[DiagnosticMessage] {
        &self.diagnostics
    }

    pub fn errors(&self) -> Vec<&DiagnosticMessage> {
        self.of_kind(DiagnosticKind::Error)
    }

    pub fn warnings(&self) -> Vec<&DiagnosticMessage> {
        self.of_kind(DiagnosticKind::Warning)
    }

    fn of_kind(&self, kind: DiagnosticKind) -> Vec<&DiagnosticMessage> {
        self.diagnostics.iter().filter(|d| d.kind == kind).collect()
    }

    /// The condition that aborted the parse, if any.
    pub fn fatal(&self) -> Option<&ParseError> {
        self.fatal.as_ref()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.kind == DiagnosticKind::Error)
    }

    /// JSON for a tree parsed from this document, with a `__meta` side key
    /// on every sourced object.
    ///
    /// Besides the id, range and `named` flag, the metadata carries the
    /// source node's kind, depth and comment, and the breadcrumb text when
    /// the document has back-references. Works on the raw root and on
    /// materialized output alike.
    pub fn annotate(&self, value: &Value) -> serde_json::Value {
        annotate(value, Some(self))
    }

    /// The raw data tree as annotated JSON.
    pub fn to_annotated_json(&self) -> serde_json::Value {
        self.annotate(&self.root)
    }
}
