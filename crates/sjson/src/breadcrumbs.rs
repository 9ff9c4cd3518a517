/*
 * breadcrumbs.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Ancestor key trails for navigation.
//!
//! Trails are derived from the parent links of a document parsed with
//! back-references. Derivation is a pure function of the node; callers
//! that want memoization keep a [`BreadcrumbCache`].

use crate::document::Document;
use crate::node::{NodeId, NodeKind, PathSegment};
use crate::position::query_at;
use sjson_source_map::Range;
use std::collections::HashMap;

/// One step of a trail: the key and the range of the value it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbItem {
    pub key: PathSegment,
    pub range: Range,
    pub id: NodeId,
}

/// Keys from the outermost container down to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breadcrumbs {
    items: Vec<BreadcrumbItem>,
}

impl Breadcrumbs {
    pub fn new(items: Vec<BreadcrumbItem>) -> Self {
        Self { items }
    }

    /// Keys joined with `.`, e.g. `body.nodes.3`.
    pub fn text(&self) -> String {
        self.items
            .iter()
            .map(|item| item.key.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Each key paired with the range to jump to.
    pub fn items(&self) -> &[BreadcrumbItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Trail for a node, outermost first.
///
/// Keys and separators resolve to the value they introduce, and comments to
/// their container. Returns `None` when the document has no back-references
/// or the id is unknown.
pub fn breadcrumbs(doc: &Document, id: NodeId) -> Option<Breadcrumbs> {
    if !doc.is_cyclic() {
        return None;
    }
    let node = doc.node(id)?;
    let mut current = match node.kind {
        NodeKind::Key | NodeKind::Separator => node.value.or(node.parent),
        NodeKind::Comment => node.parent,
        _ => Some(node.id),
    };

    let mut items = Vec::new();
    while let Some(id) = current {
        let node = doc.node(id)?;
        if let Some(key) = &node.key {
            items.push(BreadcrumbItem {
                key: key.clone(),
                range: node.range,
                id,
            });
        }
        current = node.parent;
    }
    items.reverse();
    Some(Breadcrumbs::new(items))
}

/// Trail for the deepest node at a position.
pub fn breadcrumbs_at(doc: &Document, line: usize, column: usize) -> Option<Breadcrumbs> {
    let deepest = query_at(doc, line, column).into_iter().next()?;
    breadcrumbs(doc, deepest.id)
}

/// Memoized trails keyed by a caller-chosen category and node id.
///
/// Separate categories ("raw", "structured", ...) never overwrite each
/// other's entries.
#[derive(Debug, Clone, Default)]
pub struct BreadcrumbCache {
    entries: HashMap<(String, NodeId), Breadcrumbs>,
}

impl BreadcrumbCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &str, id: NodeId) -> Option<&Breadcrumbs> {
        self.entries.get(&(category.to_string(), id))
    }

    pub fn insert(&mut self, category: &str, id: NodeId, trail: Breadcrumbs) {
        self.entries.insert((category.to_string(), id), trail);
    }

    /// Cached trail, computing and storing it on a miss.
    pub fn get_or_compute(
        &mut self,
        category: &str,
        id: NodeId,
        compute: impl FnOnce() -> Option<Breadcrumbs>,
    ) -> Option<&Breadcrumbs> {
        let key = (category.to_string(), id);
        if !self.entries.contains_key(&key) {
            let trail = compute()?;
            self.entries.insert(key.clone(), trail);
        }
        self.entries.get(&key)
    }

    /// Raw-tree trail for a node, cached under `category`.
    pub fn breadcrumbs(
        &mut self,
        category: &str,
        doc: &Document,
        id: NodeId,
    ) -> Option<&Breadcrumbs> {
        self.get_or_compute(category, id, || breadcrumbs(doc, id))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
