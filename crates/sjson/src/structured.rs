/*
 * structured.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Position queries over a materialized tree.
//!
//! Materialized rows keep the range of the source row they came from, so
//! the same point-in-range rule works on structured output. Rows that were
//! renamed after their `id` are skipped when building trails.

use crate::breadcrumbs::{BreadcrumbItem, Breadcrumbs};
use crate::node::PathSegment;
use crate::value::{Value, ValueKind};
use sjson_source_map::Range;

/// A value of the structured tree containing the queried position.
#[derive(Debug, Clone)]
pub struct StructuredHit<'v> {
    pub value: &'v Value,
    pub range: Range,
    /// Distance from the root value.
    pub depth: usize,
    /// Position of the value in a pre-order walk of the tree.
    pub order: usize,
    pub breadcrumbs: Breadcrumbs,
}

/// Values containing the position, deepest first.
///
/// Values at equal depth are ordered later-visited first, so a value that
/// starts exactly where a sibling ends wins over that sibling.
pub fn query_at(root: &Value, line: usize, column: usize) -> Vec<StructuredHit<'_>> {
    let mut walk = Walk {
        line,
        column,
        visited: 0,
        trail: Vec::new(),
    };
    let mut hits = Vec::new();
    walk.collect(root, 0, &mut hits);
    hits.sort_by(|a, b| b.depth.cmp(&a.depth).then(b.order.cmp(&a.order)));
    hits
}

struct Walk {
    line: usize,
    column: usize,
    visited: usize,
    trail: Vec<BreadcrumbItem>,
}

impl Walk {
    fn collect<'v>(
        &mut self,
        value: &'v Value,
        depth: usize,
        hits: &mut Vec<StructuredHit<'v>>,
    ) {
        let Some(range) = value.range() else {
            return;
        };
        if !range.contains(self.line, self.column) {
            return;
        }
        let order = self.visited;
        self.visited += 1;
        hits.push(StructuredHit {
            value,
            range,
            depth,
            order,
            breadcrumbs: Breadcrumbs::new(self.trail.clone()),
        });

        let children: Vec<(PathSegment, &Value)> = match &value.kind {
            ValueKind::Object(object) => object
                .iter()
                .map(|(k, v)| (PathSegment::Key(k.clone()), v))
                .collect(),
            ValueKind::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (PathSegment::Index(i), v))
                .collect(),
            _ => return,
        };
        for (key, child) in children {
            let Some(source) = child.source else {
                continue;
            };
            let named = child.as_object().is_some_and(|o| o.named);
            if !named {
                self.trail.push(BreadcrumbItem {
                    key,
                    range: source.range,
                    id: source.id,
                });
            }
            self.collect(child, depth + 1, hits);
            if !named {
                self.trail.pop();
            }
        }
    }
}
