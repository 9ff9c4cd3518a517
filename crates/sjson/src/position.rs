/*
 * position.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Point-in-range queries over the node arena.

use crate::document::Document;
use crate::node::{Node, NodeId};

/// For every line, the nodes whose range spans it, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    lines: Vec<Vec<NodeId>>,
}

impl LineIndex {
    pub fn build(nodes: &[Node]) -> Self {
        let line_count = nodes
            .iter()
            .map(|n| n.range.end.row + 1)
            .max()
            .unwrap_or(0);
        let mut lines = vec![Vec::new(); line_count];
        for node in nodes {
            for line in &mut lines[node.range.start.row..=node.range.end.row] {
                line.push(node.id);
            }
        }
        Self { lines }
    }

    /// Nodes spanning `line`; empty past the end of the document.
    pub fn line(&self, line: usize) -> &[NodeId] {
        self.lines.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Nodes containing the position, deepest first.
///
/// Nodes at equal depth are ordered later-emitted first, so a node that
/// starts exactly where a sibling ends wins over that sibling.
pub fn query_at(doc: &Document, line: usize, column: usize) -> Vec<&Node> {
    let mut hits: Vec<&Node> = doc
        .line_index()
        .line(line)
        .iter()
        .filter_map(|id| doc.node(*id))
        .filter(|node| node.range.contains(line, column))
        .collect();
    hits.sort_by(|a, b| b.depth.cmp(&a.depth).then(b.id.cmp(&a.id)));
    hits
}

/// The record emitted immediately before `id`.
pub fn previous_node(nodes: &[Node], id: NodeId) -> Option<&Node> {
    id.0.checked_sub(1).and_then(|prev| nodes.get(prev))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use crate::parse;

    #[test]
    fn test_line_index_spans_multiline_nodes() {
        let doc = parse("{\n  a: [\n    1\n  ]\n}");
        let index = doc.line_index();
        assert_eq!(index.line_count(), 5);

        let array = doc
            .nodes()
            .iter()
            .find(|n| n.kind == NodeKind::Array)
            .unwrap();
        for line in 1..=3 {
            assert!(index.line(line).contains(&array.id), "line {line}");
        }
        assert!(!index.line(4).contains(&array.id));
        assert!(index.line(99).is_empty());
    }

    #[test]
    fn test_previous_node() {
        let doc = parse("{a:1}");
        let nodes = doc.nodes();
        assert!(previous_node(nodes, NodeId(0)).is_none());
        assert_eq!(previous_node(nodes, NodeId(2)).map(|n| n.kind), Some(NodeKind::Key));
    }
}
