/*
 * position_index.rs
 * Copyright (c) 2025 Posit, PBC
 */

use sjson::structured;
use sjson::{
    BreadcrumbCache, Document, NodeId, NodeKind, ParseOptions, Value, ValueKind, breadcrumbs,
    breadcrumbs_at, materialize_all, parse, parse_with_options, previous_node, query_at,
};
use sjson_source_map::offset_to_location;

const SAMPLE: &str = r#"truck_body: {
    slotType: "truck_body"
    nodes: [
        ["id" "posX" "posY" "posZ"]
        {nodeWeight: 1.5}
        ["b1" -0.5 1.25 0.75]
        ["b2" 0.5 1.25 0.75]
    ]
    beams: [
        ["id1:" "id2:"]
        ["b1" "b2"]
    ]
}
"#;

fn cyclic(text: &str) -> Document {
    parse_with_options(text, &ParseOptions::new().with_back_references(true))
}

/// (line, column) of the first occurrence of `needle`, shifted by `skip` bytes.
fn position_of(needle: &str, skip: usize) -> (usize, usize) {
    let offset = SAMPLE.find(needle).unwrap() + skip;
    let location = offset_to_location(SAMPLE, offset).unwrap();
    (location.row, location.column)
}

#[test]
fn test_query_is_deepest_first() {
    let doc = parse("{a:{b:[10 20]}}");
    let hits = query_at(&doc, 0, 10);
    let kinds: Vec<_> = hits.iter().map(|n| (n.kind, n.depth)).collect();
    assert_eq!(
        kinds,
        vec![
            (NodeKind::Value, 3),
            (NodeKind::Array, 2),
            (NodeKind::Object, 1),
            (NodeKind::Object, 0),
        ]
    );
}

#[test]
fn test_end_column_is_inclusive() {
    let doc = parse("{a:{b:[10 20]}}");
    // right after `20`
    assert_eq!(query_at(&doc, 0, 12)[0].kind, NodeKind::Value);
    // right after `]`
    assert_eq!(query_at(&doc, 0, 13)[0].kind, NodeKind::Array);
    assert!(query_at(&doc, 1, 0).is_empty());
}

#[test]
fn test_query_at_start_finds_node_first() {
    let doc = parse(SAMPLE);
    assert!(doc.diagnostics().is_empty(), "{:?}", doc.diagnostics());
    for node in doc.nodes() {
        let start = node.range.start;
        let hits = query_at(&doc, start.row, start.column);
        assert!(hits.iter().any(|h| h.id == node.id), "{node:?}");
        let first = hits[0];
        assert!(
            first.id == node.id || node.range.encloses(&first.range),
            "{node:?} first hit {first:?}"
        );
    }
}

/// Values reachable through containers whose range encloses them.
fn enclosed_values<'v>(value: &'v Value, out: &mut Vec<&'v Value>) {
    let Some(range) = value.range() else {
        return;
    };
    out.push(value);
    let children: Vec<&Value> = match &value.kind {
        ValueKind::Object(object) => object.iter().map(|(_, v)| v).collect(),
        ValueKind::Array(items) => items.iter().collect(),
        _ => return,
    };
    for child in children {
        if child.range().is_some_and(|r| range.encloses(&r)) {
            enclosed_values(child, out);
        }
    }
}

#[test]
fn test_structured_query_at_start_finds_value_first() {
    let doc = parse(SAMPLE);
    let tree = materialize_all(&doc).to_value();
    let mut values = Vec::new();
    enclosed_values(&tree, &mut values);
    assert!(values.len() > 10);

    for value in values {
        let range = value.range().unwrap();
        let hits = structured::query_at(&tree, range.start.row, range.start.column);
        assert!(hits.iter().any(|h| std::ptr::eq(h.value, value)), "{value:?}");
        let first = &hits[0];
        assert!(
            std::ptr::eq(first.value, value) || range.encloses(&first.range),
            "{value:?} first hit {:?}",
            first.value
        );
    }
}

#[test]
fn test_previous_node_follows_emission_order() {
    let doc = parse("{a:1 b:2}");
    let nodes = doc.nodes();
    let last = nodes.last().unwrap();
    let previous = previous_node(nodes, last.id).unwrap();
    assert_eq!(previous.kind, NodeKind::Separator);
    assert!(previous_node(nodes, NodeId(0)).is_none());
}

#[test]
fn test_breadcrumbs_at_cursor() {
    let doc = cyclic(SAMPLE);
    let (line, column) = position_of(r#"["b1" "b2"]"#, 6);
    let trail = breadcrumbs_at(&doc, line, column).unwrap();
    assert_eq!(trail.text(), "truck_body.beams.1.1");

    let items = trail.items();
    assert_eq!(items.len(), 4);
    let beams = doc.node(items[1].id).unwrap();
    assert_eq!(beams.kind, NodeKind::Array);
    assert_eq!(items[1].range, beams.range);
}

#[test]
fn test_breadcrumbs_need_back_references() {
    let doc = parse(SAMPLE);
    let (line, column) = position_of("slotType", 0);
    assert!(breadcrumbs_at(&doc, line, column).is_none());

    let doc = cyclic(SAMPLE);
    let hit = query_at(&doc, line, column)[0];
    assert_eq!(hit.kind, NodeKind::Key);
    assert_eq!(breadcrumbs(&doc, hit.id).unwrap().text(), "truck_body.slotType");
}

#[test]
fn test_structured_query_skips_named_rows() {
    let doc = parse(SAMPLE);
    let materialized = materialize_all(&doc);
    let tree = materialized.to_value();

    let (line, column) = position_of(r#"["b2" 0.5"#, 6);
    let hits = structured::query_at(&tree, line, column);
    assert_eq!(hits[0].value.as_f64(), Some(0.5));
    assert_eq!(hits[0].breadcrumbs.text(), "truck_body.nodes.posX");

    let (line, column) = position_of(r#"["b1" "b2"]"#, 6);
    let hits = structured::query_at(&tree, line, column);
    assert_eq!(hits[0].value.as_str(), Some("b2"));
    assert_eq!(hits[0].breadcrumbs.text(), "truck_body.beams.0.id2:");
}

#[test]
fn test_cache_keeps_raw_and_structured_apart() {
    let doc = cyclic(SAMPLE);
    let materialized = materialize_all(&doc);
    let tree = materialized.to_value();
    let (line, column) = position_of(r#"["b1" "b2"]"#, 0);

    let row = query_at(&doc, line, column)[0];
    assert_eq!(row.kind, NodeKind::Array);

    let mut cache = BreadcrumbCache::new();
    let raw = cache.breadcrumbs("raw", &doc, row.id).cloned().unwrap();
    assert_eq!(raw.text(), "truck_body.beams.1");

    let hit = structured::query_at(&tree, line, column)
        .into_iter()
        .find(|h| h.value.source.map(|s| s.id) == Some(row.id))
        .unwrap();
    cache.insert("structured", row.id, hit.breadcrumbs.clone());

    assert_eq!(cache.get("raw", row.id).map(|b| b.text()), Some(raw.text()));
    assert_eq!(
        cache.get("structured", row.id).map(|b| b.text()),
        Some("truck_body.beams.0".to_string())
    );
}

#[test]
fn test_materialized_rows_keep_source_ranges() {
    let doc = parse(SAMPLE);
    let materialized = materialize_all(&doc);
    let nodes = materialized
        .part("truck_body")
        .and_then(|p| p.table("nodes"))
        .unwrap();
    let row: &Value = &nodes.rows["b1"];
    let source = row.source.unwrap();
    let node = doc.node(source.id).unwrap();
    assert_eq!(node.kind, NodeKind::Array);
    assert_eq!(
        &SAMPLE[source.range.start.offset..source.range.end.offset],
        r#"["b1" -0.5 1.25 0.75]"#
    );
}
