/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Data tree produced by the parser and by table materialization.
//!
//! Arrays and objects are distinct variants. Each value remembers the node it
//! was parsed from, so data can always be mapped back to its text.

use crate::breadcrumbs::breadcrumbs;
use crate::document::Document;
use crate::node::NodeId;
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use sjson_source_map::Range;

/// Pointer from a value back to the node it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef {
    pub id: NodeId,
    pub range: Range,
}

/// A value in the tree, plus where it came from.
///
/// Equality compares data only; sources and the `named` flag of objects
/// are ignored.
#[derive(Debug, Clone)]
pub struct Value {
    pub kind: ValueKind,
    pub source: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Object),
}

/// Insertion-ordered map of keys to values.
#[derive(Debug, Clone, Default)]
pub struct Object {
    pub entries: IndexMap<String, Value>,
    /// Set on materialized rows that took their key from an `id` field.
    pub named: bool,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Insert or overwrite; an overwritten key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            named: false,
        }
    }
}

impl Value {
    /// A value with no source, as synthesized during materialization.
    pub fn new(kind: ValueKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(kind: ValueKind, source: NodeRef) -> Self {
        Self {
            kind,
            source: Some(source),
        }
    }

    pub fn null() -> Self {
        Self::new(ValueKind::Null)
    }

    pub fn number(n: f64) -> Self {
        Self::new(ValueKind::Number(n))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::new(ValueKind::String(s.into()))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Self::new(ValueKind::Array(items))
    }

    pub fn object(object: Object) -> Self {
        Self::new(ValueKind::Object(object))
    }

    /// Source range, if this value was parsed from text.
    pub fn range(&self) -> Option<Range> {
        self.source.map(|s| s.range)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind, ValueKind::Null)
    }

    /// Strings, numbers, booleans and null.
    pub fn is_scalar(&self) -> bool {
        !matches!(self.kind, ValueKind::Array(_) | ValueKind::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match &self.kind {
            ValueKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match &mut self.kind {
            ValueKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match &self.kind {
            ValueKind::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match &mut self.kind {
            ValueKind::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Look up a key when this value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Text used when a value becomes a map key (row ids, header cells).
    pub fn to_key_string(&self) -> String {
        match &self.kind {
            ValueKind::String(s) => s.clone(),
            ValueKind::Number(n) => format_number(*n),
            ValueKind::Bool(b) => b.to_string(),
            ValueKind::Null => "null".to_string(),
            ValueKind::Array(_) | ValueKind::Object(_) => {
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }

    /// JSON with a `__meta` side key on every object that has a source.
    ///
    /// `__meta` holds the node id, the `[startLine, startCol, endLine,
    /// endCol]` range and the `named` flag. [`Document::annotate`] adds the
    /// node's kind, depth, comment and breadcrumbs.
    pub fn to_annotated_json(&self) -> serde_json::Value {
        annotate(self, None)
    }
}

pub(crate) fn annotate(value: &Value, doc: Option<&Document>) -> serde_json::Value {
    match &value.kind {
        ValueKind::Array(items) => {
            serde_json::Value::Array(items.iter().map(|item| annotate(item, doc)).collect())
        }
        ValueKind::Object(object) => {
            let mut map = serde_json::Map::new();
            for (key, entry) in object.iter() {
                map.insert(key.clone(), annotate(entry, doc));
            }
            if let Some(source) = value.source {
                map.insert(META_KEY.to_string(), meta(source, object.named, doc));
            }
            serde_json::Value::Object(map)
        }
        _ => serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
    }
}

fn meta(source: NodeRef, named: bool, doc: Option<&Document>) -> serde_json::Value {
    let mut meta = serde_json::json!({
        "id": source.id.0,
        "range": source.range.to_array(),
        "named": named,
    });
    let Some(doc) = doc else {
        return meta;
    };
    if let Some(node) = doc.node(source.id) {
        meta["kind"] = serde_json::json!(node.kind);
        meta["depth"] = serde_json::json!(node.depth);
        if let Some(comment) = &node.comment {
            meta["comment"] = serde_json::json!(comment);
        }
    }
    if let Some(trail) = breadcrumbs(doc, source.id) {
        meta["breadcrumbs"] = serde_json::json!(trail.text());
    }
    meta
}

/// Side key carrying node metadata in annotated JSON output.
pub const META_KEY: &str = "__meta";

/// Integral numbers print without a fractional part.
pub(crate) fn format_number(n: f64) -> String {
    if let Some(i) = as_integer(n) {
        i.to_string()
    } else {
        n.to_string()
    }
}

fn as_integer(n: f64) -> Option<i64> {
    const MAX_SAFE: f64 = 9_007_199_254_740_992.0;
    (n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE).then_some(n as i64)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.kind {
            ValueKind::Null => serializer.serialize_unit(),
            ValueKind::Bool(b) => serializer.serialize_bool(*b),
            ValueKind::Number(n) => match as_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None if n.is_finite() => serializer.serialize_f64(*n),
                None if n.is_nan() => serializer.serialize_str("NaN"),
                None if *n > 0.0 => serializer.serialize_str("Infinity"),
                None => serializer.serialize_str("-Infinity"),
            },
            ValueKind::String(s) => serializer.serialize_str(s),
            ValueKind::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ValueKind::Object(object) => object.serialize(serializer),
        }
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
