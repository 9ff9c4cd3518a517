/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Table materialization.
//!
//! The top-level entries of a document are parts. Scalar entries of a part
//! are hoisted into its options; every other entry is a section. A section
//! holding a non-empty array is a table: the first element names the
//! columns and the remaining elements are data rows or option rows.
//!
//! Materialization is a pure transform. The input part is left untouched
//! and a new part is returned, so running it twice is safe and gives the
//! same result as running it once.

pub mod finalizers;
pub mod special;

pub use finalizers::{
    AxisMapping, AxisSource, FinalizerRegistry, NodePositionFinalizer, PartFinalizer,
};
pub use special::SpecialValues;

use crate::document::Document;
use crate::error::codes;
use crate::value::{NodeRef, Object, Value, ValueKind};
use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;
use sjson_error_reporting::{
    DiagnosticCollector, DiagnosticKind, DiagnosticMessage, DiagnosticMessageBuilder,
};
use sjson_source_map::{FileId, Range, SourceInfo};
use tracing::{debug, trace};

static SECTION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("section name pattern is valid")
});

/// Column that may be left out of a row without a warning.
const OPTIONAL_COLUMN: &str = "nonFlexMaterials";

/// A materialized table: rows keyed by identity or index.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: IndexMap<String, Value>,
    /// The array the table was read from.
    pub source: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// Anything that is not (yet) a materialized table.
    Raw(Value),
    Table(Table),
}

impl Section {
    pub fn source(&self) -> Option<NodeRef> {
        match self {
            Section::Raw(value) => value.source,
            Section::Table(table) => table.source,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Section::Table(table) => Some(table),
            Section::Raw(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Section::Raw(value) => value.clone(),
            Section::Table(table) => Value {
                kind: ValueKind::Object(Object {
                    entries: table.rows.clone(),
                    named: false,
                }),
                source: table.source,
            },
        }
    }
}

/// A named top-level entry of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    /// Scalar entries of the part; defaults for every row of its tables.
    pub options: IndexMap<String, Value>,
    pub sections: IndexMap<String, Section>,
    /// Sections already turned into tables.
    pub valid_tables: IndexSet<String>,
    pub source: Option<NodeRef>,
}

impl Part {
    /// Split an object into hoisted options and raw sections.
    ///
    /// Returns `None` when `value` is not an object.
    pub fn from_value(name: impl Into<String>, value: &Value) -> Option<Part> {
        let object = value.as_object()?;
        let mut options = IndexMap::new();
        let mut sections = IndexMap::new();
        for (key, entry) in object.iter() {
            if entry.is_scalar() {
                options.insert(key.clone(), entry.clone());
            } else {
                sections.insert(key.clone(), Section::Raw(entry.clone()));
            }
        }
        Some(Part {
            name: name.into(),
            options,
            sections,
            valid_tables: IndexSet::new(),
            source: value.source,
        })
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.section(name).and_then(Section::as_table)
    }

    /// The part as a structured tree: options first, then sections, with
    /// source ranges kept.
    pub fn to_value(&self) -> Value {
        let mut object = Object::new();
        for (key, value) in &self.options {
            object.insert(key.clone(), value.clone());
        }
        for (key, section) in &self.sections {
            object.insert(key.clone(), section.to_value());
        }
        Value {
            kind: ValueKind::Object(object),
            source: self.source,
        }
    }
}

/// All parts of a document plus every diagnostic, parse diagnostics first.
#[derive(Debug, Clone)]
pub struct MaterializedDocument {
    pub parts: IndexMap<String, Part>,
    pub diagnostics: Vec<DiagnosticMessage>,
    pub source: Option<NodeRef>,
}

impl MaterializedDocument {
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.get(name)
    }

    pub fn errors(&self) -> Vec<&DiagnosticMessage> {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Error)
            .collect()
    }

    pub fn warnings(&self) -> Vec<&DiagnosticMessage> {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Warning)
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.kind == DiagnosticKind::Error)
    }

    /// The whole structured tree, keyed by part name.
    pub fn to_value(&self) -> Value {
        let object = self
            .parts
            .iter()
            .map(|(name, part)| (name.clone(), part.to_value()))
            .collect();
        Value {
            kind: ValueKind::Object(object),
            source: self.source,
        }
    }
}

/// Interprets table sections and runs finalizers.
#[derive(Debug)]
pub struct Materializer {
    special: SpecialValues,
    finalizers: FinalizerRegistry,
}

impl Default for Materializer {
    fn default() -> Self {
        Self::new(SpecialValues::default(), FinalizerRegistry::builtin())
    }
}

impl Materializer {
    pub fn new(special: SpecialValues, finalizers: FinalizerRegistry) -> Self {
        Self {
            special,
            finalizers,
        }
    }

    pub fn with_finalizer(mut self, finalizer: Box<dyn PartFinalizer>) -> Self {
        self.finalizers.push(finalizer);
        self
    }

    pub fn special_values(&self) -> &SpecialValues {
        &self.special
    }

    pub fn finalizers(&self) -> &FinalizerRegistry {
        &self.finalizers
    }

    /// Materialize every table of `part`.
    ///
    /// Returns the new part and whether every section was processed
    /// cleanly. A malformed table stays raw and the others still
    /// materialize; an invalid section name stops the part where it is.
    pub fn materialize_part(
        &self,
        part: &Part,
        diagnostics: &mut DiagnosticCollector,
    ) -> (Part, bool) {
        self.materialize_part_in(part, diagnostics, None)
    }

    /// Materialize every part of a parsed document.
    pub fn materialize_document(&self, doc: &Document) -> MaterializedDocument {
        debug!(origin = doc.origin(), "materializing parts");
        let mut diagnostics = DiagnosticCollector::new();
        diagnostics.extend(doc.diagnostics().iter().cloned());
        let file_id = doc.file_id();
        let root = doc.root();

        let mut parts = IndexMap::new();
        match root.as_object() {
            None => diagnostics.add(
                DiagnosticMessageBuilder::error("Document root is not an object")
                    .with_code(codes::ROOT_NOT_OBJECT)
                    .with_location(location(file_id, root.range()))
                    .problem("Parts are read from the entries of the root object")
                    .build(),
            ),
            Some(object) => {
                for (name, value) in object.iter() {
                    let Some(part) = Part::from_value(name.as_str(), value) else {
                        let message = format!("Part `{name}` is not an object");
                        diagnostics.add(
                            DiagnosticMessageBuilder::error(message)
                                .with_code(codes::PART_NOT_OBJECT)
                                .with_location(location(file_id, value.range()))
                                .build(),
                        );
                        continue;
                    };
                    let (part, clean) = self.materialize_part_in(&part, &mut diagnostics, file_id);
                    if !clean {
                        debug!(part = %name, "part materialized with errors");
                    }
                    parts.insert(name.clone(), part);
                }
            }
        }

        debug!(
            origin = doc.origin(),
            parts = parts.len(),
            diagnostics = diagnostics.len(),
            "materialized parts"
        );
        MaterializedDocument {
            parts,
            diagnostics: diagnostics.into_diagnostics(),
            source: root.source,
        }
    }

    fn materialize_part_in(
        &self,
        part: &Part,
        diagnostics: &mut DiagnosticCollector,
        file_id: Option<FileId>,
    ) -> (Part, bool) {
        let mut part = part.clone();
        let mut clean = true;
        let names: Vec<String> = part.sections.keys().cloned().collect();

        for name in names {
            if !SECTION_NAME.is_match(&name) {
                let range = part
                    .sections
                    .get(&name)
                    .and_then(Section::source)
                    .or(part.source)
                    .map(|s| s.range);
                diagnostics.add(
                    DiagnosticMessageBuilder::error(format!("Invalid section name `{name}`"))
                        .with_code(codes::INVALID_SECTION_NAME)
                        .with_location(location(file_id, range))
                        .problem(format!(
                            "Sections of part `{}` must start with a letter or underscore \
                             and contain only letters, digits and underscores",
                            part.name
                        ))
                        .build(),
                );
                return (part, false);
            }
            if part.valid_tables.contains(&name) {
                trace!(part = %part.name, table = %name, "table already materialized");
                continue;
            }
            let Some(Section::Raw(value)) = part.sections.get(&name) else {
                continue;
            };
            let Some(rows) = value.as_array().filter(|rows| !rows.is_empty()) else {
                continue;
            };
            let scope = TableScope {
                part: &part.name,
                table: &name,
                file_id,
            };
            match self.table(&scope, value, rows, &part.options, diagnostics) {
                Some(table) => {
                    part.sections.insert(name.clone(), Section::Table(table));
                    part.valid_tables.insert(name);
                }
                None => clean = false,
            }
        }

        self.finalizers.run(&mut part, diagnostics);
        (part, clean)
    }

    fn table(
        &self,
        scope: &TableScope<'_>,
        value: &Value,
        rows: &[Value],
        options: &IndexMap<String, Value>,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<Table> {
        let (header_row, data) = rows.split_first()?;
        let Some(header_cells) = header_row.as_array() else {
            diagnostics.add(
                DiagnosticMessageBuilder::error(format!(
                    "Header of table `{}` in part `{}` is not an array",
                    scope.table, scope.part
                ))
                .with_code(codes::HEADER_NOT_ARRAY)
                .with_location(scope.at(header_row))
                .problem("The first element of a table lists its column names")
                .build(),
            );
            return None;
        };
        let header: Vec<String> = header_cells.iter().map(Value::to_key_string).collect();

        let mut accumulated = options.clone();
        let mut out: IndexMap<String, Value> = IndexMap::new();
        let mut index = 0usize;

        for row in data {
            let Some(cells) = row.as_array() else {
                match row.as_object() {
                    Some(object) => {
                        for (key, option) in object.iter() {
                            accumulated.insert(key.clone(), option.clone());
                        }
                    }
                    None => trace!(table = %scope.table, "skipping scalar row"),
                }
                continue;
            };

            if cells.len() > header.len() + 1 {
                diagnostics.add(
                    DiagnosticMessageBuilder::error(format!(
                        "Row of table `{}` in part `{}` has too many cells",
                        scope.table, scope.part
                    ))
                    .with_code(codes::ROW_TOO_LONG)
                    .with_location(scope.at(row))
                    .problem(format!(
                        "The header has {} columns, so a row may have at most {} cells, \
                         but this one has {}",
                        header.len(),
                        header.len() + 1,
                        cells.len()
                    ))
                    .add_info(format!(
                        "header: {}",
                        serde_json::to_string(&header).unwrap_or_default()
                    ))
                    .add_info(format!(
                        "row: {}",
                        serde_json::to_string(row).unwrap_or_default()
                    ))
                    .build(),
                );
                return None;
            }

            // the slot just past the header holds inline options
            let mut fields = accumulated.clone();
            if let Some(extra) = cells.get(header.len()) {
                match extra.as_object() {
                    Some(inline) => {
                        for (key, option) in inline.iter() {
                            fields.insert(key.clone(), option.clone());
                        }
                    }
                    None => trace!(table = %scope.table, "ignoring non-object extra cell"),
                }
            }
            for (column, name) in header.iter().enumerate() {
                match cells.get(column) {
                    Some(cell) => {
                        fields.insert(name.clone(), cell.clone());
                    }
                    None if name == OPTIONAL_COLUMN => {}
                    None => diagnostics.add(
                        DiagnosticMessageBuilder::warning(format!(
                            "Row of table `{}` is missing column `{name}`",
                            scope.table
                        ))
                        .with_code(codes::MISSING_CELL)
                        .with_location(scope.at(row))
                        .build(),
                    ),
                }
            }
            for field in fields.values_mut() {
                self.special.substitute(field);
            }

            let identity = fields.get("id").filter(|id| !id.is_null()).cloned();
            let named = identity.is_some();
            let key = match identity {
                Some(id) => {
                    let key = id.to_key_string();
                    fields.insert("name".to_string(), id);
                    key
                }
                None => index.to_string(),
            };
            index += 1;

            let record = Value {
                kind: ValueKind::Object(Object {
                    entries: fields,
                    named,
                }),
                source: row.source,
            };
            if let Some(previous) = out.insert(key.clone(), record) {
                let mut warning = DiagnosticMessageBuilder::warning(format!(
                    "Duplicate row id `{key}` in table `{}`",
                    scope.table
                ))
                .with_code(codes::DUPLICATE_ROW_ID)
                .with_location(scope.at(row))
                .add_hint("The last row with this id wins");
                if let Some(range) = previous.range() {
                    let previous_row = SourceInfo::new(scope.file_id, range);
                    warning = warning.add_note_at("previous row", previous_row);
                }
                diagnostics.add(warning.build());
            }
        }

        Some(Table {
            header,
            rows: out,
            source: value.source,
        })
    }
}

/// Where diagnostics for one table are reported.
struct TableScope<'a> {
    part: &'a str,
    table: &'a str,
    file_id: Option<FileId>,
}

impl TableScope<'_> {
    fn at(&self, value: &Value) -> SourceInfo {
        location(self.file_id, value.range())
    }
}

fn location(file_id: Option<FileId>, range: Option<Range>) -> SourceInfo {
    SourceInfo::new(file_id, range.unwrap_or_default())
}

/// Materialize one part with the built-in special values and finalizers.
pub fn materialize_part(part: &Part, diagnostics: &mut DiagnosticCollector) -> (Part, bool) {
    Materializer::default().materialize_part(part, diagnostics)
}

/// Materialize every part of `doc` with the built-in configuration.
pub fn materialize_all(doc: &Document) -> MaterializedDocument {
    Materializer::default().materialize_document(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn part(text: &str) -> Part {
        let doc = parse(text);
        assert!(doc.diagnostics().is_empty(), "{:?}", doc.diagnostics());
        Part::from_value("test", doc.root()).unwrap()
    }

    #[test]
    fn test_hoists_scalars() {
        let p = part("{information:{name:\"x\"} scale:2 slotType:\"body\" beams:[]}");
        let option_keys: Vec<_> = p.options.keys().map(String::as_str).collect();
        assert_eq!(option_keys, vec!["scale", "slotType"]);
        let section_keys: Vec<_> = p.sections.keys().map(String::as_str).collect();
        assert_eq!(section_keys, vec!["information", "beams"]);
    }

    #[test]
    fn test_non_object_is_not_a_part() {
        assert!(Part::from_value("x", &Value::number(1.0)).is_none());
    }

    #[test]
    fn test_empty_and_map_sections_stay_raw() {
        let p = part("{beams:[] information:{authors:\"me\"}}");
        let mut diagnostics = DiagnosticCollector::new();
        let (out, clean) = materialize_part(&p, &mut diagnostics);
        assert!(clean);
        assert!(diagnostics.is_empty());
        assert!(out.valid_tables.is_empty());
        assert!(matches!(out.section("beams"), Some(Section::Raw(_))));
    }

    #[test]
    fn test_options_rows_accumulate() {
        let p = part(
            "{beams:[[\"id1:\" \"id2:\"] {beamSpring:100} [\"a\" \"b\"] {beamSpring:200 beamDamp:5} [\"c\" \"d\"]]}",
        );
        let mut diagnostics = DiagnosticCollector::new();
        let (out, _) = materialize_part(&p, &mut diagnostics);
        let table = out.table("beams").unwrap();
        assert_eq!(table.rows["0"].get("beamSpring").and_then(Value::as_f64), Some(100.0));
        assert!(table.rows["0"].get("beamDamp").is_none());
        assert_eq!(table.rows["1"].get("beamSpring").and_then(Value::as_f64), Some(200.0));
        assert_eq!(table.rows["1"].get("beamDamp").and_then(Value::as_f64), Some(5.0));
    }

    #[test]
    fn test_part_options_are_row_defaults() {
        let p = part("{mass:10 nodes:[[\"id\"] [\"n1\"] [\"n2\" {mass:3}]]}");
        let mut diagnostics = DiagnosticCollector::new();
        let (out, _) = materialize_part(&p, &mut diagnostics);
        let nodes = out.table("nodes").unwrap();
        assert_eq!(nodes.rows["n1"].get("mass").and_then(Value::as_f64), Some(10.0));
        assert_eq!(nodes.rows["n2"].get("mass").and_then(Value::as_f64), Some(3.0));
    }

    #[test]
    fn test_missing_cells_warn_per_column() {
        let p = part("{t:[[\"a\" \"b\" \"c\" \"nonFlexMaterials\"] [1]]}");
        let mut diagnostics = DiagnosticCollector::new();
        let (out, clean) = materialize_part(&p, &mut diagnostics);
        assert!(clean);
        assert!(out.table("t").is_some());
        let found: Vec<_> = diagnostics
            .diagnostics()
            .iter()
            .map(|d| (d.kind, d.code.clone().unwrap_or_default()))
            .collect();
        assert_eq!(
            found,
            vec![
                (DiagnosticKind::Warning, codes::MISSING_CELL.to_string()),
                (DiagnosticKind::Warning, codes::MISSING_CELL.to_string()),
            ]
        );
    }

    #[test]
    fn test_header_must_be_array() {
        let p = part("{t:[\"a\" [1]]}");
        let mut diagnostics = DiagnosticCollector::new();
        let (out, clean) = materialize_part(&p, &mut diagnostics);
        assert!(!clean);
        assert!(matches!(out.section("t"), Some(Section::Raw(_))));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.diagnostics()[0].code.as_deref(),
            Some(codes::HEADER_NOT_ARRAY)
        );
    }

    #[test]
    fn test_duplicate_row_ids_warn() {
        let p = part("{t:[[\"id\" \"v\"] [\"x\" 1] [\"x\" 2]]}");
        let mut diagnostics = DiagnosticCollector::new();
        let (out, clean) = materialize_part(&p, &mut diagnostics);
        assert!(clean);
        let table = out.table("t").unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows["x"].get("v").and_then(Value::as_f64), Some(2.0));
        assert_eq!(diagnostics.warning_count(), 1);
        assert_eq!(
            diagnostics.diagnostics()[0].code.as_deref(),
            Some(codes::DUPLICATE_ROW_ID)
        );
    }

    #[test]
    fn test_numeric_id_is_kept() {
        let p = part("{t:[[\"id\" \"v\"] [7 1]]}");
        let mut diagnostics = DiagnosticCollector::new();
        let (out, _) = materialize_part(&p, &mut diagnostics);
        let row = &out.table("t").unwrap().rows["7"];
        assert_eq!(row.get("id").and_then(Value::as_f64), Some(7.0));
        assert_eq!(row.get("name").and_then(Value::as_f64), Some(7.0));
        assert!(row.as_object().unwrap().named);
    }
}
