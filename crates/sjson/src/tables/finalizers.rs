/*
 * finalizers.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Per-part post-processing run after tables are materialized.
//!
//! - [`PartFinalizer`] - a single step that derives computed fields
//! - [`FinalizerRegistry`] - ordered collection of steps
//!
//! New part types add a finalizer instead of changing the interpreter.

use super::{Part, Section};
use crate::value::{Value, ValueKind};
use sjson_error_reporting::DiagnosticCollector;
use tracing::debug;

/// A post-processing step for materialized parts.
///
/// Finalizers must be idempotent: running one twice on the same part
/// gives the same result as running it once.
pub trait PartFinalizer: Send + Sync {
    /// Human-readable name, used for logging.
    fn name(&self) -> &str;

    /// Whether this step has anything to do for `part`.
    fn applies_to(&self, part: &Part) -> bool;

    fn finalize(&self, part: &mut Part, diagnostics: &mut DiagnosticCollector);
}

/// Finalizers run in insertion order.
#[derive(Default)]
pub struct FinalizerRegistry {
    finalizers: Vec<Box<dyn PartFinalizer>>,
}

impl FinalizerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in steps.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.push(Box::new(NodePositionFinalizer::default()));
        registry
    }

    pub fn push(&mut self, finalizer: Box<dyn PartFinalizer>) {
        self.finalizers.push(finalizer);
    }

    pub fn len(&self) -> usize {
        self.finalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finalizers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.finalizers.iter().map(|f| f.name()).collect()
    }

    /// Run every applicable finalizer on `part`.
    pub fn run(&self, part: &mut Part, diagnostics: &mut DiagnosticCollector) {
        for finalizer in &self.finalizers {
            if finalizer.applies_to(part) {
                debug!(finalizer = finalizer.name(), part = %part.name, "running finalizer");
                finalizer.finalize(part, diagnostics);
            }
        }
    }
}

impl std::fmt::Debug for FinalizerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinalizerRegistry")
            .field("finalizers", &self.names())
            .finish()
    }
}

/// One output coordinate taken from a row field, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisSource {
    pub field: String,
    pub negate: bool,
}

impl AxisSource {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            negate: false,
        }
    }

    pub fn negated(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            negate: true,
        }
    }
}

/// How row fields map onto an output `[x, y, z]` position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisMapping {
    pub axes: [AxisSource; 3],
}

impl Default for AxisMapping {
    /// Z-up source data to a Y-up scene: `[posX, posZ, -posY]`.
    fn default() -> Self {
        Self {
            axes: [
                AxisSource::new("posX"),
                AxisSource::new("posZ"),
                AxisSource::negated("posY"),
            ],
        }
    }
}

impl AxisMapping {
    /// Position for a row, if all three source fields are numbers.
    pub fn apply(&self, row: &Value) -> Option<[f64; 3]> {
        let coordinate = |axis: &AxisSource| -> Option<f64> {
            let n = row.get(&axis.field)?.as_f64()?;
            Some(if axis.negate { -n } else { n })
        };
        Some([
            coordinate(&self.axes[0])?,
            coordinate(&self.axes[1])?,
            coordinate(&self.axes[2])?,
        ])
    }
}

/// Adds a `pos` array to every row of a node table.
#[derive(Debug, Clone)]
pub struct NodePositionFinalizer {
    pub table: String,
    pub target: String,
    pub mapping: AxisMapping,
}

impl Default for NodePositionFinalizer {
    fn default() -> Self {
        Self {
            table: "nodes".to_string(),
            target: "pos".to_string(),
            mapping: AxisMapping::default(),
        }
    }
}

impl PartFinalizer for NodePositionFinalizer {
    fn name(&self) -> &str {
        "node-position"
    }

    fn applies_to(&self, part: &Part) -> bool {
        matches!(part.sections.get(&self.table), Some(Section::Table(_)))
    }

    fn finalize(&self, part: &mut Part, _diagnostics: &mut DiagnosticCollector) {
        let Some(Section::Table(table)) = part.sections.get_mut(&self.table) else {
            return;
        };
        for row in table.rows.values_mut() {
            let Some(position) = self.mapping.apply(row) else {
                continue;
            };
            let Some(fields) = row.as_object_mut() else {
                continue;
            };
            let pos = position
                .iter()
                .map(|n| Value::new(ValueKind::Number(*n)))
                .collect();
            fields.insert(self.target.clone(), Value::array(pos));
        }
    }
}
