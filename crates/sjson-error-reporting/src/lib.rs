//! Error reporting and diagnostic messages for SJSON tooling.
//!
//! Parsing and table materialization never stop at the first problem. Both
//! passes push [`DiagnosticMessage`]s into a [`DiagnosticCollector`], and the
//! caller projects the resulting flat list onto source positions.
//!
//! # Architecture
//!
//! - [`DiagnosticMessage`]: The main message structure (code, title, kind,
//!   problem, details, hints, location)
//! - [`DiagnosticMessageBuilder`]: Tidyverse-style builder for messages
//! - [`DiagnosticCollector`]: Ordered, append-only accumulator
//! - [`catalog`]: Stable error codes (`S-<subsystem>-<number>`) with titles and templates
//!
//! # Example
//!
//! ```
//! use sjson_error_reporting::{DiagnosticCollector, DiagnosticMessageBuilder};
//!
//! let mut collector = DiagnosticCollector::new();
//! collector.add(
//!     DiagnosticMessageBuilder::warning("Duplicate key `a`")
//!         .with_code("S-1-6")
//!         .build(),
//! );
//! assert!(!collector.has_errors());
//! assert_eq!(collector.len(), 1);
//! ```

pub mod builder;
pub mod catalog;
pub mod collector;
pub mod diagnostic;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_error_info, get_subsystem};
pub use collector::DiagnosticCollector;
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage, MessageContent};
