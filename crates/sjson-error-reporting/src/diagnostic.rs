//! Core diagnostic message types.
//!
//! This module defines the structures used to report errors and warnings
//! produced while parsing SJSON text and materializing its tables.

use serde::{Deserialize, Serialize};
use sjson_source_map::{SourceContext, SourceInfo};

/// The kind of diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// An error that prevents completion
    Error,
    /// A warning that doesn't prevent completion but indicates a problem
    Warning,
    /// Informational message
    Info,
    /// A note providing additional context
    Note,
}

impl DiagnosticKind {
    /// Lower-case name used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Info => "info",
            DiagnosticKind::Note => "note",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::Error => "Error",
            DiagnosticKind::Warning => "Warning",
            DiagnosticKind::Info => "Info",
            DiagnosticKind::Note => "Note",
        }
    }
}

/// How detail items should be presented (tidyverse x/i bullet style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailKind {
    /// Error detail (✖ bullet)
    Error,
    /// Info detail (ℹ bullet)
    Info,
    /// Note detail (plain bullet)
    Note,
}

impl DetailKind {
    fn bullet(&self) -> &'static str {
        match self {
            DetailKind::Error => "✖",
            DetailKind::Info => "ℹ",
            DetailKind::Note => "•",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            DetailKind::Error => "error",
            DetailKind::Info => "info",
            DetailKind::Note => "note",
        }
    }
}

/// The content of a message or detail item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContent {
    /// Plain text content
    Plain(String),
    /// Markdown content (backticks mark code spans)
    Markdown(String),
}

impl MessageContent {
    /// Get the raw string content for display
    pub fn as_str(&self) -> &str {
        match self {
            MessageContent::Plain(s) => s,
            MessageContent::Markdown(s) => s,
        }
    }

    /// Convert to JSON value with type information
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;
        match self {
            MessageContent::Plain(s) => json!({
                "type": "plain",
                "content": s
            }),
            MessageContent::Markdown(s) => json!({
                "type": "markdown",
                "content": s
            }),
        }
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        MessageContent::Markdown(s)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        MessageContent::Markdown(s.to_string())
    }
}

/// A detail item in a diagnostic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    /// The kind of detail (error, info, note)
    pub kind: DetailKind,
    /// The content of the detail
    pub content: MessageContent,
    /// Optional source location for this detail
    ///
    /// Lets one message point at several related places, e.g. both the
    /// first and the repeated occurrence of a duplicate key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceInfo>,
}

/// A diagnostic message following tidyverse-style structure.
///
/// Structure:
/// 1. **Code**: Optional error code (e.g., "S-1-2") for searchability
/// 2. **Title**: Brief error message
/// 3. **Kind**: Error, Warning, Info
/// 4. **Problem**: What went wrong
/// 5. **Details**: Specific information
/// 6. **Hints**: Optional guidance for fixing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    /// Optional error code (e.g., "S-1-2")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Brief title for the error
    pub title: String,

    /// The kind of diagnostic (Error, Warning, Info)
    pub kind: DiagnosticKind,

    /// The problem statement
    pub problem: Option<MessageContent>,

    /// Specific error details
    pub details: Vec<DetailItem>,

    /// Optional hints for fixing
    pub hints: Vec<MessageContent>,

    /// Source location for this diagnostic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceInfo>,
}

impl DiagnosticMessage {
    /// Create a new diagnostic message with just a title and kind.
    ///
    /// Note: Consider using [`DiagnosticMessageBuilder`](crate::DiagnosticMessageBuilder) instead.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            code: None,
            title: title.into(),
            kind,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            location: None,
        }
    }

    /// Create an error diagnostic.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    /// Create a warning diagnostic.
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    /// Create an info diagnostic.
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, title)
    }

    /// Set the error code.
    ///
    /// Error codes follow the format `S-<subsystem>-<number>` (e.g., "S-1-1").
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach a source location.
    pub fn with_location(mut self, location: SourceInfo) -> Self {
        self.location = Some(location);
        self
    }

    /// Whether this is an error (as opposed to a warning, info or note).
    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    /// Render this diagnostic message as text following tidyverse style.
    ///
    /// Format:
    /// ```text
    /// Error [S-1-2]: title
    /// Problem statement here
    /// ✖ Error detail 1
    /// ℹ Info detail
    /// ? Hint 1
    /// ```
    ///
    /// When a [`SourceContext`] is supplied and the message has a location in
    /// one of its files, the title and located details are rendered as a
    /// source excerpt instead.
    ///
    /// # Example
    ///
    /// ```
    /// use sjson_error_reporting::DiagnosticMessageBuilder;
    ///
    /// let msg = DiagnosticMessageBuilder::error("Row too long")
    ///     .problem("Rows may have at most one cell more than the header")
    ///     .add_detail("header has 2 columns")
    ///     .build();
    /// let text = msg.to_text(None);
    /// assert!(text.contains("Error: Row too long"));
    /// assert!(text.contains("✖ header has 2 columns"));
    /// ```
    pub fn to_text(&self, ctx: Option<&SourceContext>) -> String {
        let mut result = String::new();

        let excerpt = match (ctx, self.primary_location()) {
            (Some(ctx), Some(location)) => self.render_ariadne_source_context(location, ctx),
            _ => None,
        };

        match excerpt {
            Some(rendered) => {
                result.push_str(&rendered);
                // ariadne already shows title, code, problem and located details
                for detail in self.details.iter().filter(|d| d.location.is_none()) {
                    result.push_str(&format!(
                        "{} {}\n",
                        detail.kind.bullet(),
                        detail.content.as_str()
                    ));
                }
            }
            None => {
                match &self.code {
                    Some(code) => result.push_str(&format!(
                        "{} [{}]: {}\n",
                        self.kind.label(),
                        code,
                        self.title
                    )),
                    None => result.push_str(&format!("{}: {}\n", self.kind.label(), self.title)),
                }
                if let Some(location) = &self.location {
                    let start = location.range.start;
                    result.push_str(&format!("  at {}:{}\n", start.row + 1, start.column + 1));
                }
                if let Some(problem) = &self.problem {
                    result.push_str(problem.as_str());
                    result.push('\n');
                }
                for detail in &self.details {
                    result.push_str(&format!(
                        "{} {}\n",
                        detail.kind.bullet(),
                        detail.content.as_str()
                    ));
                }
            }
        }

        for hint in &self.hints {
            result.push_str(&format!("? {}\n", hint.as_str()));
        }

        result
    }

    /// Render this diagnostic message as a JSON value.
    ///
    /// # Example
    ///
    /// ```
    /// use sjson_error_reporting::DiagnosticMessage;
    ///
    /// let msg = DiagnosticMessage::warning("Duplicate key `a`");
    /// let json = msg.to_json();
    /// assert_eq!(json["kind"], "warning");
    /// assert_eq!(json["title"], "Duplicate key `a`");
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        let mut obj = json!({
            "kind": self.kind.as_str(),
            "title": self.title,
        });

        if let Some(code) = &self.code {
            obj["code"] = json!(code);
            if let Some(subsystem) = crate::catalog::get_subsystem(code) {
                obj["subsystem"] = json!(subsystem);
            }
        }

        if let Some(problem) = &self.problem {
            obj["problem"] = problem.to_json();
        }

        if !self.details.is_empty() {
            let details: Vec<_> = self
                .details
                .iter()
                .map(|d| {
                    let mut detail_obj = json!({
                        "kind": d.kind.as_str(),
                        "content": d.content.to_json()
                    });
                    if let Some(location) = &d.location {
                        detail_obj["range"] = json!(location.range.to_array());
                    }
                    detail_obj
                })
                .collect();
            obj["details"] = json!(details);
        }

        if !self.hints.is_empty() {
            let hints: Vec<_> = self.hints.iter().map(|h| h.to_json()).collect();
            obj["hints"] = json!(hints);
        }

        if let Some(location) = &self.location {
            obj["range"] = json!(location.range.to_array());
        }

        obj
    }

    fn primary_location(&self) -> Option<&SourceInfo> {
        self.location
            .as_ref()
            .or_else(|| self.details.iter().find_map(|d| d.location.as_ref()))
    }

    /// Render source context using ariadne (private helper for to_text).
    fn render_ariadne_source_context(
        &self,
        main_location: &SourceInfo,
        ctx: &SourceContext,
    ) -> Option<String> {
        use ariadne::{Color, Label, Report, ReportKind, Source};
        use sjson_source_map::char_offset;

        let file_id = main_location.file_id?;
        let file = ctx.get_file(file_id)?;
        let content = ctx.file_content(file_id)?;

        let (report_kind, main_color) = match self.kind {
            DiagnosticKind::Error => (ReportKind::Error, Color::Red),
            DiagnosticKind::Warning => (ReportKind::Warning, Color::Yellow),
            DiagnosticKind::Info => (ReportKind::Advice, Color::Cyan),
            DiagnosticKind::Note => (ReportKind::Advice, Color::Blue),
        };

        // ariadne indexes sources by character, not by byte
        let start = char_offset(&content, main_location.start_offset());
        let end = char_offset(&content, main_location.end_offset()).max(start);

        let mut report = Report::build(report_kind, file.path.clone(), start);

        if let Some(code) = &self.code {
            report = report.with_message(format!("[{}] {}", code, self.title));
        } else {
            report = report.with_message(&self.title);
        }

        let main_message = match &self.problem {
            Some(problem) => problem.as_str(),
            None => &self.title,
        };
        report = report.with_label(
            Label::new((file.path.clone(), start..end))
                .with_message(main_message)
                .with_color(main_color),
        );

        for detail in &self.details {
            let Some(detail_loc) = &detail.location else {
                continue;
            };
            if detail_loc.file_id != Some(file_id) {
                continue;
            }
            let detail_start = char_offset(&content, detail_loc.start_offset());
            let detail_end = char_offset(&content, detail_loc.end_offset()).max(detail_start);
            let detail_color = match detail.kind {
                DetailKind::Error => Color::Red,
                DetailKind::Info => Color::Cyan,
                DetailKind::Note => Color::Blue,
            };
            report = report.with_label(
                Label::new((file.path.clone(), detail_start..detail_end))
                    .with_message(detail.content.as_str())
                    .with_color(detail_color),
            );
        }

        let report = report.finish();
        let mut output = Vec::new();
        report
            .write((file.path.clone(), Source::from(content.as_str())), &mut output)
            .ok()?;

        String::from_utf8(output).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagnosticMessageBuilder;
    use sjson_source_map::{FileId, Location, Range};

    fn range(start: usize, end: usize) -> Range {
        Range::new(Location::new(start, 0, start), Location::new(end, 0, end))
    }

    #[test]
    fn test_diagnostic_kind() {
        assert_eq!(DiagnosticKind::Error, DiagnosticKind::Error);
        assert_ne!(DiagnosticKind::Error, DiagnosticKind::Warning);
        assert_eq!(DiagnosticKind::Warning.as_str(), "warning");
    }

    #[test]
    fn test_message_content_from_str() {
        let content: MessageContent = "test".into();
        assert_eq!(content.as_str(), "test");
    }

    #[test]
    fn test_diagnostic_message_constructors() {
        assert_eq!(DiagnosticMessage::error("e").kind, DiagnosticKind::Error);
        assert_eq!(DiagnosticMessage::warning("w").kind, DiagnosticKind::Warning);
        assert_eq!(DiagnosticMessage::info("i").kind, DiagnosticKind::Info);
        assert!(DiagnosticMessage::error("e").is_error());
        assert!(!DiagnosticMessage::warning("w").is_error());
    }

    #[test]
    fn test_with_code() {
        let msg = DiagnosticMessage::error("Unterminated string").with_code("S-1-2");
        assert_eq!(msg.code.as_deref(), Some("S-1-2"));
    }

    #[test]
    fn test_to_text_simple_error() {
        let text = DiagnosticMessage::error("Something went wrong").to_text(None);
        insta::assert_snapshot!(text.trim_end(), @"Error: Something went wrong");
    }

    #[test]
    fn test_to_text_full_message() {
        let msg = DiagnosticMessageBuilder::error("Row too long")
            .with_code("S-2-3")
            .with_location(SourceInfo::anonymous(Range::new(
                Location::new(10, 1, 4),
                Location::new(20, 1, 14),
            )))
            .problem("A row may have at most one cell more than the header")
            .add_detail("header: [\"id1:\", \"id2:\"]")
            .add_hint("Move extra values into an options object?")
            .build();
        let text = msg.to_text(None);
        assert!(text.starts_with("Error [S-2-3]: Row too long\n"));
        assert!(text.contains("  at 2:5\n"));
        assert!(text.contains("A row may have at most one cell more than the header\n"));
        assert!(text.contains("✖ header: [\"id1:\", \"id2:\"]\n"));
        assert!(text.contains("? Move extra values into an options object?\n"));
    }

    #[test]
    fn test_to_json_full_message() {
        let msg = DiagnosticMessageBuilder::warning("Duplicate key `a`")
            .with_code("S-1-6")
            .with_location(SourceInfo::anonymous(range(1, 2)))
            .add_note_at("previous definition", SourceInfo::anonymous(range(5, 6)))
            .build();
        let json = msg.to_json();

        assert_eq!(json["kind"], "warning");
        assert_eq!(json["code"], "S-1-6");
        assert_eq!(json["subsystem"], "parse");
        assert_eq!(json["range"], serde_json::json!([0, 1, 0, 2]));
        assert_eq!(json["details"][0]["kind"], "note");
        assert_eq!(json["details"][0]["range"], serde_json::json!([0, 5, 0, 6]));
    }

    #[test]
    fn test_location_in_to_text_with_context() {
        let mut ctx = SourceContext::new();
        let file_id = ctx.add_file("test.jbeam".to_string(), Some("{a:1 a:2}".to_string()));

        let msg = DiagnosticMessageBuilder::warning("Duplicate key `a`")
            .with_code("S-1-6")
            .with_location(SourceInfo::original(file_id, range(1, 2)))
            .build();
        let text = msg.to_text(Some(&ctx));

        assert!(text.contains("Duplicate key `a`"));
        assert!(text.contains("test.jbeam"));
    }

    #[test]
    fn test_location_with_unknown_file_falls_back_to_plain_text() {
        let ctx = SourceContext::new();
        let msg = DiagnosticMessage::error("Missing file")
            .with_location(SourceInfo::original(FileId(7), range(0, 1)));
        let text = msg.to_text(Some(&ctx));
        assert!(text.starts_with("Error: Missing file\n"));
    }
}
