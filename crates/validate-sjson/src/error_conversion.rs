//! Conversion from strict-mode parse errors to diagnostic messages.

use sjson::ParseError;
use sjson_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder, get_error_info};
use sjson_source_map::{FileId, SourceInfo};

/// Build a diagnostic for the error that stopped a strict parse.
///
/// The catalog's message template becomes the problem statement.
pub fn parse_error_to_diagnostic(error: &ParseError, file_id: FileId) -> DiagnosticMessage {
    let mut builder = DiagnosticMessageBuilder::error(error.message.clone())
        .with_code(error.code.clone())
        .with_location(SourceInfo::original(file_id, error.range));
    if let Some(info) = get_error_info(&error.code) {
        builder = builder.problem(info.message_template.clone());
    }
    builder
        .add_hint("Run without --strict to see every warning as well?")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sjson_source_map::{Location, Range};

    #[test]
    fn test_catalog_template_becomes_problem() {
        let error = ParseError {
            message: "Unterminated string".to_string(),
            code: "S-1-2".to_string(),
            range: Range::new(Location::new(3, 0, 3), Location::new(8, 0, 8)),
        };
        let diagnostic = parse_error_to_diagnostic(&error, FileId(0));
        assert_eq!(diagnostic.code.as_deref(), Some("S-1-2"));
        assert_eq!(
            diagnostic.problem.as_ref().map(|p| p.as_str()),
            Some("A double-quoted string was opened but never closed.")
        );
        assert_eq!(diagnostic.location.and_then(|l| l.file_id), Some(FileId(0)));
    }
}
