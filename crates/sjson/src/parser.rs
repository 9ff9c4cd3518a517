/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Recursive-descent SJSON parser.
//!
//! A single pass over the text produces the data tree and the flat node
//! arena at the same time. The parser never panics on bad input: the first
//! fatal condition is recorded and every loop unwinds, leaving a partial
//! tree behind. Duplicate keys are only warnings.

use crate::document::Document;
use crate::error::{ParseError, Result, codes};
use crate::node::{Node, NodeId, NodeKind, PathSegment};
use crate::options::ParseOptions;
use crate::position::LineIndex;
use crate::value::{NodeRef, Object, Value, ValueKind};
use sjson_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use sjson_source_map::{Location, Range, SourceInfo, offset_to_location};
use std::collections::HashMap;
use tracing::debug;

/// Characters that end an unquoted key or word.
const DELIMITERS: &[char] = &[',', ':', '=', '{', '}', '[', ']', '"'];

/// Parse with default options, collecting diagnostics.
///
/// ```
/// let doc = sjson::parse("{a:1 b:\"x\"}");
/// assert!(doc.diagnostics().is_empty());
/// assert_eq!(doc.root().get("a").and_then(|v| v.as_f64()), Some(1.0));
/// ```
pub fn parse(text: &str) -> Document {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse, collecting diagnostics. Never fails; a fatal error leaves a
/// partial tree and is available through [`Document::fatal`].
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Document {
    debug!(origin = %options.origin, bytes = text.len(), "parsing sjson document");
    let doc = Parser::new(text, options).document();
    debug!(
        origin = %options.origin,
        nodes = doc.nodes().len(),
        errors = doc.errors().len(),
        warnings = doc.warnings().len(),
        "parsed sjson document"
    );
    doc
}

/// Parse, failing on the first fatal error. Warnings do not fail.
pub fn parse_strict(text: &str, options: &ParseOptions) -> Result<Document> {
    let doc = parse_with_options(text, options);
    match doc.fatal {
        Some(err) => Err(err.into()),
        None => Ok(doc),
    }
}

/// Parse a single standalone value, such as the text of one node's range.
///
/// Unlike a document, a standalone value is never a bare object.
pub fn parse_value(text: &str) -> Result<Value> {
    let options = ParseOptions::default();
    let mut parser = Parser::new(text, &options);
    parser.skip_trivia(None, 0);
    let value = parser.value(0, None, None, None);
    parser.expect_end(None, 0);
    match parser.fatal {
        Some(err) => Err(err.into()),
        None => Ok(value),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    row: usize,
    col: usize,
    options: &'a ParseOptions,
    nodes: Vec<Node>,
    diagnostics: Vec<DiagnosticMessage>,
    fatal: Option<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            src,
            pos: 0,
            row: 0,
            col: 0,
            options,
            nodes: Vec::new(),
            diagnostics: Vec::new(),
            fatal: None,
        }
    }

    // Cursor

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.row += 1;
            self.col = 0;
        } else {
            self.col += c.len_utf16();
        }
        Some(c)
    }

    fn here(&self) -> Location {
        Location::new(self.pos, self.row, self.col)
    }

    fn since(&self, start: Location) -> Range {
        Range::new(start, self.here())
    }

    /// Whether the cursor sits on a character that may appear in an
    /// unquoted key or bare word.
    fn at_word_char(&self) -> bool {
        match self.peek() {
            Some('/') => !matches!(self.peek_second(), Some('/' | '*')),
            Some(c) => !c.is_whitespace() && !DELIMITERS.contains(&c),
            None => false,
        }
    }

    fn word(&mut self) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while self.at_word_char() {
            self.bump();
        }
        &src[start..self.pos]
    }

    // Diagnostics

    fn aborted(&self) -> bool {
        self.fatal.is_some()
    }

    fn source_info(&self, range: Range) -> SourceInfo {
        SourceInfo::new(self.options.file_id, range)
    }

    /// Record a fatal error. Only the first one counts; it stops the parse.
    fn fail(&mut self, code: &str, message: impl Into<String>, range: Range) {
        if self.aborted() {
            return;
        }
        let message = message.into();
        let diagnostic = DiagnosticMessageBuilder::error(message.clone())
            .with_code(code)
            .with_location(self.source_info(range))
            .build();
        self.diagnostics.push(diagnostic);
        self.fatal = Some(ParseError {
            message,
            code: code.to_string(),
            range,
        });
    }

    // Node arena

    fn open(
        &mut self,
        kind: NodeKind,
        depth: usize,
        key: Option<PathSegment>,
        parent: Option<NodeId>,
        comment: Option<String>,
    ) -> NodeId {
        if self.nodes.len() == self.options.max_nodes {
            let here = Range::point(self.here());
            self.fail(
                codes::LIMIT_EXCEEDED,
                format!("Document has more than {} nodes", self.options.max_nodes),
                here,
            );
        }
        let id = NodeId(self.nodes.len());
        let range = Range::point(self.here());
        let parent = if self.options.cyclic { parent } else { None };
        self.nodes.push(Node {
            id,
            kind,
            range,
            depth,
            comment,
            key,
            parent,
            value: None,
        });
        id
    }

    fn close(&mut self, id: NodeId) {
        let end = self.here();
        self.nodes[id.0].range.end = end;
    }

    fn link_value(&mut self, id: NodeId, value: NodeId) {
        if self.options.cyclic {
            self.nodes[id.0].value = Some(value);
        }
    }

    fn node_ref(&self, id: NodeId) -> NodeRef {
        NodeRef {
            id,
            range: self.nodes[id.0].range,
        }
    }

    // Grammar

    fn document(mut self) -> Document {
        let root = self.open(NodeKind::Object, 0, None, None, None);
        self.link_value(root, root);
        let leading = self.skip_trivia(Some(root), 1);

        let kind = match self.peek() {
            Some('{') if !self.aborted() => {
                let opened_at = self.here();
                self.bump();
                let object = self.object_body(root, 0, Some('}'), opened_at, None);
                self.expect_end(Some(root), 1);
                ValueKind::Object(object)
            }
            Some('[') if !self.aborted() => {
                self.nodes[root.0].kind = NodeKind::Array;
                let opened_at = self.here();
                self.bump();
                let items = self.array_body(root, 0, opened_at);
                self.expect_end(Some(root), 1);
                ValueKind::Array(items)
            }
            _ => ValueKind::Object(self.object_body(root, 0, None, Location::default(), leading)),
        };

        let end = offset_to_location(self.src, self.src.len()).unwrap_or_else(|| self.here());
        self.nodes[root.0].range.end = end;
        let root_value = Value::with_source(kind, self.node_ref(root));

        Document {
            origin: self.options.origin.clone(),
            file_id: self.options.file_id,
            cyclic: self.options.cyclic,
            root: root_value,
            line_index: LineIndex::build(&self.nodes),
            nodes: self.nodes,
            diagnostics: self.diagnostics,
            fatal: self.fatal,
        }
    }

    /// Only trivia may follow the root value.
    fn expect_end(&mut self, parent: Option<NodeId>, depth: usize) {
        self.skip_trivia(parent, depth);
        if self.aborted() || self.peek().is_none() {
            return;
        }
        let start = self.here();
        let rest = self.src.len() - self.pos;
        let end = offset_to_location(self.src, self.src.len()).unwrap_or(start);
        self.fail(
            codes::TRAILING_CONTENT,
            format!("Unexpected content after the root value ({rest} bytes)"),
            Range::new(start, end),
        );
    }

    /// Skip whitespace, commas and comments, emitting a node per comment.
    /// Returns the text of the last comment seen.
    fn skip_trivia(&mut self, parent: Option<NodeId>, depth: usize) -> Option<String> {
        let mut last_comment = None;
        while !self.aborted() {
            match self.peek() {
                Some(c) if c.is_whitespace() || c == ',' => {
                    self.bump();
                }
                Some('/') if self.peek_second() == Some('/') => {
                    last_comment = Some(self.line_comment(parent, depth));
                }
                Some('/') if self.peek_second() == Some('*') => {
                    last_comment = self.block_comment(parent, depth);
                }
                _ => break,
            }
        }
        last_comment
    }

    fn line_comment(&mut self, parent: Option<NodeId>, depth: usize) -> String {
        let id = self.open(NodeKind::Comment, depth, None, parent, None);
        let start = self.pos;
        self.bump();
        self.bump();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
        let text = self.src[start + 2..self.pos].trim().to_string();
        self.close(id);
        self.nodes[id.0].comment = Some(text.clone());
        text
    }

    fn block_comment(&mut self, parent: Option<NodeId>, depth: usize) -> Option<String> {
        let id = self.open(NodeKind::Comment, depth, None, parent, None);
        let opened_at = self.here();
        let start = self.pos;
        self.bump();
        self.bump();
        loop {
            match self.peek() {
                None => {
                    self.close(id);
                    let range = self.since(opened_at);
                    self.fail(codes::UNTERMINATED_COMMENT, "Unterminated block comment", range);
                    return None;
                }
                Some('*') if self.peek_second() == Some('/') => {
                    self.bump();
                    self.bump();
                    break;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        let text = self.src[start + 2..self.pos - 2].trim().to_string();
        self.close(id);
        self.nodes[id.0].comment = Some(text.clone());
        Some(text)
    }

    /// Entries of an object up to `closer`, or to end of input for a bare
    /// root object.
    fn object_body(
        &mut self,
        id: NodeId,
        depth: usize,
        closer: Option<char>,
        opened_at: Location,
        mut leading: Option<String>,
    ) -> Object {
        let mut object = Object::new();
        let mut first_keys: HashMap<String, Range> = HashMap::new();
        let child_depth = depth + 1;
        while !self.aborted() {
            let comment = self.skip_trivia(Some(id), child_depth).or(leading.take());
            if self.aborted() {
                break;
            }
            match self.peek() {
                None => {
                    if closer.is_some() {
                        let range = self.since(opened_at);
                        self.fail(codes::UNTERMINATED_CONTAINER, "Unterminated object", range);
                    }
                    break;
                }
                Some(c) if Some(c) == closer => {
                    self.bump();
                    break;
                }
                Some(c @ ('}' | ']')) => {
                    let start = self.here();
                    self.bump();
                    let range = self.since(start);
                    self.fail(
                        codes::UNEXPECTED_CHARACTER,
                        format!("Unexpected `{c}` in object"),
                        range,
                    );
                    break;
                }
                Some(_) => self.entry(id, child_depth, comment, &mut object, &mut first_keys),
            }
        }
        object
    }

    /// One `key sep value` entry; emits the key, separator and value nodes
    /// as siblings.
    fn entry(
        &mut self,
        parent: NodeId,
        depth: usize,
        comment: Option<String>,
        object: &mut Object,
        first_keys: &mut HashMap<String, Range>,
    ) {
        let key_id = self.open(NodeKind::Key, depth, None, Some(parent), comment.clone());
        let key = self.key();
        self.close(key_id);
        let Some(key) = key else {
            return;
        };
        let segment = PathSegment::Key(key.clone());
        self.nodes[key_id.0].key = Some(segment.clone());
        let key_range = self.nodes[key_id.0].range;

        self.skip_trivia(Some(parent), depth);
        if self.aborted() {
            return;
        }
        let separator = match self.peek() {
            Some(':' | '=') => {
                let id = self.open(
                    NodeKind::Separator,
                    depth,
                    Some(segment.clone()),
                    Some(parent),
                    None,
                );
                self.bump();
                self.close(id);
                id
            }
            _ => {
                let here = Range::point(self.here());
                self.fail(
                    codes::MISSING_SEPARATOR,
                    format!("Expected `:` or `=` after key `{key}`"),
                    here,
                );
                return;
            }
        };

        self.skip_trivia(Some(parent), depth);
        if self.aborted() {
            return;
        }
        let value = self.value(depth, Some(parent), Some(segment), comment);
        if let Some(source) = value.source {
            self.link_value(key_id, source.id);
            self.link_value(separator, source.id);
        }

        match first_keys.get(&key) {
            Some(first) => {
                let warning = DiagnosticMessageBuilder::warning(format!("Duplicate key `{key}`"))
                    .with_code(codes::DUPLICATE_KEY)
                    .with_location(self.source_info(*first))
                    .add_note_at("redefined here", self.source_info(key_range))
                    .add_hint("The last definition wins")
                    .build();
                self.diagnostics.push(warning);
            }
            None => {
                first_keys.insert(key.clone(), key_range);
            }
        }
        object.insert(key, value);
    }

    fn key(&mut self) -> Option<String> {
        if self.peek() == Some('"') {
            return self.string_literal();
        }
        let word = self.word();
        if !word.is_empty() {
            return Some(word.to_string());
        }
        let start = self.here();
        let c = self.bump();
        let range = self.since(start);
        let message = match c {
            Some(c) => format!("Unexpected `{c}` where a key was expected"),
            None => "Unexpected end of input where a key was expected".to_string(),
        };
        self.fail(codes::UNEXPECTED_CHARACTER, message, range);
        None
    }

    fn array_body(&mut self, id: NodeId, depth: usize, opened_at: Location) -> Vec<Value> {
        let mut items = Vec::new();
        while !self.aborted() {
            let comment = self.skip_trivia(Some(id), depth + 1);
            if self.aborted() {
                break;
            }
            match self.peek() {
                None => {
                    let range = self.since(opened_at);
                    self.fail(codes::UNTERMINATED_CONTAINER, "Unterminated array", range);
                    break;
                }
                Some(']') => {
                    self.bump();
                    break;
                }
                Some('}') => {
                    let start = self.here();
                    self.bump();
                    let range = self.since(start);
                    self.fail(codes::UNEXPECTED_CHARACTER, "Unexpected `}` in array", range);
                    break;
                }
                Some(_) => {
                    let segment = PathSegment::Index(items.len());
                    let value = self.value(depth + 1, Some(id), Some(segment), comment);
                    items.push(value);
                }
            }
        }
        items
    }

    fn value(
        &mut self,
        depth: usize,
        parent: Option<NodeId>,
        segment: Option<PathSegment>,
        comment: Option<String>,
    ) -> Value {
        match self.peek() {
            Some(c @ ('{' | '[')) => self.container(c, depth, parent, segment, comment),
            Some(_) => self.scalar(depth, parent, segment, comment),
            None => {
                let here = Range::point(self.here());
                self.fail(
                    codes::UNEXPECTED_CHARACTER,
                    "Unexpected end of input where a value was expected",
                    here,
                );
                Value::null()
            }
        }
    }

    fn container(
        &mut self,
        open: char,
        depth: usize,
        parent: Option<NodeId>,
        segment: Option<PathSegment>,
        comment: Option<String>,
    ) -> Value {
        let node_kind = if open == '{' {
            NodeKind::Object
        } else {
            NodeKind::Array
        };
        let id = self.open(node_kind, depth, segment, parent, comment);
        self.link_value(id, id);
        let opened_at = self.here();
        self.bump();

        let kind = if depth > self.options.max_depth {
            let range = self.since(opened_at);
            self.fail(
                codes::LIMIT_EXCEEDED,
                format!("Nesting is deeper than {} levels", self.options.max_depth),
                range,
            );
            ValueKind::Null
        } else if node_kind == NodeKind::Object {
            ValueKind::Object(self.object_body(id, depth, Some('}'), opened_at, None))
        } else {
            ValueKind::Array(self.array_body(id, depth, opened_at))
        };

        self.close(id);
        Value::with_source(kind, self.node_ref(id))
    }

    fn scalar(
        &mut self,
        depth: usize,
        parent: Option<NodeId>,
        segment: Option<PathSegment>,
        comment: Option<String>,
    ) -> Value {
        let id = self.open(NodeKind::Value, depth, segment, parent, comment);
        self.link_value(id, id);
        let kind = match self.peek() {
            Some('"') => self.string_literal().map(ValueKind::String),
            Some('-' | '+' | '.' | '0'..='9') => self.number().map(ValueKind::Number),
            Some(_) if self.at_word_char() => self.keyword(),
            Some(c) => {
                let start = self.here();
                self.bump();
                let range = self.since(start);
                self.fail(
                    codes::UNEXPECTED_CHARACTER,
                    format!("Unexpected `{c}` where a value was expected"),
                    range,
                );
                None
            }
            None => None,
        };
        self.close(id);
        Value::with_source(kind.unwrap_or(ValueKind::Null), self.node_ref(id))
    }

    fn keyword(&mut self) -> Option<ValueKind> {
        let start = self.here();
        match self.word() {
            "true" => Some(ValueKind::Bool(true)),
            "false" => Some(ValueKind::Bool(false)),
            "null" => Some(ValueKind::Null),
            word => {
                let message = format!("Unexpected word `{word}` where a value was expected");
                let range = self.since(start);
                self.fail(codes::UNEXPECTED_CHARACTER, message, range);
                None
            }
        }
    }

    fn digits(&mut self) -> usize {
        let mut count = 0;
        while matches!(self.peek(), Some('0'..='9')) {
            self.bump();
            count += 1;
        }
        count
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.here();
        if matches!(self.peek(), Some('+' | '-')) {
            self.bump();
        }
        let mut digits = self.digits();
        if self.peek() == Some('.') {
            self.bump();
            digits += self.digits();
        }
        let mut valid = digits > 0;
        if valid && matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            valid = self.digits() > 0;
        }
        if self.at_word_char() {
            self.word();
            valid = false;
        }

        let src = self.src;
        let text = &src[start.offset..self.pos];
        match text.parse::<f64>() {
            Ok(n) if valid => Some(n),
            _ => {
                let range = self.since(start);
                self.fail(codes::INVALID_NUMBER, format!("Invalid number `{text}`"), range);
                None
            }
        }
    }

    /// A double-quoted string; the cursor sits on the opening quote.
    fn string_literal(&mut self) -> Option<String> {
        let start = self.here();
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => break,
                Some('"') => return Some(out),
                Some('\\') => match self.bump() {
                    None => break,
                    Some('t' | '9') => out.push('\t'),
                    Some('n') => out.push('\n'),
                    Some('r' | '0') => out.push('\r'),
                    Some('f') => out.push('\u{0c}'),
                    Some('b') => out.push('\u{08}'),
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some('\n') => {}
                    Some('\r') => {
                        if self.peek() == Some('\n') {
                            self.bump();
                        }
                    }
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                Some(c) => out.push(c),
            }
        }
        let range = self.since(start);
        self.fail(codes::UNTERMINATED_STRING, "Unterminated string", range);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn string_of(text: &str) -> String {
        parse_value(text)
            .unwrap()
            .as_str()
            .map(str::to_string)
            .unwrap()
    }

    #[test]
    fn test_escapes() {
        assert_eq!(string_of(r#""a\tb\nc""#), "a\tb\nc");
        assert_eq!(string_of(r#""\9\0""#), "\t\r");
        assert_eq!(string_of(r#""\"\\""#), "\"\\");
        assert_eq!(string_of(r#""\q""#), "\\q");
        assert_eq!(string_of("\"one \\\ntwo\""), "one two");
        assert_eq!(string_of("\"one \\\r\ntwo\""), "one two");
    }

    #[test]
    fn test_raw_newline_in_string() {
        let doc = parse("{a:\"x\ny\" b:1}");
        assert!(doc.diagnostics().is_empty());
        assert_eq!(doc.root().get("a").and_then(Value::as_str), Some("x\ny"));
        let b = doc
            .nodes()
            .iter()
            .find(|n| n.kind == NodeKind::Key && n.key == Some(PathSegment::Key("b".into())))
            .unwrap();
        assert_eq!(b.range.start.row, 1);
    }

    #[test]
    fn test_numbers() {
        for (text, expected) in [
            ("0", 0.0),
            ("-12", -12.0),
            ("+3", 3.0),
            ("1.5", 1.5),
            (".5", 0.5),
            ("1e3", 1000.0),
            ("-2.5E-1", -0.25),
        ] {
            assert_eq!(parse_value(text).unwrap().as_f64(), Some(expected), "{text}");
        }
    }

    #[test]
    fn test_invalid_numbers() {
        for text in ["-", "1e", "12abc", "1.2.3", "+."] {
            let Err(Error::Parse(err)) = parse_value(text) else {
                panic!("{text} should fail");
            };
            assert_eq!(err.code, codes::INVALID_NUMBER, "{text}");
        }
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_value("true").unwrap().as_bool(), Some(true));
        assert_eq!(parse_value("false").unwrap().as_bool(), Some(false));
        assert!(parse_value("null").unwrap().is_null());
        let Err(Error::Parse(err)) = parse_value("nope") else {
            panic!("bare word should fail");
        };
        assert_eq!(err.code, codes::UNEXPECTED_CHARACTER);
    }

    #[test]
    fn test_unquoted_keys_stop_at_delimiters() {
        let doc = parse("{id1:\"a\" weird-key.x = 2}");
        assert!(doc.diagnostics().is_empty());
        let keys: Vec<_> = doc.root().as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["id1", "weird-key.x"]);
    }

    #[test]
    fn test_utf16_columns() {
        let doc = parse("{\"😀\":1 b:2}");
        let b = doc
            .nodes()
            .iter()
            .find(|n| n.key == Some(PathSegment::Key("b".into())) && n.kind == NodeKind::Key)
            .unwrap();
        // the emoji is two UTF-16 units and four bytes
        assert_eq!(b.range.start.column, 8);
        assert_eq!(b.range.start.offset, 10);
    }

    #[test]
    fn test_emission_order_and_depth() {
        let doc = parse("{a:[1 2]}");
        let kinds: Vec<_> = doc.nodes().iter().map(|n| (n.kind, n.depth)).collect();
        assert_eq!(
            kinds,
            vec![
                (NodeKind::Object, 0),
                (NodeKind::Key, 1),
                (NodeKind::Separator, 1),
                (NodeKind::Array, 1),
                (NodeKind::Value, 2),
                (NodeKind::Value, 2),
            ]
        );
        for (i, node) in doc.nodes().iter().enumerate() {
            assert_eq!(node.id, NodeId(i));
        }
    }

    #[test]
    fn test_back_references() {
        let options = ParseOptions::new().with_back_references(true);
        let doc = parse_with_options("{a:{b:1}}", &options);
        let nodes = doc.nodes();
        // 0 root, 1 key a, 2 sep, 3 object, 4 key b, 5 sep, 6 value
        assert_eq!(nodes[1].value, Some(NodeId(3)));
        assert_eq!(nodes[2].value, Some(NodeId(3)));
        assert_eq!(nodes[3].value, Some(NodeId(3)));
        assert_eq!(nodes[3].parent, Some(NodeId(0)));
        assert_eq!(nodes[6].parent, Some(NodeId(3)));
        assert_eq!(nodes[0].parent, None);

        let plain = parse("{a:{b:1}}");
        assert!(plain.nodes().iter().all(|n| n.parent.is_none() && n.value.is_none()));
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::new().with_max_depth(2);
        let doc = parse_with_options("{a:{b:{c:{}}}}", &options);
        assert_eq!(doc.fatal().map(|e| e.code.as_str()), Some(codes::LIMIT_EXCEEDED));
    }

    #[test]
    fn test_node_limit() {
        let options = ParseOptions::new().with_max_nodes(4);
        let doc = parse_with_options("[1 2 3 4 5]", &options);
        assert_eq!(doc.fatal().map(|e| e.code.as_str()), Some(codes::LIMIT_EXCEEDED));
    }
}
