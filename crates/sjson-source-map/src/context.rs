//! Source context for managing files

use crate::types::FileId;
use serde::{Deserialize, Serialize};

/// Context for managing source files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceContext {
    files: Vec<SourceFile>,
}

/// A source file with content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// File path or origin label
    pub path: String,
    /// File content
    ///
    /// When None, content should be read from disk using the path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl SourceContext {
    /// Create a new empty source context
    pub fn new() -> Self {
        SourceContext { files: Vec::new() }
    }

    /// Add a file to the context and return its ID
    ///
    /// - If content is Some: creates an in-memory file used for rendering.
    /// - If content is None: the file is read from disk when its content is needed.
    pub fn add_file(&mut self, path: String, content: Option<String>) -> FileId {
        let id = FileId(self.files.len());
        self.files.push(SourceFile { path, content });
        id
    }

    /// Get a file by ID
    pub fn get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    /// Content of a file, reading it from disk when it was registered without content.
    pub fn file_content(&self, id: FileId) -> Option<String> {
        let file = self.get_file(id)?;
        match &file.content {
            Some(content) => Some(content.clone()),
            None => std::fs::read_to_string(&file.path).ok(),
        }
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if no files are registered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
