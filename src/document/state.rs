//! Open-document bookkeeping for the language server.

use std::collections::HashMap;

use lsp_types::{TextDocumentContentChangeEvent, Url};

use super::buffer::BufferKind;
use super::text::{Document, DocumentError};

/// Storage for open documents, keyed by URI. The store exclusively owns its
/// documents and is only touched from the serve loop, so there is no
/// locking.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<Url, Document>,
    buffer: BufferKind,
}

impl DocumentStore {
    /// Creates an empty store using the default buffer implementation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose documents use the given buffer
    /// implementation.
    pub fn with_buffer(kind: BufferKind) -> Self {
        Self {
            documents: HashMap::new(),
            buffer: kind,
        }
    }

    /// Opens a document, replacing any previous one under the same URI.
    pub fn open(&mut self, uri: Url, text: &str) {
        self.documents.insert(uri, Document::new(text, self.buffer));
    }

    /// Closes a document. Closing an unknown URI is a no-op.
    pub fn close(&mut self, uri: &Url) {
        self.documents.remove(uri);
    }

    pub fn get(&self, uri: &Url) -> Result<&Document, DocumentError> {
        self.documents
            .get(uri)
            .ok_or_else(|| DocumentError::NotFound(uri.to_string()))
    }

    /// Applies content changes to a document in arrival order. Each change
    /// is all-or-nothing; a failing change stops the batch.
    pub fn apply_changes(
        &mut self,
        uri: &Url,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Result<(), DocumentError> {
        let doc = self
            .documents
            .get_mut(uri)
            .ok_or_else(|| DocumentError::NotFound(uri.to_string()))?;
        for change in changes {
            doc.apply_change(change)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri() -> Url {
        Url::parse("file:///t.gdshader").unwrap()
    }

    #[test]
    fn open_close_lifecycle() {
        let mut store = DocumentStore::new();
        store.open(uri(), "shader_type spatial;\n");
        assert_eq!(store.get(&uri()).unwrap().bytes(), b"shader_type spatial;\n");

        store.close(&uri());
        assert!(matches!(store.get(&uri()), Err(DocumentError::NotFound(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn reopen_is_idempotent() {
        let mut store = DocumentStore::new();
        store.open(uri(), "hello");
        store.open(uri(), "hello");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&uri()).unwrap().bytes(), b"hello");
    }

    #[test]
    fn changes_to_unknown_document_fail_with_uri() {
        let mut store = DocumentStore::new();
        let err = store.apply_changes(&uri(), &[]).unwrap_err();
        assert_eq!(err.to_string(), "document not found: file:///t.gdshader");
    }

    #[test]
    fn changes_apply_in_order() {
        let mut store = DocumentStore::new();
        store.open(uri(), "");
        let changes: Vec<_> = ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, text)| TextDocumentContentChangeEvent {
                range: Some(lsp_types::Range::new(
                    lsp_types::Position::new(0, i as u32),
                    lsp_types::Position::new(0, i as u32),
                )),
                range_length: None,
                text: text.to_string(),
            })
            .collect();
        store.apply_changes(&uri(), &changes).unwrap();
        assert_eq!(store.get(&uri()).unwrap().bytes(), b"abc");
    }
}
