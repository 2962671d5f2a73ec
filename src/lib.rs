//! Language server for the Godot shading language.
//!
//! Three pieces compose the server: a framed JSON-RPC transport over
//! stdin/stdout (`lsp`), an incremental document store that applies LSP's
//! UTF-16-indexed edits to byte buffers (`document`), and a static,
//! context-filtered completion catalog (`catalog`).

use lsp_types::{
    ClientCapabilities, CompletionList, CompletionOptions, CompletionParams,
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    ServerCapabilities, TextDocumentSyncCapability, TextDocumentSyncKind, TextDocumentSyncOptions,
};

pub mod catalog;
pub mod document;
pub mod lsp;

pub use document::{BufferKind, DocumentStore};
pub use lsp::{CancelToken, LanguageHandler, ResponseError, Server, TransportError};

/// The Godot shading language handler: owns the open documents and answers
/// completion from the static catalog.
#[derive(Debug, Default)]
pub struct Handler {
    documents: DocumentStore,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler whose documents use the given buffer implementation.
    pub fn with_buffer(kind: BufferKind) -> Self {
        Self {
            documents: DocumentStore::with_buffer(kind),
        }
    }
}

impl LanguageHandler for Handler {
    fn initialize(
        &mut self,
        _cancel: &CancelToken,
        _capabilities: ClientCapabilities,
    ) -> Result<ServerCapabilities, ResponseError> {
        Ok(ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::INCREMENTAL),
                    ..Default::default()
                },
            )),
            completion_provider: Some(CompletionOptions::default()),
            ..Default::default()
        })
    }

    fn did_open(
        &mut self,
        _cancel: &CancelToken,
        params: DidOpenTextDocumentParams,
    ) -> Result<(), ResponseError> {
        self.documents
            .open(params.text_document.uri, &params.text_document.text);
        Ok(())
    }

    fn did_change(
        &mut self,
        _cancel: &CancelToken,
        params: DidChangeTextDocumentParams,
    ) -> Result<(), ResponseError> {
        self.documents
            .apply_changes(&params.text_document.uri, &params.content_changes)?;
        Ok(())
    }

    fn did_close(
        &mut self,
        _cancel: &CancelToken,
        params: DidCloseTextDocumentParams,
    ) -> Result<(), ResponseError> {
        self.documents.close(&params.text_document.uri);
        Ok(())
    }

    fn completion(
        &mut self,
        _cancel: &CancelToken,
        params: CompletionParams,
    ) -> Result<CompletionList, ResponseError> {
        let position_params = &params.text_document_position;
        let doc = self.documents.get(&position_params.text_document.uri)?;
        Ok(lsp::completion_at_position(doc, position_params.position)?)
    }
}
