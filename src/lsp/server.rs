//! The serve loop: reads frames, dispatches requests and notifications to a
//! handler, and writes replies.
//!
//! Dispatch is strictly sequential. A message is fully handled and its
//! response written before the next frame is read, so the effects of one
//! notification are always visible to the next message on the connection.

use std::io::{self, Read, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};

use lsp_types::{
    ClientCapabilities, ClientInfo, CompletionList, CompletionParams,
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    InitializeResult, ServerCapabilities, ServerInfo,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::{to_raw_value, RawValue};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::error::ResponseError;
use super::framing::{write_frame, FrameReader, TransportError};

/// Carrier for request cancellation. `$/cancelRequest` is accepted but not
/// acted on, so the token is inert; handlers take it so their signatures
/// already have a seat for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct CancelToken;

/// The language-specific half of the server. The transport owns framing,
/// envelope handling, `shutdown` and `exit`; everything else lands here.
pub trait LanguageHandler {
    fn initialize(
        &mut self,
        cancel: &CancelToken,
        capabilities: ClientCapabilities,
    ) -> Result<ServerCapabilities, ResponseError>;

    fn did_open(
        &mut self,
        cancel: &CancelToken,
        params: DidOpenTextDocumentParams,
    ) -> Result<(), ResponseError>;

    fn did_change(
        &mut self,
        cancel: &CancelToken,
        params: DidChangeTextDocumentParams,
    ) -> Result<(), ResponseError>;

    fn did_close(
        &mut self,
        cancel: &CancelToken,
        params: DidCloseTextDocumentParams,
    ) -> Result<(), ResponseError>;

    fn completion(
        &mut self,
        cancel: &CancelToken,
        params: CompletionParams,
    ) -> Result<CompletionList, ResponseError>;
}

// The subset of the initialize params the server reads. Everything defaults
// so a minimal client can send empty params.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InitializeRequestParams {
    client_info: Option<ClientInfo>,
    capabilities: ClientCapabilities,
}

#[derive(Debug, Deserialize)]
struct RequestMessage {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    method: String,
    #[serde(default)]
    params: Value,
}

// The result is kept as pre-serialized JSON so handler output reaches the
// wire byte-for-byte, without a round-trip through a sorted value tree.
#[derive(Serialize)]
struct ResponseMessage<'a> {
    jsonrpc: &'static str,
    id: &'a Value,
    result: &'a RawValue,
}

#[derive(Serialize)]
struct ErrorResponseMessage<'a> {
    jsonrpc: &'static str,
    id: &'a Value,
    error: &'a ResponseError,
}

/// LSP server over a pair of byte streams.
pub struct Server<R, W, H> {
    reader: FrameReader<R>,
    writer: W,
    info: ServerInfo,
    handler: H,
    shutdown_requested: bool,
}

impl<R: Read, W: Write, H: LanguageHandler> Server<R, W, H> {
    pub fn new(reader: R, writer: W, info: ServerInfo, handler: H) -> Self {
        Self {
            reader: FrameReader::new(reader),
            writer,
            info,
            handler,
            shutdown_requested: false,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Runs the server until `exit` or end of input. A framing error is
    /// fatal and returned to the caller.
    pub fn serve(&mut self) -> Result<(), TransportError> {
        info!(
            name = %self.info.name,
            version = self.info.version.as_deref().unwrap_or(""),
            "server is running"
        );

        while let Some(payload) = self.reader.next_frame()? {
            if !self.process_message(&payload) {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Handles one frame. Returns false when the serve loop should stop.
    fn process_message(&mut self, payload: &[u8]) -> bool {
        let request: RequestMessage = match serde_json::from_slice(payload) {
            Ok(request) => request,
            Err(err) => {
                error!(%err, "bad request");
                return true;
            }
        };

        let Some(id) = request.id else {
            debug!(method = %request.method, "received notification");

            if request.method == "exit" {
                if !self.shutdown_requested {
                    warn!("exit received without a prior shutdown");
                }
                info!("exiting");
                return false;
            }

            if let Err(err) = self.handle_notification(&request.method, request.params) {
                error!(method = %request.method, %err, "error handling notification");
            }
            return true;
        };

        debug!(method = %request.method, "received request");

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.handle_request(&request.method, request.params)
        }))
        .unwrap_or_else(|_| Err(ResponseError::internal("handler panicked")));

        let written = match outcome {
            Ok(result) => self.write_message(&ResponseMessage {
                jsonrpc: "2.0",
                id: &id,
                result: &result,
            }),
            Err(err) => {
                error!(method = %request.method, %err, "error handling request");
                self.write_message(&ErrorResponseMessage {
                    jsonrpc: "2.0",
                    id: &id,
                    error: &err,
                })
            }
        };
        if let Err(err) = written {
            error!(%err, "failed to write response");
        }

        true
    }

    fn handle_request(
        &mut self,
        method: &str,
        params: Value,
    ) -> Result<Box<RawValue>, ResponseError> {
        match method {
            "initialize" => {
                let params: InitializeRequestParams = parse_params(params)?;
                if let Some(client) = &params.client_info {
                    info!(
                        name = %client.name,
                        version = client.version.as_deref().unwrap_or(""),
                        "client info"
                    );
                }
                let capabilities = self.handler.initialize(&CancelToken, params.capabilities)?;
                to_result(&InitializeResult {
                    capabilities,
                    server_info: Some(self.info.clone()),
                })
            }

            "shutdown" => {
                self.shutdown_requested = true;
                to_result(&Value::Null)
            }

            "textDocument/completion" => {
                let list = self.handler.completion(&CancelToken, parse_params(params)?)?;
                to_result(&list)
            }

            _ => Err(ResponseError::method_not_found(method)),
        }
    }

    fn handle_notification(&mut self, method: &str, params: Value) -> Result<(), ResponseError> {
        match method {
            "initialized" => Ok(()),

            // Accepted so clients can send it; cancellation itself is not
            // implemented.
            "$/cancelRequest" => Ok(()),

            "textDocument/didOpen" => self.handler.did_open(&CancelToken, parse_params(params)?),
            "textDocument/didChange" => {
                self.handler.did_change(&CancelToken, parse_params(params)?)
            }
            "textDocument/didClose" => self.handler.did_close(&CancelToken, parse_params(params)?),

            other => {
                warn!(method = %other, "unknown notification");
                Ok(())
            }
        }
    }

    fn write_message(&mut self, message: &impl Serialize) -> io::Result<()> {
        let body = serde_json::to_vec(message)?;
        write_frame(&mut self.writer, &body)
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, ResponseError> {
    serde_json::from_value(params).map_err(ResponseError::invalid_params)
}

fn to_result(value: &impl Serialize) -> Result<Box<RawValue>, ResponseError> {
    to_raw_value(value).map_err(|err| ResponseError::internal(format!("serialize result: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsp_types::{CompletionOptions, TextDocumentSyncCapability, TextDocumentSyncKind, TextDocumentSyncOptions};
    use std::io::Cursor;

    /// Handler that records calls and can be told to panic.
    #[derive(Default)]
    struct RecordingHandler {
        opened: Vec<String>,
        closed: Vec<String>,
        changes: usize,
        panic_on_completion: bool,
    }

    impl LanguageHandler for RecordingHandler {
        fn initialize(
            &mut self,
            _: &CancelToken,
            _: ClientCapabilities,
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
            _: &CancelToken,
            params: DidOpenTextDocumentParams,
        ) -> Result<(), ResponseError> {
            self.opened.push(params.text_document.uri.to_string());
            Ok(())
        }

        fn did_change(
            &mut self,
            _: &CancelToken,
            _: DidChangeTextDocumentParams,
        ) -> Result<(), ResponseError> {
            self.changes += 1;
            Ok(())
        }

        fn did_close(
            &mut self,
            _: &CancelToken,
            params: DidCloseTextDocumentParams,
        ) -> Result<(), ResponseError> {
            self.closed.push(params.text_document.uri.to_string());
            Ok(())
        }

        fn completion(
            &mut self,
            _: &CancelToken,
            _: CompletionParams,
        ) -> Result<CompletionList, ResponseError> {
            if self.panic_on_completion {
                panic!("completion exploded");
            }
            Ok(CompletionList {
                is_incomplete: false,
                items: Vec::new(),
            })
        }
    }

    fn info() -> ServerInfo {
        ServerInfo {
            name: "test-server".to_string(),
            version: Some("0.0.0".to_string()),
        }
    }

    fn encode(frames: &[&str]) -> Vec<u8> {
        let mut input = Vec::new();
        for body in frames {
            input.extend_from_slice(
                format!("Content-Length: {}\r\n\r\n{body}", body.len()).as_bytes(),
            );
        }
        input
    }

    fn decode(mut output: &[u8]) -> Vec<Value> {
        let mut bodies = Vec::new();
        while let Some(split) = output
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
        {
            let headers = std::str::from_utf8(&output[..split]).unwrap();
            let length: usize = headers
                .lines()
                .find_map(|line| line.strip_prefix("Content-Length: "))
                .unwrap()
                .trim()
                .parse()
                .unwrap();
            let body = &output[split + 4..split + 4 + length];
            bodies.push(serde_json::from_slice(body).unwrap());
            output = &output[split + 4 + length..];
        }
        assert!(output.is_empty(), "trailing bytes: {output:?}");
        bodies
    }

    fn serve(handler: RecordingHandler, frames: &[&str]) -> (Vec<Value>, RecordingHandler) {
        let mut output = Vec::new();
        let mut server = Server::new(Cursor::new(encode(frames)), &mut output, info(), handler);
        server.serve().expect("serve failed");
        let handler = server.handler;
        let replies = decode(&output);
        (replies, handler)
    }

    #[test]
    fn unknown_request_method_gets_method_not_found() {
        let (replies, _) = serve(
            RecordingHandler::default(),
            &[r#"{"jsonrpc":"2.0","id":7,"method":"workspace/symbol","params":{}}"#],
        );
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0]["id"], 7);
        assert_eq!(replies[0]["error"]["code"], -32601);
    }

    #[test]
    fn string_ids_are_echoed_verbatim() {
        let (replies, _) = serve(
            RecordingHandler::default(),
            &[r#"{"jsonrpc":"2.0","id":"abc","method":"shutdown"}"#],
        );
        assert_eq!(replies[0]["id"], "abc");
        assert_eq!(replies[0]["result"], Value::Null);
    }

    #[test]
    fn malformed_json_is_skipped() {
        let (replies, _) = serve(
            RecordingHandler::default(),
            &[
                "{this is not json",
                r#"{"jsonrpc":"2.0","id":1,"method":"shutdown"}"#,
            ],
        );
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0]["id"], 1);
    }

    #[test]
    fn notifications_get_no_reply() {
        let (replies, handler) = serve(
            RecordingHandler::default(),
            &[
                r#"{"jsonrpc":"2.0","method":"textDocument/didOpen","params":{"textDocument":{"uri":"file:///t.gdshader","languageId":"gdshader","version":1,"text":""}}}"#,
                r#"{"jsonrpc":"2.0","method":"textDocument/didClose","params":{"textDocument":{"uri":"file:///t.gdshader"}}}"#,
            ],
        );
        assert!(replies.is_empty());
        assert_eq!(handler.opened, ["file:///t.gdshader"]);
        assert_eq!(handler.closed, ["file:///t.gdshader"]);
    }

    #[test]
    fn cancel_request_and_initialized_are_no_ops() {
        let (replies, _) = serve(
            RecordingHandler::default(),
            &[
                r#"{"jsonrpc":"2.0","method":"initialized","params":{}}"#,
                r#"{"jsonrpc":"2.0","method":"$/cancelRequest","params":{"id":1}}"#,
            ],
        );
        assert!(replies.is_empty());
    }

    #[test]
    fn unknown_notification_is_ignored() {
        let (replies, _) = serve(
            RecordingHandler::default(),
            &[r#"{"jsonrpc":"2.0","method":"workspace/didChangeConfiguration","params":{}}"#],
        );
        assert!(replies.is_empty());
    }

    #[test]
    fn exit_stops_the_loop() {
        let (replies, handler) = serve(
            RecordingHandler::default(),
            &[
                r#"{"jsonrpc":"2.0","method":"exit"}"#,
                // Never reached.
                r#"{"jsonrpc":"2.0","method":"textDocument/didOpen","params":{"textDocument":{"uri":"file:///x.gdshader","languageId":"gdshader","version":1,"text":""}}}"#,
            ],
        );
        assert!(replies.is_empty());
        assert!(handler.opened.is_empty());
    }

    #[test]
    fn invalid_params_get_invalid_params_code() {
        let (replies, _) = serve(
            RecordingHandler::default(),
            &[r#"{"jsonrpc":"2.0","id":3,"method":"textDocument/completion","params":{"bogus":true}}"#],
        );
        assert_eq!(replies[0]["error"]["code"], -32602);
    }

    #[test]
    fn handler_panic_becomes_internal_error_and_serving_continues() {
        let handler = RecordingHandler {
            panic_on_completion: true,
            ..Default::default()
        };
        let (replies, _) = serve(
            handler,
            &[
                r#"{"jsonrpc":"2.0","id":1,"method":"textDocument/completion","params":{"textDocument":{"uri":"file:///t.gdshader"},"position":{"line":0,"character":0}}}"#,
                r#"{"jsonrpc":"2.0","id":2,"method":"shutdown"}"#,
            ],
        );
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["error"]["code"], -32603);
        assert_eq!(replies[1]["result"], Value::Null);
    }

    #[test]
    fn initialize_reply_includes_capabilities_and_server_info() {
        let (replies, _) = serve(
            RecordingHandler::default(),
            &[r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#],
        );
        let result = &replies[0]["result"];
        assert_eq!(result["capabilities"]["textDocumentSync"]["change"], 2);
        assert_eq!(result["capabilities"]["textDocumentSync"]["openClose"], true);
        assert_eq!(result["serverInfo"]["name"], "test-server");
    }
}
