//! The LSP protocol layer.
//!
//! This module provides:
//! - Content-Length framing over raw byte streams
//! - The JSON-RPC serve loop and method dispatch
//! - Wire error codes and the response error shape
//! - The `textDocument/completion` implementation

mod completion;
mod error;
mod framing;
mod server;

pub use completion::completion_at_position;
pub use error::{ErrorCode, ResponseError};
pub use framing::TransportError;
pub use server::{CancelToken, LanguageHandler, Server};
