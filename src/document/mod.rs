//! The incremental document store.
//!
//! This module provides:
//! - `Buffer` and its three implementations (array, gap, rope)
//! - `Document`, a buffer plus line index with UTF-16 position mapping
//! - `DocumentStore`, the open-document map keyed by URI

mod buffer;
mod state;
mod text;

pub use buffer::{ArrayBuffer, Buffer, BufferKind, GapBuffer, RopeBuffer};
pub use state::DocumentStore;
pub use text::{Document, DocumentError};
