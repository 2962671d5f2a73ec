//! Completion at a cursor position.
//!
//! A small, deterministic rule engine: tokenize the current line up to the
//! cursor, sniff the shader type from the first line and the enclosing
//! function from the lines above, then filter the static catalog by the
//! typed prefix and each entry's context predicate.

use lsp_types::{CompletionList, Position};

use crate::catalog::{self, CompletionScope};
use crate::document::{Document, DocumentError};

/// Computes the completion list for a position in the document. Items keep
/// catalog order; `is_incomplete` is always false.
pub fn completion_at_position(
    doc: &Document,
    position: Position,
) -> Result<CompletionList, DocumentError> {
    let (current_word, scope) = completion_scope(doc, position)?;

    let items = catalog::entries()
        .iter()
        .filter(|entry| entry.matches(&current_word, &scope))
        .map(|entry| entry.item().clone())
        .collect();

    Ok(CompletionList {
        is_incomplete: false,
        items,
    })
}

/// Extracts the current word being typed and the surrounding lexical
/// context.
fn completion_scope(
    doc: &Document,
    position: Position,
) -> Result<(String, CompletionScope), DocumentError> {
    let cursor = doc.position_to_offset(position)?;
    let (line_start, _) = doc.line_bounds(position.line as usize);
    let prefix = read_string(doc, line_start, cursor)?;
    let first_line = read_line(doc, 0)?;

    let mut scope = CompletionScope {
        function_name: enclosing_function(doc, position.line as usize)?,
        ..Default::default()
    };

    let first_tokens = tokenize(&first_line);
    if let Some(i) = first_tokens.iter().position(|token| token == "shader_type") {
        if i + 1 < first_tokens.len() {
            scope.shader_type = first_tokens[i + 1].clone();
        }
    }

    let mut tokens = tokenize(&prefix);
    let current_word = tokens.pop().unwrap_or_default();
    scope.line_tokens = tokens;

    Ok((current_word, scope))
}

/// Walks upward looking for the `) {` tail of a function signature and
/// reports token 1 of that line as the function name. Token 1 is trusted
/// without checking that token 0 is a return type, so a line that merely
/// ends in `) {` can misreport.
fn enclosing_function(doc: &Document, from_line: usize) -> Result<String, DocumentError> {
    for line in (0..=from_line).rev() {
        let text = read_line(doc, line)?;
        let tokens = tokenize(&text);
        for i in (2..tokens.len().saturating_sub(1)).rev() {
            if tokens[i] == ")" && tokens[i + 1] == "{" {
                return Ok(tokens[1].clone());
            }
        }
    }
    Ok(String::new())
}

fn read_line(doc: &Document, line: usize) -> Result<String, DocumentError> {
    let (start, end) = doc.line_bounds(line);
    read_string(doc, start, end)
}

fn read_string(doc: &Document, start: usize, end: usize) -> Result<String, DocumentError> {
    let mut bytes = vec![0; end - start];
    let n = doc.read_at(&mut bytes, start);
    bytes.truncate(n);
    String::from_utf8(bytes)
        .map_err(|err| DocumentError::InvalidUtf8(start + err.utf8_error().valid_up_to()))
}

/// Splits a line into tokens: maximal runs of `[A-Za-z0-9_]` are words, any
/// other non-whitespace character is its own token, whitespace only
/// separates.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = line;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return tokens;
        }
        match rest.find(|ch: char| !is_word_char(ch)) {
            Some(0) => {
                let mut chars = rest.chars();
                if let Some(ch) = chars.next() {
                    tokens.push(ch.to_string());
                }
                rest = chars.as_str();
            }
            Some(i) => {
                tokens.push(rest[..i].to_string());
                rest = &rest[i..];
            }
            None => {
                tokens.push(rest.to_string());
                return tokens;
            }
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
