//! A single open document: buffer, line index, and position mapping.
//!
//! LSP positions are line/character pairs where character counts UTF-16 code
//! units (LSP 3.17). The document keeps a byte buffer plus `line_start`, the
//! byte offset of every line's first byte, so resolving a position only ever
//! scans one line. Incremental edits patch `line_start` in place instead of
//! rescanning the document.

use std::cell::OnceCell;

use lsp_types::{Position, Range, TextDocumentContentChangeEvent};
use thiserror::Error;

use super::buffer::{Buffer, BufferKind};

/// Chunk size for line scans. Lines are read through a stack buffer of this
/// size so position resolution allocates nothing.
const SCAN_CHUNK: usize = 1024;

/// Failure to resolve a position or apply an edit. The document is never
/// left partially modified by a failed call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("invalid line: {0}")]
    LineOutOfRange(u32),
    #[error("line {line}: target units {character} out of bounds (only {available} utf16 units)")]
    CharacterOutOfRange {
        line: u32,
        character: u32,
        available: u32,
    },
    #[error("invalid utf-8 at byte offset {0}")]
    InvalidUtf8(usize),
    #[error("document not found: {0}")]
    NotFound(String),
}

/// An open text document backed by a [`Buffer`].
#[derive(Debug)]
pub struct Document {
    buffer: Buffer,
    line_start: Vec<usize>,
    snapshot: OnceCell<Vec<u8>>,
}

impl Document {
    pub fn new(text: &str, kind: BufferKind) -> Self {
        Self {
            buffer: Buffer::new(kind, text),
            line_start: compute_line_start(text.as_bytes()),
            snapshot: OnceCell::new(),
        }
    }

    /// Replaces the entire document content.
    pub fn reset(&mut self, text: &str) {
        self.snapshot.take();
        self.buffer.reset(text);
        self.line_start = compute_line_start(text.as_bytes());
    }

    /// Number of bytes in the document.
    pub fn len(&self) -> usize {
        match self.snapshot.get() {
            Some(cache) => cache.len(),
            None => self.buffer.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of lines. A document ending in a newline counts the empty
    /// final line, consistent with the LSP specification.
    pub fn line_count(&self) -> usize {
        self.line_start.len()
    }

    /// Full document content. Cached until the next mutation.
    pub fn bytes(&self) -> &[u8] {
        self.snapshot.get_or_init(|| self.buffer.bytes())
    }

    /// Copies bytes starting at `offset` into `dst`, returning the count.
    pub fn read_at(&self, dst: &mut [u8], offset: usize) -> usize {
        if let Some(cache) = self.snapshot.get() {
            let src = &cache[offset.min(cache.len())..];
            let n = src.len().min(dst.len());
            dst[..n].copy_from_slice(&src[..n]);
            return n;
        }
        self.buffer.read_at(dst, offset)
    }

    /// Byte bounds `[start, end)` of a line. The trailing newline, when
    /// present, belongs to the line.
    pub fn line_bounds(&self, line: usize) -> (usize, usize) {
        let start = self.line_start[line];
        match self.line_start.get(line + 1) {
            Some(&end) => (start, end),
            None => (start, self.len()),
        }
    }

    /// Applies one content change. A change without a range replaces the
    /// whole document; otherwise the byte span covered by the range is
    /// deleted and the new text inserted at its start. Offset resolution
    /// happens before any mutation, so a failed change leaves the document
    /// untouched.
    pub fn apply_change(
        &mut self,
        change: &TextDocumentContentChangeEvent,
    ) -> Result<(), DocumentError> {
        let Some(range) = change.range else {
            self.reset(&change.text);
            return Ok(());
        };

        let (start_offset, end_offset) = self.change_offsets(&range)?;
        self.snapshot.take();

        if start_offset != end_offset {
            self.buffer.delete(start_offset, end_offset);
        }
        if !change.text.is_empty() {
            self.buffer.insert(start_offset, &change.text);
        }

        self.update_line_start(&range, start_offset, end_offset, &change.text);
        Ok(())
    }

    fn change_offsets(&self, range: &Range) -> Result<(usize, usize), DocumentError> {
        let start_offset = self.position_to_offset(range.start)?;
        // Basic typing has an empty range; skip the second resolution.
        let end_offset = if range.end == range.start {
            start_offset
        } else {
            self.position_to_offset(range.end)?
        };
        Ok((start_offset, end_offset))
    }

    /// Converts a position to a byte offset, counting `character` in UTF-16
    /// code units along the line. A position exactly at the end of the line
    /// is the append position; anything past it is out of bounds.
    pub fn position_to_offset(&self, pos: Position) -> Result<usize, DocumentError> {
        let line = pos.line as usize;
        if line >= self.line_start.len() {
            return Err(DocumentError::LineOutOfRange(pos.line));
        }

        let (start, end) = self.line_bounds(line);
        let mut offset = start;
        let mut u16_count: u32 = 0;
        let mut chunk = [0u8; SCAN_CHUNK];

        while offset < end {
            let want = (end - offset).min(chunk.len());
            let n = self.read_at(&mut chunk[..want], offset);
            if n == 0 {
                break;
            }

            let mut i = 0;
            while i < n {
                if u16_count >= pos.character {
                    return Ok(offset + i);
                }
                match decode_prefix(&chunk[i..n]) {
                    Ok(Some((ch, width))) => {
                        u16_count += ch.len_utf16() as u32;
                        i += width;
                    }
                    // The sequence continues in the next chunk.
                    Ok(None) => break,
                    Err(()) => return Err(DocumentError::InvalidUtf8(offset + i)),
                }
            }
            if i == 0 {
                // The line ends mid-sequence.
                return Err(DocumentError::InvalidUtf8(offset));
            }
            offset += i;
        }

        if u16_count >= pos.character {
            return Ok(offset);
        }
        Err(DocumentError::CharacterOutOfRange {
            line: pos.line,
            character: pos.character,
            available: u16_count,
        })
    }

    /// Patches `line_start` for an edit that deleted `[start_offset,
    /// end_offset)` and inserted `text` there. Offsets before the change are
    /// untouched; offsets created by inserted newlines are computed from the
    /// text; everything after shifts by the net byte delta.
    fn update_line_start(
        &mut self,
        range: &Range,
        start_offset: usize,
        end_offset: usize,
        text: &str,
    ) {
        let start_line = range.start.line as usize;
        let end_line = range.end.line as usize;

        let inserted = text.bytes().filter(|&b| b == b'\n').count();
        let removed = end_line - start_line;

        if inserted > removed {
            let growth = inserted - removed;
            self.line_start.splice(
                end_line + 1..end_line + 1,
                std::iter::repeat(0).take(growth),
            );
        } else if removed > inserted {
            let shrink = removed - inserted;
            self.line_start.drain(end_line + 1 - shrink..end_line + 1);
        }

        if inserted > 0 {
            let mut next = start_line + 1;
            for (i, b) in text.bytes().enumerate() {
                if b == b'\n' {
                    self.line_start[next] = start_offset + i + 1;
                    next += 1;
                }
            }
        }

        let delta = text.len() as isize + start_offset as isize - end_offset as isize;
        let first = end_line + 1 + inserted - removed;
        for entry in &mut self.line_start[first..] {
            *entry = (*entry as isize + delta) as usize;
        }
    }

    #[cfg(test)]
    fn line_starts(&self) -> &[usize] {
        &self.line_start
    }
}

/// Decodes the first UTF-8 scalar in `bytes`. `Ok(None)` means the slice
/// ends mid-sequence; `Err` means the bytes are not valid UTF-8.
fn decode_prefix(bytes: &[u8]) -> Result<Option<(char, usize)>, ()> {
    let width = match bytes[0] {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Err(()),
    };
    if bytes.len() < width {
        return Ok(None);
    }
    match std::str::from_utf8(&bytes[..width]) {
        Ok(s) => Ok(s.chars().next().map(|ch| (ch, width))),
        Err(_) => Err(()),
    }
}

fn compute_line_start(text: &[u8]) -> Vec<usize> {
    let mut line_start = vec![0];
    for (i, &b) in text.iter().enumerate() {
        if b == b'\n' {
            line_start.push(i + 1);
        }
    }
    line_start
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [BufferKind; 3] = [BufferKind::Array, BufferKind::Gap, BufferKind::Rope];

    fn change(text: &str, range: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: if range.is_empty() {
                None
            } else {
                Some(parse_range(range))
            },
            range_length: None,
            text: text.to_string(),
        }
    }

    /// Parses a range written as "0:1-2:2".
    fn parse_range(s: &str) -> Range {
        let (start, end) = s.split_once('-').unwrap();
        Range::new(parse_pos(start), parse_pos(end))
    }

    fn parse_pos(s: &str) -> Position {
        let (line, character) = s.split_once(':').unwrap();
        Position::new(line.parse().unwrap(), character.parse().unwrap())
    }

    /// Checks every structural invariant of the line index against the
    /// actual buffer content.
    fn assert_invariants(doc: &Document) {
        let bytes = doc.bytes().to_vec();
        let starts = doc.line_starts();
        assert_eq!(starts[0], 0, "line_start[0]");
        for pair in starts.windows(2) {
            assert!(pair[0] < pair[1], "line_start not strictly increasing: {starts:?}");
        }
        for &start in &starts[1..] {
            assert_eq!(bytes[start - 1], b'\n', "entry not preceded by newline: {starts:?}");
        }
        let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
        assert_eq!(starts.len(), newlines + 1, "line count vs newlines");
    }

    #[test]
    fn apply_change_table() {
        let cases: &[(&str, &str, &[(&str, &str)], &str)] = &[
            ("full reset", "hello", &[("world", "")], "world"),
            ("insert at start", "world", &[("hello ", "0:0-0:0")], "hello world"),
            ("insert at end", "hello", &[(" world", "0:5-0:5")], "hello world"),
            ("insert newline in middle", "hello world", &[("\n", "0:5-0:5")], "hello\n world"),
            ("delete single character", "hello", &[("", "0:1-0:2")], "hllo"),
            ("delete across lines", "line1\nline2\nline3", &[("", "0:4-2:4")], "line3"),
            ("replace single char", "hello", &[("a", "0:1-0:2")], "hallo"),
            ("replace across lines", "abc\ndef\nghi", &[("Z", "0:1-2:2")], "aZi"),
            ("insert emoji", "hello", &[(" 👋", "0:5-0:5")], "hello 👋"),
            ("delete emoji", "hi 👋 there", &[("", "0:3-0:5")], "hi  there"),
            (
                "repeated inserts ahead of newline",
                "\n",
                &[("A", "0:0-0:0"), ("B", "0:1-0:1"), ("C", "0:2-0:2")],
                "ABC\n",
            ),
        ];

        for kind in ALL_KINDS {
            for (name, initial, changes, want) in cases {
                let mut doc = Document::new(initial, kind);
                for (i, (text, range)) in changes.iter().enumerate() {
                    doc.apply_change(&change(text, range))
                        .unwrap_or_else(|e| panic!("{kind:?}/{name}: change #{i}: {e}"));
                    assert_invariants(&doc);
                }
                assert_eq!(doc.bytes(), want.as_bytes(), "{kind:?}/{name}");
            }
        }
    }

    #[test]
    fn apply_change_rejects_out_of_range() {
        let cases: &[(&str, &str, &str)] = &[
            ("out of bounds line", "hi", "1:0-1:1"),
            ("character out of bounds", "hi", "0:99-0:99"),
        ];
        for kind in ALL_KINDS {
            for (name, initial, range) in cases {
                let mut doc = Document::new(initial, kind);
                let err = doc.apply_change(&change("oops", range));
                assert!(err.is_err(), "{kind:?}/{name}: expected failure");
                // Failed changes must not touch the document.
                assert_eq!(doc.bytes(), initial.as_bytes(), "{kind:?}/{name}");
            }
        }
    }

    #[test]
    fn change_sequence_matches_full_replace() {
        let script: &[(&str, &str)] = &[
            ("shader_type spatial;\n", ""),
            ("\nvoid fragment() {\n}\n", "0:20-0:20"),
            ("\tALBEDO = vec3(1.0);\n", "2:0-2:0"),
            ("", "1:0-2:0"),
            ("COLOR", "1:1-1:7"),
        ];
        for kind in ALL_KINDS {
            let mut incremental = Document::new("", kind);
            for (text, range) in script {
                incremental.apply_change(&change(text, range)).unwrap();
                assert_invariants(&incremental);
            }
            let mut replaced = Document::new("", kind);
            let final_text = String::from_utf8(incremental.bytes().to_vec()).unwrap();
            replaced.apply_change(&change(&final_text, "")).unwrap();
            assert_eq!(incremental.bytes(), replaced.bytes(), "{kind:?}");
        }
    }

    #[test]
    fn delete_across_lines_updates_index() {
        for kind in ALL_KINDS {
            let mut doc = Document::new("line1\nline2\nline3\n", kind);
            doc.apply_change(&change("", "0:4-2:4")).unwrap();
            assert_eq!(doc.bytes(), b"line3\n", "{kind:?}");
            assert_eq!(doc.line_starts(), &[0, 6], "{kind:?}");
        }
    }

    #[test]
    fn insert_newline_mid_line_updates_index() {
        for kind in ALL_KINDS {
            let mut doc = Document::new("hello world\n", kind);
            doc.apply_change(&change("\n", "0:5-0:5")).unwrap();
            assert_eq!(doc.bytes(), b"hello\n world\n", "{kind:?}");
            assert_eq!(doc.line_starts(), &[0, 6, 13], "{kind:?}");
        }
    }

    #[test]
    fn repeated_inserts_ahead_of_newline_updates_index() {
        for kind in ALL_KINDS {
            let mut doc = Document::new("\n", kind);
            for (i, text) in ["A", "B", "C"].iter().enumerate() {
                let range = format!("0:{i}-0:{i}");
                doc.apply_change(&change(text, &range)).unwrap();
            }
            assert_eq!(doc.bytes(), b"ABC\n", "{kind:?}");
            assert_eq!(doc.line_starts(), &[0, 4], "{kind:?}");
        }
    }

    #[test]
    fn insert_into_empty_document() {
        for kind in ALL_KINDS {
            let mut doc = Document::new("", kind);
            doc.apply_change(&change("s", "0:0-0:0")).unwrap();
            assert_eq!(doc.bytes(), b"s", "{kind:?}");
            assert_invariants(&doc);
        }
    }

    /// Whitebox check of the incremental index update: derive a change from
    /// a before/after pair, apply it, and compare against a fresh scan of
    /// the after text. Inputs are ASCII so offsets equal character counts.
    #[test]
    fn update_line_start_matches_recomputation() {
        let cases: &[(&str, &str, &str)] = &[
            ("insert at start of document", "\n", "A\n"),
            ("insert newline in middle of line", "hello world\n", "hello\n world\n"),
            ("delete across lines", "line1\nline2\nline3\n", "li3\n"),
            ("replace line with more newlines", "abc\ndef\n", "abc\na\nb\nc\n\n"),
            ("append to final line", "line1\n", "line1\nline2\n"),
            ("remove newline", "line1\nline2\nline3\n", "line1line2\nline3\n"),
            ("insert newline at end of file", "line1\nline2", "line1\nline2\n"),
            ("insert multiple newlines mid-line", "header: value\n", "header:\nvalue\nextra\n"),
            ("delete everything", "some\ntext\nhere\n", ""),
            ("no-op", "no change\nhere\n", "no change\nhere\n"),
        ];

        for (name, before, after) in cases {
            let mut doc = Document::new(before, BufferKind::Array);
            doc.apply_change(&derive_change(before, after)).unwrap();
            assert_eq!(doc.bytes(), after.as_bytes(), "{name}");
            assert_eq!(
                doc.line_starts(),
                compute_line_start(after.as_bytes()),
                "{name}"
            );
        }
    }

    /// Builds the minimal single change turning `before` into `after`.
    /// ASCII only, so positions can be counted bytewise.
    fn derive_change(before: &str, after: &str) -> TextDocumentContentChangeEvent {
        let before = before.as_bytes();
        let after = after.as_bytes();

        let mut start = 0;
        while start < before.len() && start < after.len() && before[start] == after[start] {
            start += 1;
        }

        let mut end = before.len();
        let mut end_after = after.len();
        while end > start && end_after > start && before[end - 1] == after[end_after - 1] {
            end -= 1;
            end_after -= 1;
        }

        let position = |index: usize| {
            let mut line = 0;
            let mut character = 0;
            for &b in &before[..index] {
                if b == b'\n' {
                    line += 1;
                    character = 0;
                } else {
                    character += 1;
                }
            }
            Position::new(line, character)
        };

        TextDocumentContentChangeEvent {
            range: Some(Range::new(position(start), position(end))),
            range_length: None,
            text: String::from_utf8(after[start..end_after].to_vec()).unwrap(),
        }
    }

    #[test]
    fn position_to_offset_counts_utf16_units() {
        // '👋' is four UTF-8 bytes but two UTF-16 units.
        let doc = Document::new("hi 👋 there", BufferKind::Array);
        assert_eq!(doc.position_to_offset(Position::new(0, 0)), Ok(0));
        assert_eq!(doc.position_to_offset(Position::new(0, 3)), Ok(3));
        assert_eq!(doc.position_to_offset(Position::new(0, 5)), Ok(7));
        assert_eq!(doc.position_to_offset(Position::new(0, 6)), Ok(8));
    }

    #[test]
    fn position_to_offset_end_of_line_is_append_position() {
        let doc = Document::new("hello", BufferKind::Array);
        assert_eq!(doc.position_to_offset(Position::new(0, 5)), Ok(5));
        assert_eq!(
            doc.position_to_offset(Position::new(0, 6)),
            Err(DocumentError::CharacterOutOfRange {
                line: 0,
                character: 6,
                available: 5,
            })
        );
    }

    #[test]
    fn position_to_offset_rejects_bad_line() {
        let doc = Document::new("hello", BufferKind::Array);
        assert_eq!(
            doc.position_to_offset(Position::new(5, 0)),
            Err(DocumentError::LineOutOfRange(5))
        );
    }

    #[test]
    fn position_to_offset_on_empty_document() {
        let doc = Document::new("", BufferKind::Array);
        assert_eq!(doc.position_to_offset(Position::new(0, 0)), Ok(0));
    }

    #[test]
    fn position_to_offset_spans_scan_chunks() {
        // A line longer than one scan chunk, with a multi-byte char placed
        // to straddle the chunk boundary.
        let mut text = "x".repeat(SCAN_CHUNK - 1);
        text.push('é'); // two bytes, crossing the 1024-byte boundary
        text.push_str(&"y".repeat(50));
        let doc = Document::new(&text, BufferKind::Array);
        let offset = doc
            .position_to_offset(Position::new(0, SCAN_CHUNK as u32 + 10))
            .unwrap();
        assert_eq!(offset, SCAN_CHUNK + 1 + 10);
    }

    /// Accepted positions must round-trip: recounting UTF-16 units over the
    /// returned prefix gives a position that resolves to the same offset. (A
    /// position aimed into the middle of a surrogate pair recounts to the
    /// pair's end, which is why the law is stated on offsets.)
    #[test]
    fn position_offset_round_trip() {
        let text = "first\nsecond 👋 line\nthird é\n";
        for kind in ALL_KINDS {
            let doc = Document::new(text, kind);
            for line in 0..doc.line_count() as u32 {
                for character in 0..40 {
                    let Ok(offset) = doc.position_to_offset(Position::new(line, character)) else {
                        continue;
                    };
                    let prefix = std::str::from_utf8(&doc.bytes()[..offset]).unwrap();
                    let mut got_line = 0u32;
                    let mut got_character = 0u32;
                    for ch in prefix.chars() {
                        if ch == '\n' {
                            got_line += 1;
                            got_character = 0;
                        } else {
                            got_character += ch.len_utf16() as u32;
                        }
                    }
                    assert_eq!(
                        doc.position_to_offset(Position::new(got_line, got_character)),
                        Ok(offset),
                        "{kind:?} at {line}:{character}"
                    );
                }
            }
        }
    }

    #[test]
    fn snapshot_invalidated_by_edits() {
        let mut doc = Document::new("abc", BufferKind::Gap);
        assert_eq!(doc.bytes(), b"abc");
        doc.apply_change(&change("X", "0:0-0:0")).unwrap();
        assert_eq!(doc.bytes(), b"Xabc");
        doc.reset("fresh");
        assert_eq!(doc.bytes(), b"fresh");
    }
}
