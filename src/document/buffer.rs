//! Byte storage behind a document.
//!
//! Three interchangeable implementations with distinct performance profiles:
//! a plain array (correctness baseline), a gap buffer (amortized O(1) edits
//! that cluster around a cursor), and a rope (O(log n) everything, best for
//! very large documents with scattered edits). A document picks one variant
//! at construction and never mixes them.

use ropey::Rope;

/// Which buffer implementation backs a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferKind {
    /// Contiguous byte array. Insert/delete are O(n).
    Array,
    /// Gap buffer. Fast for edits near the gap, slower random reads.
    #[default]
    Gap,
    /// Rope. O(log n) random access and edits.
    Rope,
}

/// Tagged buffer storage. Dispatch is a `match` per call so each variant's
/// hot path stays monomorphic.
#[derive(Debug, Clone)]
pub enum Buffer {
    Array(ArrayBuffer),
    Gap(GapBuffer),
    Rope(RopeBuffer),
}

impl Buffer {
    pub fn new(kind: BufferKind, text: &str) -> Self {
        let mut buffer = match kind {
            BufferKind::Array => Buffer::Array(ArrayBuffer::default()),
            BufferKind::Gap => Buffer::Gap(GapBuffer::default()),
            BufferKind::Rope => Buffer::Rope(RopeBuffer::default()),
        };
        buffer.reset(text);
        buffer
    }

    /// Reinitializes the buffer with the given text.
    pub fn reset(&mut self, text: &str) {
        match self {
            Buffer::Array(b) => b.reset(text),
            Buffer::Gap(b) => b.reset(text),
            Buffer::Rope(b) => b.reset(text),
        }
    }

    /// Copies bytes starting at `offset` into `dst`, returning the count
    /// copied. Short reads happen only at the end of the buffer.
    pub fn read_at(&self, dst: &mut [u8], offset: usize) -> usize {
        match self {
            Buffer::Array(b) => b.read_at(dst, offset),
            Buffer::Gap(b) => b.read_at(dst, offset),
            Buffer::Rope(b) => b.read_at(dst, offset),
        }
    }

    /// Splices `text` in at the byte offset.
    pub fn insert(&mut self, offset: usize, text: &str) {
        match self {
            Buffer::Array(b) => b.insert(offset, text),
            Buffer::Gap(b) => b.insert(offset, text),
            Buffer::Rope(b) => b.insert(offset, text),
        }
    }

    /// Removes the byte span `[start, end)`.
    pub fn delete(&mut self, start: usize, end: usize) {
        match self {
            Buffer::Array(b) => b.delete(start, end),
            Buffer::Gap(b) => b.delete(start, end),
            Buffer::Rope(b) => b.delete(start, end),
        }
    }

    /// Number of bytes stored.
    pub fn len(&self) -> usize {
        match self {
            Buffer::Array(b) => b.len(),
            Buffer::Gap(b) => b.len(),
            Buffer::Rope(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full contents as a fresh byte vector.
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            Buffer::Array(b) => b.bytes(),
            Buffer::Gap(b) => b.bytes(),
            Buffer::Rope(b) => b.bytes(),
        }
    }
}

/// The simplest storage: one contiguous `Vec<u8>`. Reads are as fast as it
/// gets; every insert or delete shifts the tail. Kept as the baseline the
/// smarter buffers are tested against.
#[derive(Debug, Clone, Default)]
pub struct ArrayBuffer {
    data: Vec<u8>,
}

impl ArrayBuffer {
    fn reset(&mut self, text: &str) {
        self.data = text.as_bytes().to_vec();
    }

    fn read_at(&self, dst: &mut [u8], offset: usize) -> usize {
        let src = &self.data[offset.min(self.data.len())..];
        let n = src.len().min(dst.len());
        dst[..n].copy_from_slice(&src[..n]);
        n
    }

    fn insert(&mut self, offset: usize, text: &str) {
        self.data.splice(offset..offset, text.bytes());
    }

    fn delete(&mut self, start: usize, end: usize) {
        self.data.drain(start..end);
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn bytes(&self) -> Vec<u8> {
        self.data.clone()
    }
}

/// Padding added whenever the gap has to grow.
const GAP_PADDING: usize = 128;

/// After a write the gap is shrunk back down to at most this many bytes so a
/// large paste does not leave a large hole behind.
const GAP_CEILING: usize = 1024;

/// A contiguous allocation split by a movable gap at the edit point.
/// Successive edits near the same spot only move bytes when the gap has to
/// relocate; deletes that touch either gap edge just widen the gap.
#[derive(Debug, Clone, Default)]
pub struct GapBuffer {
    buf: Vec<u8>,
    gap_start: usize,
    gap_end: usize,
}

impl GapBuffer {
    fn reset(&mut self, text: &str) {
        let bytes = text.as_bytes();
        self.buf = vec![0; bytes.len() + GAP_PADDING];
        self.buf[..bytes.len()].copy_from_slice(bytes);
        self.gap_start = bytes.len();
        self.gap_end = self.buf.len();
    }

    fn read_at(&self, dst: &mut [u8], offset: usize) -> usize {
        let mut n = 0;
        if offset < self.gap_start {
            let head = &self.buf[offset..self.gap_start];
            let take = head.len().min(dst.len());
            dst[..take].copy_from_slice(&head[..take]);
            n = take;
            if n < dst.len() {
                let tail = &self.buf[self.gap_end..];
                let take = tail.len().min(dst.len() - n);
                dst[n..n + take].copy_from_slice(&tail[..take]);
                n += take;
            }
        } else {
            let physical = (offset + self.gap_size()).min(self.buf.len());
            let tail = &self.buf[physical..];
            let take = tail.len().min(dst.len());
            dst[..take].copy_from_slice(&tail[..take]);
            n = take;
        }
        n
    }

    fn insert(&mut self, offset: usize, text: &str) {
        let src = text.as_bytes();
        self.move_gap_to(offset);
        if src.len() > self.gap_size() {
            self.grow_gap(src.len() - self.gap_size());
        }
        self.buf[self.gap_start..self.gap_start + src.len()].copy_from_slice(src);
        self.gap_start += src.len();
        self.shrink_gap_to(GAP_CEILING);
    }

    fn delete(&mut self, start: usize, end: usize) {
        let count = end - start;
        if self.gap_start == start {
            // Span sits right after the gap: absorb it.
            self.gap_end += count;
        } else if self.gap_start == end {
            // Span sits right before the gap: absorb it.
            self.gap_start -= count;
        } else {
            // Leaves the gap at the edit point for a follow-up write.
            self.move_gap_to(start);
            self.gap_end += count;
        }
    }

    fn len(&self) -> usize {
        self.buf.len() - self.gap_size()
    }

    fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.buf[..self.gap_start]);
        out.extend_from_slice(&self.buf[self.gap_end..]);
        out
    }

    fn gap_size(&self) -> usize {
        self.gap_end - self.gap_start
    }

    fn move_gap_to(&mut self, offset: usize) {
        use std::cmp::Ordering;
        match offset.cmp(&self.gap_start) {
            Ordering::Less => {
                let count = self.gap_start - offset;
                self.buf.copy_within(offset..self.gap_start, self.gap_end - count);
                self.gap_start = offset;
                self.gap_end -= count;
            }
            Ordering::Greater => {
                let count = offset - self.gap_start;
                self.buf
                    .copy_within(self.gap_end..self.gap_end + count, self.gap_start);
                self.gap_start += count;
                self.gap_end += count;
            }
            Ordering::Equal => {}
        }
    }

    fn grow_gap(&mut self, need: usize) {
        let n = need + GAP_PADDING;
        self.buf
            .splice(self.gap_end..self.gap_end, std::iter::repeat(0).take(n));
        self.gap_end += n;
    }

    fn shrink_gap_to(&mut self, ceiling: usize) {
        let excess = self.gap_size().saturating_sub(ceiling);
        if excess > 0 {
            self.buf.drain(self.gap_start..self.gap_start + excess);
            self.gap_end -= excess;
        }
    }
}

/// Rope-backed storage. Edit offsets always land on char boundaries because
/// they come from UTF-16 position resolution, so byte-to-char conversion is
/// exact.
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    fn reset(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    fn read_at(&self, dst: &mut [u8], offset: usize) -> usize {
        if offset >= self.rope.len_bytes() {
            return 0;
        }
        let (chunks, chunk_start, _, _) = self.rope.chunks_at_byte(offset);
        let mut skip = offset - chunk_start;
        let mut n = 0;
        for chunk in chunks {
            let bytes = &chunk.as_bytes()[skip..];
            skip = 0;
            let take = bytes.len().min(dst.len() - n);
            dst[n..n + take].copy_from_slice(&bytes[..take]);
            n += take;
            if n == dst.len() {
                break;
            }
        }
        n
    }

    fn insert(&mut self, offset: usize, text: &str) {
        let char_idx = self.rope.byte_to_char(offset);
        self.rope.insert(char_idx, text);
    }

    fn delete(&mut self, start: usize, end: usize) {
        let start_char = self.rope.byte_to_char(start);
        let end_char = self.rope.byte_to_char(end);
        self.rope.remove(start_char..end_char);
    }

    fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    fn bytes(&self) -> Vec<u8> {
        self.rope.bytes().collect()
    }
}
