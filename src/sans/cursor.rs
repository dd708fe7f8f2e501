//! Sequential reads over a shared byte buffer.

use core::ops::Range;

use bytes::Bytes;

use super::Error;

/// A region of a cursor's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// The span between two offsets.
    pub fn between(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            len: end - start,
        }
    }

    /// The offset immediately following the span.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// A read-only view of an encoded buffer, with a current offset.
///
/// Reads are atomic: if a read fails, the offset is left where it was before
/// the read began.
#[derive(Debug, Clone)]
pub struct Cursor {
    buf: Bytes,
    pos: usize,
}

impl Cursor {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
        }
    }

    /// The current offset into the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The whole underlying buffer, independent of position.
    pub fn buffer(&self) -> &Bytes {
        &self.buf
    }

    /// Read the next byte without advancing.
    pub fn peek_byte(&self) -> Result<u8, Error> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.underflow(1))
    }

    pub fn read_byte(&mut self) -> Result<u8, Error> {
        let b = self.peek_byte()?;
        self.pos += 1;
        Ok(b)
    }

    /// Take an exact number of bytes, advancing the offset.
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let s = self.read_span(N)?;

        // The span was bounds-checked by `read_span`.
        let mut out = [0; N];
        out.copy_from_slice(&self.buf[s.range()]);
        Ok(out)
    }

    /// Read an unsigned LEB128 varint of up to ten bytes.
    pub fn read_varint(&mut self) -> Result<u64, Error> {
        let mut value = 0u64;

        for (i, &b) in self.buf[self.pos..].iter().enumerate() {
            let shift = 7 * i as u32;

            // The tenth byte may only hold the single remaining bit.
            if i == 9 && b > 0x01 {
                return Err(Error::MalformedVarint { offset: self.pos });
            }

            value |= u64::from(b & 0x7F) << shift;

            if b & 0x80 == 0 {
                self.pos += i + 1;
                return Ok(value);
            }
        }

        Err(self.underflow(self.remaining() + 1))
    }

    /// Take a number of bytes, advancing the offset and returning their span.
    pub fn read_span(&mut self, len: usize) -> Result<Span, Error> {
        if len > self.remaining() {
            return Err(self.underflow(len));
        }

        let s = Span::new(self.pos, len);
        self.pos += len;
        Ok(s)
    }

    /// Read a varint length followed by that many bytes.
    ///
    /// Returns the span of the bytes, excluding the prefix.
    pub fn read_length_prefixed(&mut self) -> Result<Span, Error> {
        let start = self.pos;
        let len = self.read_varint()?;

        let len = usize::try_from(len).map_err(|_| Error::MalformedLength {
            offset: start,
            found: len as i64,
        })?;

        self.read_span(len).inspect_err(|_| self.pos = start)
    }

    /// A zero-copy view of a span of the buffer.
    pub fn slice(&self, span: Span) -> Bytes {
        self.buf.slice(span.range())
    }

    /// Borrow a span of the buffer.
    pub fn bytes(&self, span: Span) -> &[u8] {
        &self.buf[span.range()]
    }

    fn underflow(&self, needed: usize) -> Error {
        Error::UnexpectedEndOfInput {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }
}
