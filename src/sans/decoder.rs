//! Decoder state shared by the skip engine and higher-level decoders.

use bytes::Bytes;

use super::{
    Cursor, Error, Span,
    protocol::{FieldHeader, ListHeader, MapHeader, MessageHeader, Protocol},
};

/// Bounds applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// The deepest permitted nesting of structs and containers.
    pub max_depth: usize,
    /// The largest permitted string length or container element count.
    pub max_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_length: 100 * 1024 * 1024,
        }
    }
}

/// A cursor paired with a protocol, limits, and the current nesting depth.
#[derive(Debug, Clone)]
pub struct Decoder<P> {
    cursor: Cursor,
    protocol: P,
    limits: Limits,
    depth: usize,
}

impl<P: Protocol + Default> Decoder<P> {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self::with_protocol(P::default(), buf)
    }
}

impl<P: Protocol> Decoder<P> {
    pub fn with_protocol(protocol: P, buf: impl Into<Bytes>) -> Self {
        Self {
            cursor: Cursor::new(buf),
            protocol,
            limits: Limits::default(),
            depth: 0,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// A zero-copy view of a span of the buffer.
    pub fn slice(&self, span: Span) -> Bytes {
        self.cursor.slice(span)
    }

    /// Run `f` one level deeper, failing if that exceeds the depth limit.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
        if self.depth >= self.limits.max_depth {
            Err(Error::NestingTooDeep {
                offset: self.cursor.position(),
                limit: self.limits.max_depth,
            })?;
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;

        result
    }

    pub fn read_message_header(&mut self) -> Result<MessageHeader, Error> {
        self.protocol.read_message_header(&mut self.cursor)
    }

    pub fn read_struct_begin(&mut self) {
        self.protocol.read_struct_begin()
    }

    pub fn read_struct_end(&mut self) {
        self.protocol.read_struct_end()
    }

    pub fn read_field_header(&mut self) -> Result<FieldHeader, Error> {
        self.protocol.read_field_header(&mut self.cursor)
    }

    pub fn read_list_header(&mut self) -> Result<ListHeader, Error> {
        let offset = self.cursor.position();
        let header = self.protocol.read_list_header(&mut self.cursor)?;
        self.check_len(header.len, offset)?;
        Ok(header)
    }

    pub fn read_set_header(&mut self) -> Result<ListHeader, Error> {
        let offset = self.cursor.position();
        let header = self.protocol.read_set_header(&mut self.cursor)?;
        self.check_len(header.len, offset)?;
        Ok(header)
    }

    pub fn read_map_header(&mut self) -> Result<MapHeader, Error> {
        let offset = self.cursor.position();
        let header = self.protocol.read_map_header(&mut self.cursor)?;
        self.check_len(header.len, offset)?;
        Ok(header)
    }

    pub fn read_bool(&mut self) -> Result<bool, Error> {
        self.protocol.read_bool(&mut self.cursor)
    }

    pub fn read_byte(&mut self) -> Result<i8, Error> {
        self.protocol.read_byte(&mut self.cursor)
    }

    pub fn read_i16(&mut self) -> Result<i16, Error> {
        self.protocol.read_i16(&mut self.cursor)
    }

    pub fn read_i32(&mut self) -> Result<i32, Error> {
        self.protocol.read_i32(&mut self.cursor)
    }

    pub fn read_i64(&mut self) -> Result<i64, Error> {
        self.protocol.read_i64(&mut self.cursor)
    }

    pub fn read_double(&mut self) -> Result<f64, Error> {
        self.protocol.read_double(&mut self.cursor)
    }

    /// Read a string or binary value, returning the span of its contents.
    pub fn read_binary(&mut self) -> Result<Span, Error> {
        let offset = self.cursor.position();
        let len = self.protocol.read_binary_len(&mut self.cursor)?;
        self.check_len(len, offset)?;
        self.cursor.read_span(len)
    }

    fn check_len(&self, len: usize, offset: usize) -> Result<(), Error> {
        if len > self.limits.max_length {
            Err(Error::MalformedLength {
                offset,
                found: i64::try_from(len).unwrap_or(i64::MAX),
            })?;
        }

        Ok(())
    }
}
