//! The interface between decoders and a concrete wire protocol.

use alloc::string::String;

use super::{Cursor, Error, TypeTag};

/// A field header, preceding each field of a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHeader {
    pub tag: TypeTag,
    /// The field identifier. Zero for the stop marker.
    pub id: i16,
    /// A boolean value carried in the header itself, if the protocol packs
    /// boolean fields this way. The value then occupies no further bytes.
    pub inline_bool: Option<bool>,
}

impl FieldHeader {
    pub fn stop() -> Self {
        Self {
            tag: TypeTag::Stop,
            id: 0,
            inline_bool: None,
        }
    }
}

/// A list or set header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    pub element: TypeTag,
    pub len: usize,
}

/// A map header.
///
/// Protocols that omit the key and value types of empty maps report
/// [`TypeTag::Stop`] for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHeader {
    pub key: TypeTag,
    pub value: TypeTag,
    pub len: usize,
}

/// The kind of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageKind {
    Call = 1,
    Reply = 2,
    Exception = 3,
    Oneway = 4,
}

impl MessageKind {
    pub fn from_u8(kind: u8) -> Option<Self> {
        match kind {
            1 => Some(Self::Call),
            2 => Some(Self::Reply),
            3 => Some(Self::Exception),
            4 => Some(Self::Oneway),
            _ => None,
        }
    }
}

/// The envelope preceding a message's arguments or result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub name: String,
    pub kind: MessageKind,
    pub sequence_id: i32,
}

pub(super) fn read_message_kind(kind: u8, offset: usize) -> Result<MessageKind, Error> {
    MessageKind::from_u8(kind).ok_or(Error::InvalidMessageKind {
        offset,
        found: kind,
    })
}

pub(super) fn read_message_name(c: &mut Cursor, len: usize) -> Result<String, Error> {
    let s = c.read_span(len)?;
    let name = core::str::from_utf8(c.bytes(s)).map_err(|_| Error::InvalidUtf8 { offset: s.offset })?;
    Ok(String::from(name))
}

/// A wire protocol, reading headers and scalars from a cursor.
///
/// Implementations may hold state between calls (for example, the identifier
/// of the previous field), so a protocol value must only be used with one
/// cursor at a time, and struct headers and ends must be paired.
///
/// Lengths and counts are returned unchecked against any limits, but are never
/// negative. A header read that fails may leave the cursor part-way through
/// the header.
pub trait Protocol {
    /// The encoding of a boolean as a list element.
    fn bool_element(value: bool) -> &'static [u8];

    fn read_message_header(&mut self, c: &mut Cursor) -> Result<MessageHeader, Error>;

    /// Begin reading the fields of a struct.
    fn read_struct_begin(&mut self) {}
    /// Finish reading the fields of a struct, after its stop marker.
    fn read_struct_end(&mut self) {}

    fn read_field_header(&mut self, c: &mut Cursor) -> Result<FieldHeader, Error>;

    fn read_list_header(&mut self, c: &mut Cursor) -> Result<ListHeader, Error>;

    fn read_set_header(&mut self, c: &mut Cursor) -> Result<ListHeader, Error> {
        self.read_list_header(c)
    }

    fn read_map_header(&mut self, c: &mut Cursor) -> Result<MapHeader, Error>;

    fn read_bool(&mut self, c: &mut Cursor) -> Result<bool, Error>;
    fn read_byte(&mut self, c: &mut Cursor) -> Result<i8, Error>;
    fn read_i16(&mut self, c: &mut Cursor) -> Result<i16, Error>;
    fn read_i32(&mut self, c: &mut Cursor) -> Result<i32, Error>;
    fn read_i64(&mut self, c: &mut Cursor) -> Result<i64, Error>;
    fn read_double(&mut self, c: &mut Cursor) -> Result<f64, Error>;

    /// Read the length prefix of a string or binary value.
    fn read_binary_len(&mut self, c: &mut Cursor) -> Result<usize, Error>;
}
