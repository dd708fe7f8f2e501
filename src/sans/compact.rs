//! The compact protocol.
//!
//! Integers are zigzag-encoded varints and doubles are little-endian. Field
//! headers pack a type code with the difference from the previous field's
//! identifier into one byte, and boolean fields carry their value in the type
//! code. List and set headers pack short lengths with the element type.

use alloc::vec::Vec;

use tartan_bitfield::bitfield;

use super::{
    Cursor, Error, TypeTag,
    protocol::{
        FieldHeader, ListHeader, MapHeader, MessageHeader, Protocol, read_message_kind,
        read_message_name,
    },
};

const PROTOCOL_ID: u8 = 0x82;
const VERSION: u8 = 1;

const BOOLEAN_TRUE: u8 = 1;
const BOOLEAN_FALSE: u8 = 2;

/// The compact protocol.
///
/// Tracks the previous field identifier of each struct being read, and the
/// value of a boolean field whose header has been read but whose value has
/// not.
#[derive(Debug, Default, Clone)]
pub struct Compact {
    last_field_id: i16,
    enclosing: Vec<i16>,
    pending_bool: Option<bool>,
}

impl Compact {
    /// Map a type code to a tag.
    pub fn tag(code: u8) -> Option<TypeTag> {
        Some(match code {
            0 => TypeTag::Stop,
            BOOLEAN_TRUE | BOOLEAN_FALSE => TypeTag::Bool,
            3 => TypeTag::Byte,
            4 => TypeTag::I16,
            5 => TypeTag::I32,
            6 => TypeTag::I64,
            7 => TypeTag::Double,
            8 => TypeTag::Binary,
            9 => TypeTag::List,
            10 => TypeTag::Set,
            11 => TypeTag::Map,
            12 => TypeTag::Struct,
            _ => return None,
        })
    }

    /// Map a tag to its type code. Booleans map to the code for `true`.
    pub fn code(tag: TypeTag) -> u8 {
        match tag {
            TypeTag::Stop => 0,
            TypeTag::Bool => BOOLEAN_TRUE,
            TypeTag::Byte => 3,
            TypeTag::I16 => 4,
            TypeTag::I32 => 5,
            TypeTag::I64 => 6,
            TypeTag::Double => 7,
            TypeTag::Binary => 8,
            TypeTag::List => 9,
            TypeTag::Set => 10,
            TypeTag::Map => 11,
            TypeTag::Struct => 12,
        }
    }
}

fn to_tag(code: u8, offset: usize) -> Result<TypeTag, Error> {
    Compact::tag(code).ok_or(Error::InvalidTypeTag {
        offset,
        found: code,
    })
}

fn zigzag_32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ -((n & 1) as i32)
}

fn zigzag_64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

fn read_varint_32(c: &mut Cursor) -> Result<u32, Error> {
    let offset = c.position();
    u32::try_from(c.read_varint()?).map_err(|_| Error::MalformedVarint { offset })
}

/// Read a varint length or element count.
fn read_len(c: &mut Cursor) -> Result<usize, Error> {
    let offset = c.position();
    let len = c.read_varint()?;

    if len > i32::MAX as u64 {
        Err(Error::MalformedLength {
            offset,
            found: i64::try_from(len).unwrap_or(i64::MAX),
        })?;
    }

    Ok(len as usize)
}

impl Protocol for Compact {
    fn bool_element(value: bool) -> &'static [u8] {
        if value {
            &[BOOLEAN_TRUE]
        } else {
            &[BOOLEAN_FALSE]
        }
    }

    fn read_message_header(&mut self, c: &mut Cursor) -> Result<MessageHeader, Error> {
        let offset = c.position();
        let protocol_id = c.read_byte()?;

        if protocol_id != PROTOCOL_ID {
            Err(Error::BadProtocolId {
                offset,
                found: protocol_id,
            })?;
        }

        bitfield! {
            struct VersionAndKind(u8) {
                [0..5] version: u8,
                [5..8] kind: u8,
            }
        }

        let offset = c.position();
        let header = VersionAndKind(c.read_byte()?);

        if header.version() != VERSION {
            Err(Error::BadVersion {
                offset,
                found: header.version().into(),
            })?;
        }

        let kind = read_message_kind(header.kind(), offset)?;
        let sequence_id = read_varint_32(c)? as i32;
        let len = read_len(c)?;
        let name = read_message_name(c, len)?;

        Ok(MessageHeader {
            name,
            kind,
            sequence_id,
        })
    }

    fn read_struct_begin(&mut self) {
        self.enclosing.push(self.last_field_id);
        self.last_field_id = 0;
    }

    fn read_struct_end(&mut self) {
        self.last_field_id = self.enclosing.pop().unwrap_or_default();
    }

    fn read_field_header(&mut self, c: &mut Cursor) -> Result<FieldHeader, Error> {
        bitfield! {
            struct FieldHeaderByte(u8) {
                [0..4] type_code: u8,
                [4..8] delta: u8,
            }
        }

        let offset = c.position();
        let header = FieldHeaderByte(c.read_byte()?);
        let tag = to_tag(header.type_code(), offset)?;

        if tag.is_stop() {
            return Ok(FieldHeader::stop());
        }

        let id = match header.delta() {
            0 => self.read_i16(c)?,
            delta => self.last_field_id.wrapping_add(delta.into()),
        };
        self.last_field_id = id;

        let inline_bool = match header.type_code() {
            BOOLEAN_TRUE => Some(true),
            BOOLEAN_FALSE => Some(false),
            _ => None,
        };
        self.pending_bool = inline_bool;

        Ok(FieldHeader {
            tag,
            id,
            inline_bool,
        })
    }

    fn read_list_header(&mut self, c: &mut Cursor) -> Result<ListHeader, Error> {
        bitfield! {
            struct ListHeaderByte(u8) {
                [0..4] element: u8,
                [4..8] short_len: u8,
            }
        }

        let offset = c.position();
        let header = ListHeaderByte(c.read_byte()?);
        let element = to_tag(header.element(), offset)?;

        let len = match header.short_len() {
            15 => read_len(c)?,
            short => short.into(),
        };

        Ok(ListHeader { element, len })
    }

    fn read_map_header(&mut self, c: &mut Cursor) -> Result<MapHeader, Error> {
        let len = read_len(c)?;

        if len == 0 {
            return Ok(MapHeader {
                key: TypeTag::Stop,
                value: TypeTag::Stop,
                len,
            });
        }

        bitfield! {
            struct MapTypesByte(u8) {
                [0..4] value: u8,
                [4..8] key: u8,
            }
        }

        let offset = c.position();
        let types = MapTypesByte(c.read_byte()?);

        Ok(MapHeader {
            key: to_tag(types.key(), offset)?,
            value: to_tag(types.value(), offset)?,
            len,
        })
    }

    fn read_bool(&mut self, c: &mut Cursor) -> Result<bool, Error> {
        match self.pending_bool.take() {
            Some(value) => Ok(value),
            None => Ok(c.read_byte()? == BOOLEAN_TRUE),
        }
    }

    fn read_byte(&mut self, c: &mut Cursor) -> Result<i8, Error> {
        Ok(c.read_byte()? as i8)
    }

    fn read_i16(&mut self, c: &mut Cursor) -> Result<i16, Error> {
        let offset = c.position();
        let n = zigzag_32(read_varint_32(c)?);
        i16::try_from(n).map_err(|_| Error::MalformedVarint { offset })
    }

    fn read_i32(&mut self, c: &mut Cursor) -> Result<i32, Error> {
        Ok(zigzag_32(read_varint_32(c)?))
    }

    fn read_i64(&mut self, c: &mut Cursor) -> Result<i64, Error> {
        Ok(zigzag_64(c.read_varint()?))
    }

    fn read_double(&mut self, c: &mut Cursor) -> Result<f64, Error> {
        Ok(f64::from_le_bytes(c.read_fixed()?))
    }

    fn read_binary_len(&mut self, c: &mut Cursor) -> Result<usize, Error> {
        read_len(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag() {
        assert_eq!(zigzag_32(0), 0);
        assert_eq!(zigzag_32(1), -1);
        assert_eq!(zigzag_32(2), 1);
        assert_eq!(zigzag_32(u32::MAX), i32::MIN);
        assert_eq!(zigzag_64(u64::MAX - 1), i64::MAX);
    }

    #[test]
    fn field_ids_are_relative_per_struct() {
        // Field 5 (i32 = 0), then a nested struct field 6 holding field 1
        // (byte), then field 7 (byte) after the nested struct ends.
        let mut c = Cursor::new(&b"\x55\x00\x1C\x13\x00\x00\x13\x00\x00"[..]);
        let mut p = Compact::default();

        p.read_struct_begin();
        assert_eq!(p.read_field_header(&mut c).unwrap().id, 5);
        p.read_i32(&mut c).unwrap();
        assert_eq!(p.read_field_header(&mut c).unwrap().id, 6);

        p.read_struct_begin();
        assert_eq!(p.read_field_header(&mut c).unwrap().id, 1);
        p.read_byte(&mut c).unwrap();
        assert!(p.read_field_header(&mut c).unwrap().tag.is_stop());
        p.read_struct_end();

        assert_eq!(p.read_field_header(&mut c).unwrap().id, 7);
    }

    #[test]
    fn long_form_field_id() {
        // Delta zero, explicit zigzag id of -2 (3), type byte.
        let mut c = Cursor::new(&b"\x03\x03"[..]);
        let header = Compact::default().read_field_header(&mut c).unwrap();
        assert_eq!(header.id, -2);
        assert_eq!(header.tag, TypeTag::Byte);
    }

    #[test]
    fn inline_bool() {
        let mut c = Cursor::new(&b"\x12\x21"[..]);
        let mut p = Compact::default();

        let header = p.read_field_header(&mut c).unwrap();
        assert_eq!(header.inline_bool, Some(false));
        assert_eq!(p.read_bool(&mut c), Ok(false));
        assert_eq!(c.position(), 1);

        let header = p.read_field_header(&mut c).unwrap();
        assert_eq!((header.id, header.inline_bool), (3, Some(true)));
    }
}
