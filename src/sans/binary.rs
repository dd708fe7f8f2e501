//! The binary protocol.
//!
//! Integers are fixed-width and big-endian. Strings, lists, sets and maps are
//! prefixed with an `i32` length or element count. Each field header is a
//! type code followed by an `i16` field identifier, except the stop marker,
//! which is the type code alone.

use zerocopy::{FromBytes, byteorder::big_endian::I32};

use super::{
    Cursor, Error, TypeTag,
    protocol::{
        FieldHeader, ListHeader, MapHeader, MessageHeader, Protocol, read_message_kind,
        read_message_name,
    },
};

const VERSION_MASK: u32 = 0xFFFF_0000;
const VERSION_1: u32 = 0x8001_0000;

/// The binary protocol. Stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct Binary;

impl Binary {
    /// Map a type code to a tag.
    pub fn tag(code: u8) -> Option<TypeTag> {
        Some(match code {
            0 => TypeTag::Stop,
            2 => TypeTag::Bool,
            3 => TypeTag::Byte,
            4 => TypeTag::Double,
            6 => TypeTag::I16,
            8 => TypeTag::I32,
            10 => TypeTag::I64,
            11 => TypeTag::Binary,
            12 => TypeTag::Struct,
            13 => TypeTag::Map,
            14 => TypeTag::Set,
            15 => TypeTag::List,
            _ => return None,
        })
    }

    /// Map a tag to its type code.
    pub fn code(tag: TypeTag) -> u8 {
        match tag {
            TypeTag::Stop => 0,
            TypeTag::Bool => 2,
            TypeTag::Byte => 3,
            TypeTag::Double => 4,
            TypeTag::I16 => 6,
            TypeTag::I32 => 8,
            TypeTag::I64 => 10,
            TypeTag::Binary => 11,
            TypeTag::Struct => 12,
            TypeTag::Map => 13,
            TypeTag::Set => 14,
            TypeTag::List => 15,
        }
    }
}

fn read_tag(c: &mut Cursor) -> Result<TypeTag, Error> {
    let offset = c.position();
    let code = c.read_byte()?;
    Binary::tag(code).ok_or(Error::InvalidTypeTag {
        offset,
        found: code,
    })
}

fn to_len(found: i32, offset: usize) -> Result<usize, Error> {
    usize::try_from(found).map_err(|_| Error::MalformedLength {
        offset,
        found: found.into(),
    })
}

impl Protocol for Binary {
    fn bool_element(value: bool) -> &'static [u8] {
        if value { &[1] } else { &[0] }
    }

    fn read_message_header(&mut self, c: &mut Cursor) -> Result<MessageHeader, Error> {
        let offset = c.position();
        let first = i32::from_be_bytes(c.read_fixed()?);

        if first < 0 {
            // Strict: version and kind, name, sequence identifier.
            let version = first as u32 & VERSION_MASK;
            if version != VERSION_1 {
                Err(Error::BadVersion {
                    offset,
                    found: version,
                })?;
            }

            let kind = read_message_kind(first as u8, offset + 3)?;

            let len_offset = c.position();
            let len = i32::from_be_bytes(c.read_fixed()?);
            let name = read_message_name(c, to_len(len, len_offset)?)?;

            let sequence_id = self.read_i32(c)?;

            Ok(MessageHeader {
                name,
                kind,
                sequence_id,
            })
        } else {
            // Non-strict: name, kind, sequence identifier.
            let name = read_message_name(c, to_len(first, offset)?)?;

            let kind_offset = c.position();
            let kind = read_message_kind(c.read_byte()?, kind_offset)?;

            let sequence_id = self.read_i32(c)?;

            Ok(MessageHeader {
                name,
                kind,
                sequence_id,
            })
        }
    }

    fn read_field_header(&mut self, c: &mut Cursor) -> Result<FieldHeader, Error> {
        let tag = read_tag(c)?;

        if tag.is_stop() {
            return Ok(FieldHeader::stop());
        }

        let id = i16::from_be_bytes(c.read_fixed()?);

        Ok(FieldHeader {
            tag,
            id,
            inline_bool: None,
        })
    }

    fn read_list_header(&mut self, c: &mut Cursor) -> Result<ListHeader, Error> {
        #[repr(C)]
        #[derive(FromBytes)]
        struct CollectionHeader {
            element: u8,
            len: I32,
        }

        let offset = c.position();
        let CollectionHeader { element, len } = zerocopy::transmute!(c.read_fixed::<5>()?);

        let element = Binary::tag(element).ok_or(Error::InvalidTypeTag {
            offset,
            found: element,
        })?;
        let len = to_len(len.get(), offset + 1)?;

        Ok(ListHeader { element, len })
    }

    fn read_map_header(&mut self, c: &mut Cursor) -> Result<MapHeader, Error> {
        #[repr(C)]
        #[derive(FromBytes)]
        struct MapHeaderBytes {
            key: u8,
            value: u8,
            len: I32,
        }

        let offset = c.position();
        let MapHeaderBytes { key, value, len } = zerocopy::transmute!(c.read_fixed::<6>()?);

        let key = Binary::tag(key).ok_or(Error::InvalidTypeTag { offset, found: key })?;
        let value = Binary::tag(value).ok_or(Error::InvalidTypeTag {
            offset: offset + 1,
            found: value,
        })?;
        let len = to_len(len.get(), offset + 2)?;

        Ok(MapHeader { key, value, len })
    }

    fn read_bool(&mut self, c: &mut Cursor) -> Result<bool, Error> {
        Ok(c.read_byte()? != 0)
    }

    fn read_byte(&mut self, c: &mut Cursor) -> Result<i8, Error> {
        Ok(c.read_byte()? as i8)
    }

    fn read_i16(&mut self, c: &mut Cursor) -> Result<i16, Error> {
        Ok(i16::from_be_bytes(c.read_fixed()?))
    }

    fn read_i32(&mut self, c: &mut Cursor) -> Result<i32, Error> {
        Ok(i32::from_be_bytes(c.read_fixed()?))
    }

    fn read_i64(&mut self, c: &mut Cursor) -> Result<i64, Error> {
        Ok(i64::from_be_bytes(c.read_fixed()?))
    }

    fn read_double(&mut self, c: &mut Cursor) -> Result<f64, Error> {
        Ok(f64::from_be_bytes(c.read_fixed()?))
    }

    fn read_binary_len(&mut self, c: &mut Cursor) -> Result<usize, Error> {
        let offset = c.position();
        to_len(i32::from_be_bytes(c.read_fixed()?), offset)
    }
}
