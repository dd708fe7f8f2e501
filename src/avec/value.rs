//! Eager decoding into a tree of values.

use alloc::{collections::BTreeMap, vec::Vec};

use bytes::Bytes;

use crate::sans::{Decoder, Error, Protocol, TypeTag};

/// A fully decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Double(f64),
    /// A string or binary blob, sharing storage with the decoded buffer.
    Binary(Bytes),
    List(List),
    Set(List),
    Map(Map),
    Struct(Struct),
}

impl Value {
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Bool(_) => TypeTag::Bool,
            Value::Byte(_) => TypeTag::Byte,
            Value::I16(_) => TypeTag::I16,
            Value::I32(_) => TypeTag::I32,
            Value::I64(_) => TypeTag::I64,
            Value::Double(_) => TypeTag::Double,
            Value::Binary(_) => TypeTag::Binary,
            Value::List(_) => TypeTag::List,
            Value::Set(_) => TypeTag::Set,
            Value::Map(_) => TypeTag::Map,
            Value::Struct(_) => TypeTag::Struct,
        }
    }

    /// The value as a string, if it is valid UTF-8 binary.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Binary(b) => core::str::from_utf8(b).ok(),
            _ => None,
        }
    }
}

/// The elements of a list or set.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub element: TypeTag,
    pub items: Vec<Value>,
}

/// The entries of a map.
///
/// An empty map decoded with the compact protocol has [`TypeTag::Stop`] key
/// and value types, as the protocol does not record them.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub key: TypeTag,
    pub value: TypeTag,
    pub entries: Vec<(Value, Value)>,
}

/// The fields of a struct, by field identifier.
pub type Struct = BTreeMap<i16, Value>;

/// Decode one value of type `tag`.
pub fn read_value<P: Protocol>(d: &mut Decoder<P>, tag: TypeTag) -> Result<Value, Error> {
    Ok(match tag {
        TypeTag::Stop => {
            return Err(Error::InvalidTypeTag {
                offset: d.position(),
                found: 0,
            });
        }
        TypeTag::Bool => Value::Bool(d.read_bool()?),
        TypeTag::Byte => Value::Byte(d.read_byte()?),
        TypeTag::I16 => Value::I16(d.read_i16()?),
        TypeTag::I32 => Value::I32(d.read_i32()?),
        TypeTag::I64 => Value::I64(d.read_i64()?),
        TypeTag::Double => Value::Double(d.read_double()?),
        TypeTag::Binary => {
            let s = d.read_binary()?;
            Value::Binary(d.slice(s))
        }
        TypeTag::List => Value::List(d.nested(|d| {
            let header = d.read_list_header()?;
            read_items(d, header.element, header.len)
        })?),
        TypeTag::Set => Value::Set(d.nested(|d| {
            let header = d.read_set_header()?;
            read_items(d, header.element, header.len)
        })?),
        TypeTag::Map => Value::Map(d.nested(|d| {
            let header = d.read_map_header()?;

            // Each entry occupies at least two bytes.
            let mut entries = Vec::with_capacity(header.len.min(d.cursor().remaining() / 2));
            for _ in 0..header.len {
                let k = read_value(d, header.key)?;
                let v = read_value(d, header.value)?;
                entries.push((k, v));
            }

            Ok(Map {
                key: header.key,
                value: header.value,
                entries,
            })
        })?),
        TypeTag::Struct => Value::Struct(read_struct(d)?),
    })
}

fn read_items<P: Protocol>(d: &mut Decoder<P>, element: TypeTag, len: usize) -> Result<List, Error> {
    // Each element occupies at least one byte.
    let mut items = Vec::with_capacity(len.min(d.cursor().remaining()));
    for _ in 0..len {
        items.push(read_value(d, element)?);
    }

    Ok(List { element, items })
}

/// Decode the fields of a struct through its stop marker.
///
/// If a field identifier repeats, the last occurrence is kept.
pub fn read_struct<P: Protocol>(d: &mut Decoder<P>) -> Result<Struct, Error> {
    d.nested(|d| {
        let mut fields = Struct::new();

        d.read_struct_begin();

        loop {
            let header = d.read_field_header()?;

            if header.tag.is_stop() {
                break;
            }

            let value = read_value(d, header.tag)?;
            fields.insert(header.id, value);
        }

        d.read_struct_end();

        Ok(fields)
    })
}
