#![allow(dead_code)]

use cassette::{
    avec::Value,
    sans::{Binary, Compact, TypeTag},
};

/// A minimal encoder, enough to produce test input for either protocol.
pub trait Writer: Default {
    fn buf(&mut self) -> &mut Vec<u8>;

    fn message_header(&mut self, name: &str, kind: u8, sequence_id: i32);

    fn begin_struct(&mut self) {}
    /// Write the stop marker and finish the struct.
    fn end_struct(&mut self);

    fn field(&mut self, tag: TypeTag, id: i16);
    fn bool_field(&mut self, id: i16, value: bool);

    fn bool(&mut self, value: bool);
    fn i16(&mut self, value: i16);
    fn i32(&mut self, value: i32);
    fn i64(&mut self, value: i64);
    fn double(&mut self, value: f64);
    fn binary(&mut self, value: &[u8]);

    fn list(&mut self, element: TypeTag, len: usize);
    fn map(&mut self, key: TypeTag, value: TypeTag, len: usize);

    fn byte(&mut self, value: i8) {
        self.buf().push(value as u8);
    }

    fn raw(&mut self, bytes: &[u8]) {
        self.buf().extend_from_slice(bytes);
    }

    fn value(&mut self, value: &Value) {
        match value {
            Value::Bool(v) => self.bool(*v),
            Value::Byte(v) => self.byte(*v),
            Value::I16(v) => self.i16(*v),
            Value::I32(v) => self.i32(*v),
            Value::I64(v) => self.i64(*v),
            Value::Double(v) => self.double(*v),
            Value::Binary(v) => self.binary(v),
            Value::List(l) | Value::Set(l) => {
                self.list(l.element, l.items.len());
                for item in &l.items {
                    self.value(item);
                }
            }
            Value::Map(m) => {
                self.map(m.key, m.value, m.entries.len());
                for (k, v) in &m.entries {
                    self.value(k);
                    self.value(v);
                }
            }
            Value::Struct(s) => {
                self.begin_struct();
                for (id, v) in s {
                    if let Value::Bool(b) = v {
                        self.bool_field(*id, *b);
                    } else {
                        self.field(v.tag(), *id);
                        self.value(v);
                    }
                }
                self.end_struct();
            }
        }
    }

    fn finish(mut self) -> Vec<u8> {
        std::mem::take(self.buf())
    }
}

pub fn encode<W: Writer>(value: &Value) -> Vec<u8> {
    let mut w = W::default();
    w.value(value);
    w.finish()
}

#[derive(Default)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    /// Write a message header in the older, non-strict layout.
    pub fn message_header_non_strict(&mut self, name: &str, kind: u8, sequence_id: i32) {
        self.binary(name.as_bytes());
        self.buf.push(kind);
        self.i32(sequence_id);
    }
}

impl Writer for BinaryWriter {
    fn buf(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    fn message_header(&mut self, name: &str, kind: u8, sequence_id: i32) {
        self.i32((0x8001_0000u32 | u32::from(kind)) as i32);
        self.binary(name.as_bytes());
        self.i32(sequence_id);
    }

    fn end_struct(&mut self) {
        self.buf.push(0);
    }

    fn field(&mut self, tag: TypeTag, id: i16) {
        self.buf.push(Binary::code(tag));
        self.i16(id);
    }

    fn bool_field(&mut self, id: i16, value: bool) {
        self.field(TypeTag::Bool, id);
        self.bool(value);
    }

    fn bool(&mut self, value: bool) {
        self.buf.push(value as u8);
    }

    fn i16(&mut self, value: i16) {
        self.raw(&value.to_be_bytes());
    }

    fn i32(&mut self, value: i32) {
        self.raw(&value.to_be_bytes());
    }

    fn i64(&mut self, value: i64) {
        self.raw(&value.to_be_bytes());
    }

    fn double(&mut self, value: f64) {
        self.raw(&value.to_be_bytes());
    }

    fn binary(&mut self, value: &[u8]) {
        self.i32(value.len() as i32);
        self.raw(value);
    }

    fn list(&mut self, element: TypeTag, len: usize) {
        self.buf.push(Binary::code(element));
        self.i32(len as i32);
    }

    fn map(&mut self, key: TypeTag, value: TypeTag, len: usize) {
        self.buf.push(Binary::code(key));
        self.buf.push(Binary::code(value));
        self.i32(len as i32);
    }
}

#[derive(Default)]
pub struct CompactWriter {
    buf: Vec<u8>,
    last_field_id: i16,
    enclosing: Vec<i16>,
}

impl CompactWriter {
    pub fn varint(&mut self, mut n: u64) {
        while n >= 0x80 {
            self.buf.push((n as u8) | 0x80);
            n >>= 7;
        }
        self.buf.push(n as u8);
    }

    fn field_with_code(&mut self, code: u8, id: i16) {
        let delta = i32::from(id) - i32::from(self.last_field_id);

        if (1..=15).contains(&delta) {
            self.buf.push(((delta as u8) << 4) | code);
        } else {
            self.buf.push(code);
            self.i16(id);
        }

        self.last_field_id = id;
    }
}

impl Writer for CompactWriter {
    fn buf(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    fn message_header(&mut self, name: &str, kind: u8, sequence_id: i32) {
        self.buf.push(0x82);
        self.buf.push(1 | (kind << 5));
        self.varint(u64::from(sequence_id as u32));
        self.binary(name.as_bytes());
    }

    fn begin_struct(&mut self) {
        self.enclosing.push(self.last_field_id);
        self.last_field_id = 0;
    }

    fn end_struct(&mut self) {
        self.buf.push(0);
        self.last_field_id = self.enclosing.pop().unwrap_or_default();
    }

    fn field(&mut self, tag: TypeTag, id: i16) {
        self.field_with_code(Compact::code(tag), id);
    }

    fn bool_field(&mut self, id: i16, value: bool) {
        self.field_with_code(if value { 1 } else { 2 }, id);
    }

    fn bool(&mut self, value: bool) {
        self.buf.push(if value { 1 } else { 2 });
    }

    fn i16(&mut self, value: i16) {
        self.i32(value.into());
    }

    fn i32(&mut self, value: i32) {
        self.varint(u64::from(((value << 1) ^ (value >> 31)) as u32));
    }

    fn i64(&mut self, value: i64) {
        self.varint(((value << 1) ^ (value >> 63)) as u64);
    }

    fn double(&mut self, value: f64) {
        self.raw(&value.to_le_bytes());
    }

    fn binary(&mut self, value: &[u8]) {
        self.varint(value.len() as u64);
        self.raw(value);
    }

    fn list(&mut self, element: TypeTag, len: usize) {
        let code = Compact::code(element);

        if len < 15 {
            self.buf.push(((len as u8) << 4) | code);
        } else {
            self.buf.push(0xF0 | code);
            self.varint(len as u64);
        }
    }

    fn map(&mut self, key: TypeTag, value: TypeTag, len: usize) {
        self.varint(len as u64);

        if len != 0 {
            self.buf
                .push((Compact::code(key) << 4) | Compact::code(value));
        }
    }
}
