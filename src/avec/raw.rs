//! Raw struct decoding, capturing each field's encoded bytes.

use alloc::collections::{BTreeMap, btree_map};

use bytes::Bytes;

use crate::sans::{Decoder, Error, Protocol, TypeTag};

use super::value::{Value, read_value};

/// A struct field whose value has not been decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    tag: TypeTag,
    offset: usize,
    raw: Bytes,
}

impl StructField {
    /// The type of the field's value.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// The offset of the field's value in the decoded buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The encoded value, exactly as it appeared in the decoded buffer.
    ///
    /// This is a view sharing storage with that buffer. The one exception is
    /// a compact protocol boolean field, whose value is part of its field
    /// header: here the bytes are the boolean's encoding as a list element.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Decode the field's value.
    ///
    /// `P` must be the protocol the field was captured with.
    pub fn decode<P: Protocol + Default>(&self) -> Result<Value, Error> {
        read_value(&mut Decoder::<P>::new(self.raw.clone()), self.tag)
    }
}

/// The fields of a struct, by field identifier, with undecoded values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStruct(BTreeMap<i16, StructField>);

impl RawStruct {
    pub fn get(&self, id: i16) -> Option<&StructField> {
        self.0.get(&id)
    }

    pub fn contains(&self, id: i16) -> bool {
        self.0.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields in order of identifier.
    pub fn iter(&self) -> btree_map::Iter<'_, i16, StructField> {
        self.0.iter()
    }

    /// Decode a single field, if present.
    pub fn decode_field<P: Protocol + Default>(&self, id: i16) -> Option<Result<Value, Error>> {
        self.get(id).map(StructField::decode::<P>)
    }

    pub fn into_inner(self) -> BTreeMap<i16, StructField> {
        self.0
    }
}

impl IntoIterator for RawStruct {
    type Item = (i16, StructField);
    type IntoIter = btree_map::IntoIter<i16, StructField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RawStruct {
    type Item = (&'a i16, &'a StructField);
    type IntoIter = btree_map::Iter<'a, i16, StructField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Read the fields of a struct through its stop marker, capturing each
/// field's encoded value without decoding it.
///
/// If a field identifier repeats, the last occurrence is kept.
pub fn read_raw_struct<P: Protocol>(d: &mut Decoder<P>) -> Result<RawStruct, Error> {
    d.nested(|d| {
        let mut fields = BTreeMap::new();

        d.read_struct_begin();

        loop {
            let header = d.read_field_header()?;

            if header.tag.is_stop() {
                break;
            }

            let span = d.skip(header.tag)?;

            let raw = match header.inline_bool {
                Some(value) => Bytes::from_static(P::bool_element(value)),
                None => d.slice(span),
            };

            log::trace!(
                "captured field {} ({:?}) of {} bytes at offset {}",
                header.id,
                header.tag,
                raw.len(),
                span.offset,
            );

            let field = StructField {
                tag: header.tag,
                offset: span.offset,
                raw,
            };

            if fields.insert(header.id, field).is_some() {
                log::debug!("field {} repeated, keeping the last occurrence", header.id);
            }
        }

        d.read_struct_end();

        Ok(RawStruct(fields))
    })
}
