//! Advancing past encoded values without interpreting them.

use super::{Decoder, Error, Protocol, Span, TypeTag};

impl<P: Protocol> Decoder<P> {
    /// Advance past one complete value of type `tag`, returning the span of
    /// bytes it occupied.
    ///
    /// The tag must come from a field, element, key or value header that has
    /// just been read. For a boolean field whose value a protocol packs into
    /// the field header, the returned span is empty.
    ///
    /// Structs and containers are skipped recursively, bounded by
    /// [`Limits::max_depth`](super::Limits::max_depth). On error, the decoder
    /// is left at an unspecified position.
    pub fn skip(&mut self, tag: TypeTag) -> Result<Span, Error> {
        let start = self.position();

        match tag {
            TypeTag::Stop => {
                return Err(Error::InvalidTypeTag {
                    offset: start,
                    found: 0,
                });
            }

            TypeTag::Bool => {
                self.read_bool()?;
            }
            TypeTag::Byte => {
                self.read_byte()?;
            }
            TypeTag::I16 => {
                self.read_i16()?;
            }
            TypeTag::I32 => {
                self.read_i32()?;
            }
            TypeTag::I64 => {
                self.read_i64()?;
            }
            TypeTag::Double => {
                self.read_double()?;
            }
            TypeTag::Binary => {
                self.read_binary()?;
            }

            TypeTag::List => self.nested(|d| {
                let header = d.read_list_header()?;
                d.skip_elements(header.element, header.len)
            })?,
            TypeTag::Set => self.nested(|d| {
                let header = d.read_set_header()?;
                d.skip_elements(header.element, header.len)
            })?,
            TypeTag::Map => self.nested(|d| {
                let header = d.read_map_header()?;
                for _ in 0..header.len {
                    d.skip(header.key)?;
                    d.skip(header.value)?;
                }
                Ok(())
            })?,
            TypeTag::Struct => self.nested(|d| d.skip_fields())?,
        }

        let span = Span::between(start, self.position());
        log::trace!("skipped {tag:?} of {} bytes at offset {start}", span.len);

        Ok(span)
    }

    fn skip_elements(&mut self, element: TypeTag, len: usize) -> Result<(), Error> {
        for _ in 0..len {
            self.skip(element)?;
        }

        Ok(())
    }

    /// Skip the fields of a struct, through its stop marker.
    fn skip_fields(&mut self) -> Result<(), Error> {
        self.read_struct_begin();

        loop {
            let field = self.read_field_header()?;

            if field.tag.is_stop() {
                break;
            }

            self.skip(field.tag)?;
        }

        self.read_struct_end();

        Ok(())
    }
}
