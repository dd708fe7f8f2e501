//! Buffer-based decoder entry points.
//!
//! Each function decodes one item from the start of the buffer and ignores
//! any bytes following it.

use bytes::Bytes;

use crate::sans::{Decoder, Error, MessageHeader, Protocol, TypeTag};

use super::{
    message::{Message, read_general_message, read_message},
    raw::{RawStruct, read_raw_struct},
    value::{Struct, Value, read_value},
};

/// Decode a struct from a buffer, capturing its fields as raw bytes.
///
/// This method is also re-exported as `cassette::avec::decode_raw_struct`.
pub fn decode_raw_struct<P: Protocol + Default>(buf: impl Into<Bytes>) -> Result<RawStruct, Error> {
    read_raw_struct(&mut Decoder::<P>::new(buf))
}

/// Decode a message from a buffer, capturing its arguments as raw fields.
///
/// This method is also re-exported as `cassette::avec::decode_message`.
pub fn decode_message<P: Protocol + Default>(buf: impl Into<Bytes>) -> Result<Message, Error> {
    read_message(&mut Decoder::<P>::new(buf))
}

/// Decode only the header of a message from a buffer.
pub fn decode_message_header<P: Protocol + Default>(
    buf: impl Into<Bytes>,
) -> Result<MessageHeader, Error> {
    Decoder::<P>::new(buf).read_message_header()
}

/// Decode a message from a buffer, fully decoding its arguments.
pub fn decode_general_message<P: Protocol + Default>(
    buf: impl Into<Bytes>,
) -> Result<Message<Struct>, Error> {
    read_general_message(&mut Decoder::<P>::new(buf))
}

/// Decode one value of type `tag` from a buffer.
pub fn decode_value<P: Protocol + Default>(tag: TypeTag, buf: impl Into<Bytes>) -> Result<Value, Error> {
    read_value(&mut Decoder::<P>::new(buf), tag)
}
