//! Reader-based decoder entry points.
//!
//! The reader is consumed to its end before decoding begins, so that decoded
//! fields can share one buffer.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use bytes::Bytes;
use thiserror::Error;

use crate::sans::{self, Decoder, Protocol, TypeTag};

use super::{
    message::{Message, read_general_message, read_message},
    raw::{RawStruct, read_raw_struct},
    value::{Struct, Value, read_value},
};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An error decoding the bytes read.
    #[error(transparent)]
    Decode(#[from] sans::Error),
}

/// Decode a struct from a reader, capturing its fields as raw bytes.
pub fn decode_raw_struct<P: Protocol + Default>(r: &mut impl Read) -> Result<RawStruct, Error> {
    Ok(read_raw_struct(&mut decoder::<P>(r)?)?)
}

/// Decode a message from a reader, capturing its arguments as raw fields.
pub fn decode_message<P: Protocol + Default>(r: &mut impl Read) -> Result<Message, Error> {
    Ok(read_message(&mut decoder::<P>(r)?)?)
}

/// Decode a message from a reader, fully decoding its arguments.
pub fn decode_general_message<P: Protocol + Default>(
    r: &mut impl Read,
) -> Result<Message<Struct>, Error> {
    Ok(read_general_message(&mut decoder::<P>(r)?)?)
}

/// Decode one value of type `tag` from a reader.
pub fn decode_value<P: Protocol + Default>(tag: TypeTag, r: &mut impl Read) -> Result<Value, Error> {
    Ok(read_value(&mut decoder::<P>(r)?, tag)?)
}

/// Read everything remaining in a reader into a decoder.
fn decoder<P: Protocol + Default>(r: &mut impl Read) -> Result<Decoder<P>, Error> {
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;

    Ok(Decoder::new(Bytes::from(buf)))
}
