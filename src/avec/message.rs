//! Message envelope decoding.

use crate::sans::{Decoder, Error, MessageHeader, Protocol};

use super::{
    raw::{RawStruct, read_raw_struct},
    value::{Struct, read_struct},
};

/// A message header and the struct of arguments (or result) following it.
#[derive(Debug, Clone, PartialEq)]
pub struct Message<T = RawStruct> {
    pub header: MessageHeader,
    pub arguments: T,
}

/// Read a message, capturing its arguments as raw fields.
pub fn read_message<P: Protocol>(d: &mut Decoder<P>) -> Result<Message, Error> {
    let header = d.read_message_header()?;

    log::debug!(
        "message {:?} ({:?}, sequence {})",
        header.name,
        header.kind,
        header.sequence_id
    );

    let arguments = read_raw_struct(d)?;

    Ok(Message { header, arguments })
}

/// Read a message, fully decoding its arguments.
pub fn read_general_message<P: Protocol>(d: &mut Decoder<P>) -> Result<Message<Struct>, Error> {
    let header = d.read_message_header()?;
    let arguments = read_struct(d)?;

    Ok(Message { header, arguments })
}
