mod common;

use bytes::Bytes;
use cassette::{
    avec::{self, Struct, Value},
    sans::{Binary, Compact, Error, MessageHeader, MessageKind, Protocol, TypeTag},
};
use common::{BinaryWriter, CompactWriter, Writer};

fn ping<W: Writer>(w: &mut W) {
    w.begin_struct();
    w.field(TypeTag::Binary, 1);
    w.binary(b"payload");
    w.bool_field(2, true);
    w.end_struct();
}

fn expected_header() -> MessageHeader {
    MessageHeader {
        name: "ping".into(),
        kind: MessageKind::Call,
        sequence_id: 7,
    }
}

fn decode_message<W: Writer, P: Protocol + Default>() {
    let mut w = W::default();
    w.message_header("ping", 1, 7);
    ping(&mut w);
    let buf = w.finish();

    let message = avec::decode_message::<P>(buf.clone()).unwrap();
    assert_eq!(message.header, expected_header());
    assert_eq!(message.arguments.len(), 2);
    assert_eq!(message.arguments.get(1).unwrap().tag(), TypeTag::Binary);
    assert_eq!(
        message.arguments.decode_field::<P>(2),
        Some(Ok(Value::Bool(true)))
    );

    let general = avec::decode_general_message::<P>(buf.clone()).unwrap();
    assert_eq!(general.header, expected_header());
    assert_eq!(
        general.arguments,
        Struct::from([
            (1, Value::Binary(Bytes::from_static(b"payload"))),
            (2, Value::Bool(true)),
        ])
    );

    assert_eq!(general.arguments[&1i16].as_str(), Some("payload"));

    assert_eq!(avec::decode_message_header::<P>(buf), Ok(expected_header()));
}

#[test]
fn decode_message_binary() {
    decode_message::<BinaryWriter, Binary>();
}

#[test]
fn decode_message_compact() {
    decode_message::<CompactWriter, Compact>();
}

#[test]
fn binary_non_strict_header() {
    let mut w = BinaryWriter::default();
    w.message_header_non_strict("ping", 1, 7);
    ping(&mut w);

    let message = avec::decode_message::<Binary>(w.finish()).unwrap();
    assert_eq!(message.header, expected_header());
    assert_eq!(message.arguments.len(), 2);
}

#[test]
fn compact_header_layout() {
    let mut w = CompactWriter::default();
    w.message_header("get", 2, -1);

    // Protocol identifier, version and kind, sequence identifier, name.
    assert_eq!(w.finish(), b"\x82\x41\xFF\xFF\xFF\xFF\x0F\x03get");

    let header = avec::decode_message_header::<Compact>(&b"\x82\x41\xFF\xFF\xFF\xFF\x0F\x03get"[..]);
    assert_eq!(
        header,
        Ok(MessageHeader {
            name: "get".into(),
            kind: MessageKind::Reply,
            sequence_id: -1,
        })
    );
}

#[test]
fn compact_bad_protocol_id() {
    assert_eq!(
        avec::decode_message_header::<Compact>(&b"\x80\x21\x00\x00"[..]),
        Err(Error::BadProtocolId {
            offset: 0,
            found: 0x80
        })
    );
}

#[test]
fn compact_bad_version() {
    assert_eq!(
        avec::decode_message_header::<Compact>(&b"\x82\x22\x00\x00"[..]),
        Err(Error::BadVersion { offset: 1, found: 2 })
    );
}

#[test]
fn compact_bad_kind() {
    assert_eq!(
        avec::decode_message_header::<Compact>(&b"\x82\xA1\x00\x00"[..]),
        Err(Error::InvalidMessageKind { offset: 1, found: 5 })
    );
}

#[test]
fn binary_bad_version() {
    assert_eq!(
        avec::decode_message_header::<Binary>(&b"\x80\x02\x00\x01\x00\x00\x00\x00\x00\x00\x00\x00"[..]),
        Err(Error::BadVersion {
            offset: 0,
            found: 0x8002_0000
        })
    );
}

#[test]
fn binary_bad_kind() {
    assert_eq!(
        avec::decode_message_header::<Binary>(&b"\x80\x01\x00\x09\x00\x00\x00\x00\x00\x00\x00\x00"[..]),
        Err(Error::InvalidMessageKind { offset: 3, found: 9 })
    );
}

#[test]
fn invalid_name() {
    assert_eq!(
        avec::decode_message_header::<Compact>(&b"\x82\x21\x00\x02\xC3\x28"[..]),
        Err(Error::InvalidUtf8 { offset: 4 })
    );
}

#[test]
fn truncated_arguments() {
    let mut w = CompactWriter::default();
    w.message_header("ping", 4, 0);
    ping(&mut w);
    let mut buf = w.finish();

    // Drop the stop marker.
    buf.pop();

    assert!(matches!(
        avec::decode_message::<Compact>(buf),
        Err(Error::UnexpectedEndOfInput { .. })
    ));
}

#[cfg(feature = "std")]
mod reader {
    use std::io;

    use super::*;

    #[test]
    fn decode_reader() {
        let mut w = CompactWriter::default();
        w.message_header("ping", 1, 7);
        ping(&mut w);
        let buf = w.finish();

        let message = avec::reader::decode_message::<Compact>(&mut io::Cursor::new(buf)).unwrap();
        assert_eq!(message.header, expected_header());
        assert_eq!(message.arguments.len(), 2);
    }

    #[test]
    fn reader_errors() {
        struct Failing;

        impl io::Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("unplugged"))
            }
        }

        assert!(matches!(
            avec::reader::decode_raw_struct::<Binary>(&mut Failing),
            Err(avec::reader::Error::Io(_))
        ));

        assert!(matches!(
            avec::reader::decode_value::<Binary>(TypeTag::I32, &mut &b"\x00\x01"[..]),
            Err(avec::reader::Error::Decode(Error::UnexpectedEndOfInput { .. }))
        ));
    }
}
