//! Errors occurring while decoding.

use thiserror::Error;

/// An error decoding a buffer.
///
/// Every variant carries the offset into the buffer at which the problem was
/// found. All errors are fatal to the decode that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Fewer bytes remained than a read required.
    #[error("Unexpectedly reached the end of input at offset {offset} (needed {needed}, found {remaining}).")]
    UnexpectedEndOfInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    /// A type code outside the known set, or stop where a value was required.
    #[error("Invalid type tag ({found:#04x}) at offset {offset}.")]
    InvalidTypeTag { offset: usize, found: u8 },
    /// A negative or oversized length or element count.
    #[error("Malformed length ({found}) at offset {offset}.")]
    MalformedLength { offset: usize, found: i64 },
    /// A varint running past ten bytes or out of range for its type.
    #[error("Malformed varint at offset {offset}.")]
    MalformedVarint { offset: usize },
    /// Containers and structs nested beyond the configured limit.
    #[error("Nesting exceeded the maximum depth ({limit}) at offset {offset}.")]
    NestingTooDeep { offset: usize, limit: usize },
    /// Incorrect protocol identifier in a message header.
    #[error("Incorrect protocol identifier ({found:#04x}) at offset {offset}.")]
    BadProtocolId { offset: usize, found: u8 },
    /// Unsupported protocol version in a message header.
    #[error("Unsupported protocol version ({found:#x}) at offset {offset}.")]
    BadVersion { offset: usize, found: u32 },
    /// Unknown message kind in a message header.
    #[error("Unknown message kind ({found}) at offset {offset}.")]
    InvalidMessageKind { offset: usize, found: u8 },
    /// A message name that is not valid UTF-8.
    #[error("Message name at offset {offset} is not valid UTF-8.")]
    InvalidUtf8 { offset: usize },
}
