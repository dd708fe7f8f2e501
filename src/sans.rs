//! Low-level building blocks for implementing decoders.
//!
//! This module is intended for applications that need control over how a
//! buffer is walked. See [`crate::avec`] for implementations covering common
//! decoding patterns.
//!
//! # Architecture
//!
//! A [`Cursor`] reads primitives from a shared byte buffer. A [`Protocol`]
//! (either [`Binary`] or [`Compact`]) interprets those primitives as Thrift
//! headers and scalars. A [`Decoder`] pairs the two with a set of [`Limits`]
//! and a nesting depth counter, and provides [`Decoder::skip`], which advances
//! past one complete value of a given [`TypeTag`] and reports the bytes it
//! occupied.
//!
//! Every operation either succeeds completely or returns an [`Error`]. After
//! an error the decoder's position is meaningless and it should be dropped.

pub mod binary;
pub mod compact;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod protocol;
pub mod skip;
pub mod tag;

pub use binary::Binary;
pub use compact::Compact;
pub use cursor::{Cursor, Span};
pub use decoder::{Decoder, Limits};
pub use error::Error;
pub use protocol::{FieldHeader, ListHeader, MapHeader, MessageHeader, MessageKind, Protocol};
pub use tag::TypeTag;
