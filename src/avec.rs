//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode messages, structs and values from
//! buffers and readers, for either protocol in [`crate::sans`]:
//!
//! ```
//! use cassette::{avec, sans::Compact};
//!
//! let message = avec::decode_message::<Compact>(buf)?;
//! if let Some(field) = message.arguments.get(1) {
//!     let value = field.decode::<Compact>()?;
//! }
//! ```
//!
//! Raw decoding ([`decode_raw_struct`], [`decode_message`]) captures each
//! field as a [`StructField`], a zero-copy view of its encoded bytes. Eager
//! decoding ([`decode_value`], [`decode_general_message`]) produces a
//! [`Value`] tree.
//!
//! Slice-based functions accept anything convertible into [`bytes::Bytes`].
//! Passing a `Bytes` shares its storage with the decoded fields; passing a
//! `Vec<u8>` moves it into shared storage without copying.

pub mod message;
pub mod raw;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;
pub mod value;

pub use message::{Message, read_general_message, read_message};
pub use raw::{RawStruct, StructField, read_raw_struct};
pub use slice::{
    decode_general_message, decode_message, decode_message_header, decode_raw_struct,
    decode_value,
};
pub use value::{List, Map, Struct, Value, read_struct, read_value};
