#![no_std]

//! A lazy, zero-copy decoder for Thrift binary and compact protocol data.
//!
//! Cassette decodes structs in one of two ways. Eager decoding materializes a
//! complete [`avec::Value`]. Raw decoding walks a struct field by field and
//! captures each field's encoded bytes without interpreting them, so that the
//! cost of decoding a field is only paid when it is accessed.
//!
//! Most users should begin with the functions in the [`avec`] module. The
//! [`sans`] module exposes the cursor, protocol codecs and skip engine those
//! functions are built from.
//!
//! ## Buffer ownership
//!
//! Captured fields hold reference-counted views into the decoded buffer
//! ([`bytes::Bytes`]). The buffer stays alive, and immutable, for as long as
//! any field referencing it does.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoding (default).

extern crate alloc;

pub mod avec;
pub mod sans;
