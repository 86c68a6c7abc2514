//! A codec for the [protobuf](https://protobuf.dev) binary wire format.
//!
//! [`ByteReader`] and [`ByteWriter`] move raw values in and out of buffers.
//! [`Unmarshaller`] and [`Marshaller`] layer field-level operations on top,
//! framing nested messages, packed runs, maps and unknown fields. Message
//! types, usually generated, implement [`Message`] against them and use the
//! [`sizer`] functions to size the output buffer before encoding.

#![deny(clippy::as_conversions)]

mod error;
mod marshaller;
mod message;
mod options;
mod reader;
mod unknown;
mod unmarshaller;
mod util;
mod writer;

// Publically export `leb128` because the functions are useful on their own.
pub mod leb128;
pub mod sizer;
pub mod wire;

pub use crate::error::{DecodeError, DecodeErrorKind};
pub use crate::marshaller::Marshaller;
pub use crate::message::{read_oneof_field, IsProtoDefault, MapEntry, Message, Oneof, ProtoEnum};
pub use crate::options::{DecodeOptions, DEFAULT_RECURSION_LIMIT, DEFAULT_SIZE_LIMIT};
pub use crate::reader::ByteReader;
pub use crate::unknown::{UnknownField, UnknownFields, UnknownValue};
pub use crate::unmarshaller::Unmarshaller;
pub use crate::wire::WireType;
pub use crate::writer::ByteWriter;

// Re-exported so message code names the same `Bytes` the codec returns.
pub use bytes::Bytes;
