//! Wire format for Google's Protocol Buffers, aka [protobuf](https://protobuf.dev).
//!
//! A tag is a varint holding `(field_number << 3) | wire_type`. Follows the
//! specification from <https://protobuf.dev/programming-guides/encoding> under
//! the "Message Structure" section.

// This module uses `as` casts which have been thoroughly reviewed for correctness.
#![allow(clippy::as_conversions)]

use crate::error::DecodeError;

/// Number of low bits in a tag that hold the [`WireType`].
pub const TAG_TYPE_BITS: u32 = 3;
/// Mask selecting the [`WireType`] bits of a tag.
pub const TAG_TYPE_MASK: u32 = (1 << TAG_TYPE_BITS) - 1;

/// Smallest legal field number.
pub const MIN_FIELD_NUMBER: u32 = 1;
/// Largest legal field number, 2^29 - 1.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Compose a tag from a field number and a [`WireType`].
#[inline(always)]
pub const fn make_tag(field_number: u32, wire_type: WireType) -> u32 {
    (field_number << TAG_TYPE_BITS) | wire_type.into_val() as u32
}

/// Extract the field number from a tag.
#[inline(always)]
pub const fn tag_field_number(tag: u32) -> u32 {
    tag >> TAG_TYPE_BITS
}

/// Extract the [`WireType`] from a tag.
#[inline(always)]
pub fn tag_wire_type(tag: u32) -> Result<WireType, DecodeError> {
    WireType::try_from_val((tag & TAG_TYPE_MASK) as u8)
}

/// Denotes the type of a field in an encoded protobuf message.
///
/// Protobuf messages are a series of key-value pairs. When encoded each key-value pair
/// is turned into a record consisting of a field number, a [`WireType`], and a payload.
/// The [`WireType`] indicates how large the proceeding payload is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum WireType {
    /// Variable length integer.
    ///
    /// Used for: `int32`, `int64`, `uint32`, `uint64`, `sint32`, `sint64`, `bool`, `enum`.
    Varint = 0,
    /// 64-bit integer.
    ///
    /// Used for: `fixed64`, `sfixed64`, `double`.
    I64 = 1,
    /// Variable length field.
    ///
    /// Used for: `string`, `bytes`, `message`, packed `repeated` fields.
    Len = 2,
    /// Group start (deprecated).
    SGroup = 3,
    /// Group end (deprecated).
    EGroup = 4,
    /// 32-bit integer.
    ///
    /// Used for: `fixed32`, `sfixed32`, `float`.
    I32 = 5,
}

// N.B. It's not super important that these are the same size, but keeping them as such
// allows the compiler to make as many optimizations as possible.
static_assertions::assert_eq_size!(WireType, Option<WireType>);

impl WireType {
    /// Try to decode a [`WireType`] from the provided raw value.
    #[inline(always)]
    pub fn try_from_val(value: u8) -> Result<Self, DecodeError> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::I64),
            2 => Ok(WireType::Len),
            3 => Ok(WireType::SGroup),
            4 => Ok(WireType::EGroup),
            5 => Ok(WireType::I32),
            _ => Err(DecodeError::invalid_wire_type(value)),
        }
    }

    /// Return the raw value for this [`WireType`].
    #[inline(always)]
    pub const fn into_val(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for WireType {
    type Error = DecodeError;

    #[inline(always)]
    fn try_from(value: u8) -> Result<Self, DecodeError> {
        WireType::try_from_val(value)
    }
}
