//! Exact encoded sizes, used to allocate the output buffer before encoding.
//!
//! Every function here mirrors a write path on [`crate::Marshaller`]. Sizes of
//! scalar values exclude the field's tag, add [`tag_size`] for that.

// This module uses `as` casts which have been thoroughly reviewed for correctness.
#![allow(clippy::as_conversions)]

use crate::leb128::{zigzag_encode_32, zigzag_encode_64, LebCodec};
use crate::message::{MapEntry, Message, ProtoEnum};
use crate::unknown::UnknownFields;
use crate::wire::{make_tag, WireType};

/// Size of the tag for `field_number`. The wire type never changes the size.
#[inline]
pub fn tag_size(field_number: u32) -> usize {
    make_tag(field_number, WireType::Varint).encoded_leb128_len()
}

/// Size of an `int32`. Negative values are sign extended to ten bytes.
#[inline]
pub fn int32_size(value: i32) -> usize {
    if value >= 0 {
        (value as u32).encoded_leb128_len()
    } else {
        10
    }
}

#[inline]
pub fn uint32_size(value: u32) -> usize {
    value.encoded_leb128_len()
}

#[inline]
pub fn int64_size(value: i64) -> usize {
    (value as u64).encoded_leb128_len()
}

#[inline]
pub fn uint64_size(value: u64) -> usize {
    value.encoded_leb128_len()
}

#[inline]
pub fn sint32_size(value: i32) -> usize {
    zigzag_encode_32(value).encoded_leb128_len()
}

#[inline]
pub fn sint64_size(value: i64) -> usize {
    zigzag_encode_64(value).encoded_leb128_len()
}

#[inline]
pub fn fixed32_size(_value: u32) -> usize {
    4
}

#[inline]
pub fn fixed64_size(_value: u64) -> usize {
    8
}

#[inline]
pub fn sfixed32_size(_value: i32) -> usize {
    4
}

#[inline]
pub fn sfixed64_size(_value: i64) -> usize {
    8
}

#[inline]
pub fn float_size(_value: f32) -> usize {
    4
}

#[inline]
pub fn double_size(_value: f64) -> usize {
    8
}

#[inline]
pub fn bool_size(_value: bool) -> usize {
    1
}

#[inline]
pub fn enum_size<E: ProtoEnum>(value: &E) -> usize {
    int32_size(value.value())
}

/// Size of a length prefix for a value of `len` bytes.
#[inline]
pub fn length_size(len: usize) -> usize {
    uint32_size(len as u32)
}

#[inline]
pub fn string_size(value: &str) -> usize {
    bytes_size(value.as_bytes())
}

#[inline]
pub fn bytes_size(value: &[u8]) -> usize {
    length_size(value.len()) + value.len()
}

/// Size of an embedded message, including its length prefix.
#[inline]
pub fn message_size<M: Message>(value: &M) -> usize {
    let len = value.encoded_len();
    length_size(len) + len
}

/// Size of a packed run of `list`, including its length prefix but not the
/// field's tag. `size_fn` gives the size of each element.
pub fn packed_repeated_size<T>(list: &[T], size_fn: impl Fn(&T) -> usize) -> usize {
    let len = packed_payload_size(list, size_fn);
    length_size(len) + len
}

/// Size of the elements of a packed run, excluding its length prefix.
#[inline]
pub fn packed_payload_size<T>(list: &[T], size_fn: impl Fn(&T) -> usize) -> usize {
    list.iter().map(size_fn).sum()
}

/// Size of every entry of a map field, tags included.
pub fn map_size<'a, E, I>(field_number: u32, entries: I) -> usize
where
    E: MapEntry,
    E::Key: 'a,
    E::Value: 'a,
    I: IntoIterator<Item = (&'a E::Key, &'a E::Value)>,
{
    let tag_size = tag_size(field_number);
    entries
        .into_iter()
        .map(|(key, value)| {
            let len = E::entry_len(key, value);
            tag_size + length_size(len) + len
        })
        .sum()
}

/// Size of all unknown fields, tags included.
#[inline]
pub fn unknown_fields_size(fields: &UnknownFields) -> usize {
    fields.encoded_len()
}
