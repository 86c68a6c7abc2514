//! Cursor over a pre-sized output buffer.

// This module uses `as` casts which have been thoroughly reviewed for correctness.
#![allow(clippy::as_conversions)]

use bytes::{BufMut, Bytes, BytesMut};

use crate::leb128::{zigzag_encode_32, zigzag_encode_64, LebCodec};
use crate::wire::{make_tag, WireType};

/// Writes protobuf values into a buffer whose size was computed up front.
///
/// The buffer never grows. Writing past the end panics, it means the size
/// passed to [`ByteWriter::allocate`] disagreed with what was written.
#[derive(Debug)]
pub struct ByteWriter {
    buf: BytesMut,
    pos: usize,
}

impl ByteWriter {
    /// Create a writer over `size` zeroed bytes.
    pub fn allocate(size: usize) -> Self {
        ByteWriter {
            buf: BytesMut::zeroed(size),
            pos: 0,
        }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn space_left(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Write a pre-composed tag.
    #[inline]
    pub fn write_tag(&mut self, tag: u32) {
        self.write_uint32(tag);
    }

    /// Write the tag for `field_number` with `wire_type`.
    #[inline]
    pub fn write_field_tag(&mut self, field_number: u32, wire_type: WireType) {
        self.write_tag(make_tag(field_number, wire_type));
    }

    #[inline]
    pub fn write_uint32(&mut self, value: u32) {
        let mut dst = &mut self.buf[self.pos..];
        let written = value.encode_leb128(&mut dst);
        self.pos += written;
    }

    #[inline]
    pub fn write_uint64(&mut self, value: u64) {
        let mut dst = &mut self.buf[self.pos..];
        let written = value.encode_leb128(&mut dst);
        self.pos += written;
    }

    /// Write an `int32`. Negative values are sign extended and always take
    /// ten bytes, as every other protobuf implementation writes them.
    #[inline]
    pub fn write_int32(&mut self, value: i32) {
        if value >= 0 {
            self.write_uint32(value as u32);
        } else {
            self.write_uint64(i64::from(value) as u64);
        }
    }

    #[inline]
    pub fn write_int64(&mut self, value: i64) {
        self.write_uint64(value as u64);
    }

    #[inline]
    pub fn write_sint32(&mut self, value: i32) {
        self.write_uint32(zigzag_encode_32(value));
    }

    #[inline]
    pub fn write_sint64(&mut self, value: i64) {
        self.write_uint64(zigzag_encode_64(value));
    }

    #[inline]
    pub fn write_fixed32(&mut self, value: u32) {
        self.dst(4).put_u32_le(value);
        self.pos += 4;
    }

    #[inline]
    pub fn write_fixed64(&mut self, value: u64) {
        self.dst(8).put_u64_le(value);
        self.pos += 8;
    }

    #[inline]
    pub fn write_sfixed32(&mut self, value: i32) {
        self.write_fixed32(value as u32);
    }

    #[inline]
    pub fn write_sfixed64(&mut self, value: i64) {
        self.write_fixed64(value as u64);
    }

    #[inline]
    pub fn write_double(&mut self, value: f64) {
        self.write_fixed64(value.to_bits());
    }

    #[inline]
    pub fn write_float(&mut self, value: f32) {
        self.write_fixed32(value.to_bits());
    }

    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_byte(u8::from(value));
    }

    #[inline]
    pub fn write_enum(&mut self, value: i32) {
        self.write_int32(value);
    }

    #[inline]
    pub fn write_byte(&mut self, value: u8) {
        self.buf[self.pos] = value;
        self.pos += 1;
    }

    /// Copy `value` verbatim, with no length prefix.
    #[inline]
    pub fn write_raw_bytes(&mut self, value: &[u8]) {
        self.dst(value.len()).copy_from_slice(value);
        self.pos += value.len();
    }

    /// Write a length-prefixed `bytes` value.
    #[inline]
    pub fn write_bytes(&mut self, value: &[u8]) {
        self.write_length(value.len());
        self.write_raw_bytes(value);
    }

    /// Write a length-prefixed `string` value.
    ///
    /// A `&str` already holds UTF-8 so its encoded length is known before the
    /// prefix is written, and the prefix never has to be re-derived.
    #[inline]
    pub fn write_string(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Write the varint length prefix of a length-delimited value.
    #[inline]
    pub fn write_length(&mut self, len: usize) {
        debug_assert!(len <= i32::MAX as usize, "length {len} does not fit a prefix");
        self.write_uint32(len as u32);
    }

    /// Finish writing, returning the whole buffer.
    pub fn complete(self) -> Bytes {
        debug_assert_eq!(self.pos, self.buf.len(), "buffer was not filled exactly");
        self.buf.freeze()
    }

    /// The next `len` bytes of the buffer.
    #[inline(always)]
    fn dst(&mut self, len: usize) -> &mut [u8] {
        &mut self.buf[self.pos..self.pos + len]
    }
}
