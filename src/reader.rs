//! Cursor over an immutable buffer of protobuf wire data.

// This module uses `as` casts which have been thoroughly reviewed for correctness.
#![allow(clippy::as_conversions)]

use bytes::{Buf, Bytes};

use crate::error::DecodeError;
use crate::leb128::{zigzag_decode_32, zigzag_decode_64, LebCodec};
use crate::options::DecodeOptions;
use crate::util::{unlikely, CastFrom};
use crate::wire::{make_tag, tag_field_number, tag_wire_type, WireType};

/// Reads protobuf values out of a [`Bytes`] buffer.
///
/// All positions are absolute offsets into the buffer. The reader keeps one
/// active limit, set with [`ByteReader::push_limit`] when descending into a
/// length-delimited value; the caller holds on to the previous limit and
/// hands it back to [`ByteReader::pop_limit`], so the stack lives on the
/// caller's call stack.
#[derive(Debug, Clone)]
pub struct ByteReader {
    buf: Bytes,
    /// Next byte to read.
    pos: usize,
    /// End of the current length-delimited value, never past `buf.len()`.
    limit: usize,
    /// The most recent value returned from [`ByteReader::read_tag`].
    last_tag: u32,
    /// No read may move `pos` past this.
    size_limit: usize,
    recursion_limit: u32,
    /// Embedded messages and skipped groups currently open.
    depth: u32,
}

impl ByteReader {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self::with_options(buf, &DecodeOptions::default())
    }

    pub fn with_size_limit(buf: impl Into<Bytes>, size_limit: usize) -> Self {
        let options = DecodeOptions::default().with_size_limit(size_limit);
        Self::with_options(buf, &options)
    }

    pub fn with_options(buf: impl Into<Bytes>, options: &DecodeOptions) -> Self {
        let buf = buf.into();
        let limit = buf.len();
        ByteReader {
            buf,
            pos: 0,
            limit,
            last_tag: 0,
            size_limit: options.size_limit,
            recursion_limit: options.recursion_limit,
            depth: 0,
        }
    }

    /// Absolute offset of the next byte to be read.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The value most recently returned by [`ByteReader::read_tag`].
    #[inline]
    pub fn last_tag(&self) -> u32 {
        self.last_tag
    }

    /// Number of bytes left before the active limit.
    #[inline]
    pub fn bytes_until_limit(&self) -> usize {
        self.limit - self.pos
    }

    /// Returns `true` once every byte under the active limit is consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.limit
    }

    /// Read a field tag, returning `0` at the end of the message.
    ///
    /// A message may legally end wherever a tag could start, and no real tag
    /// is zero. A tag whose field number is zero is an error.
    #[inline]
    pub fn read_tag(&mut self) -> Result<u32, DecodeError> {
        if self.is_at_end() {
            self.last_tag = 0;
            return Ok(0);
        }

        let tag = self.read_raw_varint32()?;
        if unlikely(tag_field_number(tag) == 0) {
            return Err(DecodeError::invalid_tag());
        }
        self.last_tag = tag;
        Ok(tag)
    }

    /// Restrict reads to the next `len` bytes, returning the limit to pass to
    /// [`ByteReader::pop_limit`] afterwards.
    pub fn push_limit(&mut self, len: usize) -> Result<usize, DecodeError> {
        let new_limit = self
            .pos
            .checked_add(len)
            .ok_or_else(DecodeError::truncated_message)?;
        if unlikely(new_limit > self.size_limit) {
            return Err(DecodeError::size_limit_exceeded(self.size_limit));
        }
        // A nested value cannot claim more than its container has left.
        if unlikely(new_limit > self.limit) {
            return Err(DecodeError::truncated_message());
        }

        let old_limit = self.limit;
        self.limit = new_limit;
        Ok(old_limit)
    }

    /// Restore the limit returned from the matching [`ByteReader::push_limit`].
    pub fn pop_limit(&mut self, old_limit: usize) {
        debug_assert!(old_limit >= self.limit);
        self.limit = old_limit;
    }

    /// Read the varint length prefix of a length-delimited value.
    #[inline]
    pub fn read_length(&mut self) -> Result<usize, DecodeError> {
        let len = self.read_raw_varint32()?;
        if unlikely((len as i32) < 0) {
            return Err(DecodeError::negative_size());
        }
        Ok(usize::cast_from(len))
    }

    /// Read a varint, keeping only its low 32 bits.
    #[inline]
    pub fn read_raw_varint32(&mut self) -> Result<u32, DecodeError> {
        let (value, len) = u32::decode_leb128(self.remaining())?;
        self.consume(len)?;
        Ok(value)
    }

    #[inline]
    pub fn read_raw_varint64(&mut self) -> Result<u64, DecodeError> {
        let (value, len) = u64::decode_leb128(self.remaining())?;
        self.consume(len)?;
        Ok(value)
    }

    #[inline]
    pub fn read_raw_little_endian32(&mut self) -> Result<u32, DecodeError> {
        let start = self.consume(4)?;
        Ok((&self.buf[start..start + 4]).get_u32_le())
    }

    #[inline]
    pub fn read_raw_little_endian64(&mut self) -> Result<u64, DecodeError> {
        let start = self.consume(8)?;
        Ok((&self.buf[start..start + 8]).get_u64_le())
    }

    /// Read exactly `len` bytes. The returned [`Bytes`] shares the input buffer.
    #[inline]
    pub fn read_raw_bytes(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        let start = self.consume(len)?;
        Ok(self.buf.slice(start..start + len))
    }

    #[inline]
    pub fn skip_raw_bytes(&mut self, len: usize) -> Result<(), DecodeError> {
        self.consume(len)?;
        Ok(())
    }

    /// Read a `double` field value.
    #[inline]
    pub fn read_double(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.read_raw_little_endian64()?))
    }

    /// Read a `float` field value.
    #[inline]
    pub fn read_float(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_bits(self.read_raw_little_endian32()?))
    }

    /// Read an `int32` field value.
    #[inline]
    pub fn read_int32(&mut self) -> Result<i32, DecodeError> {
        Ok(self.read_raw_varint32()? as i32)
    }

    /// Read an `int64` field value.
    #[inline]
    pub fn read_int64(&mut self) -> Result<i64, DecodeError> {
        Ok(self.read_raw_varint64()? as i64)
    }

    /// Read a `uint32` field value.
    #[inline]
    pub fn read_uint32(&mut self) -> Result<u32, DecodeError> {
        self.read_raw_varint32()
    }

    /// Read a `uint64` field value.
    #[inline]
    pub fn read_uint64(&mut self) -> Result<u64, DecodeError> {
        self.read_raw_varint64()
    }

    /// Read a `sint32` field value.
    #[inline]
    pub fn read_sint32(&mut self) -> Result<i32, DecodeError> {
        Ok(zigzag_decode_32(self.read_raw_varint32()?))
    }

    /// Read a `sint64` field value.
    #[inline]
    pub fn read_sint64(&mut self) -> Result<i64, DecodeError> {
        Ok(zigzag_decode_64(self.read_raw_varint64()?))
    }

    /// Read a `fixed32` field value.
    #[inline]
    pub fn read_fixed32(&mut self) -> Result<u32, DecodeError> {
        self.read_raw_little_endian32()
    }

    /// Read a `fixed64` field value.
    #[inline]
    pub fn read_fixed64(&mut self) -> Result<u64, DecodeError> {
        self.read_raw_little_endian64()
    }

    /// Read an `sfixed32` field value.
    #[inline]
    pub fn read_sfixed32(&mut self) -> Result<i32, DecodeError> {
        Ok(self.read_raw_little_endian32()? as i32)
    }

    /// Read an `sfixed64` field value.
    #[inline]
    pub fn read_sfixed64(&mut self) -> Result<i64, DecodeError> {
        Ok(self.read_raw_little_endian64()? as i64)
    }

    /// Read a `bool` field value. Any non-zero varint is `true`.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_raw_varint64()? != 0)
    }

    /// Read the raw number of an `enum` field.
    #[inline]
    pub fn read_enum(&mut self) -> Result<i32, DecodeError> {
        self.read_int32()
    }

    /// Read a `string` field value, rejecting invalid UTF-8.
    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let len = self.read_length()?;
        if len == 0 {
            return Ok(String::new());
        }
        let start = self.consume(len)?;
        let s = std::str::from_utf8(&self.buf[start..start + len])
            .map_err(|_| DecodeError::invalid_utf8())?;
        Ok(s.to_owned())
    }

    /// Read a `bytes` field value.
    #[inline]
    pub fn read_bytes(&mut self) -> Result<Bytes, DecodeError> {
        let len = self.read_length()?;
        self.read_raw_bytes(len)
    }

    /// Discard the value belonging to `tag`.
    ///
    /// Returns `false` for an end-group tag, in which case nothing is
    /// skipped. A start-group tag skips everything up to and including the
    /// matching end-group tag.
    pub fn skip_field(&mut self, tag: u32) -> Result<bool, DecodeError> {
        match tag_wire_type(tag)? {
            WireType::Varint => {
                self.read_raw_varint64()?;
            }
            WireType::I64 => self.skip_raw_bytes(8)?,
            WireType::Len => {
                let len = self.read_length()?;
                self.skip_raw_bytes(len)?;
            }
            WireType::SGroup => {
                let field_number = tag_field_number(tag);
                tracing::debug!(field_number, "skipping deprecated group");

                self.enter_nested()?;
                let result = self.skip_message();
                self.exit_nested();
                result?;

                self.check_last_tag_was(make_tag(field_number, WireType::EGroup))?;
            }
            WireType::EGroup => return Ok(false),
            WireType::I32 => self.skip_raw_bytes(4)?,
        }
        Ok(true)
    }

    /// Read and discard fields until the end of input or an end-group tag.
    pub fn skip_message(&mut self) -> Result<(), DecodeError> {
        loop {
            let tag = self.read_tag()?;
            if tag == 0 || !self.skip_field(tag)? {
                return Ok(());
            }
        }
    }

    /// Verify the last tag read was `value`, used to check a group ended with
    /// the matching end tag.
    pub fn check_last_tag_was(&self, value: u32) -> Result<(), DecodeError> {
        if self.last_tag != value {
            return Err(DecodeError::invalid_end_tag());
        }
        Ok(())
    }

    /// Open one level of nesting, embedded message or group alike.
    pub(crate) fn enter_nested(&mut self) -> Result<(), DecodeError> {
        if unlikely(self.depth >= self.recursion_limit) {
            return Err(DecodeError::recursion_limit_exceeded(self.recursion_limit));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_nested(&mut self) {
        self.depth -= 1;
    }

    /// The bytes left under the active limit.
    #[inline(always)]
    fn remaining(&self) -> &[u8] {
        &self.buf[self.pos..self.limit]
    }

    /// Claim the next `len` bytes, returning the offset they start at.
    #[inline(always)]
    fn consume(&mut self, len: usize) -> Result<usize, DecodeError> {
        let start = self.pos;
        let end = start
            .checked_add(len)
            .ok_or_else(DecodeError::truncated_message)?;
        if unlikely(end > self.size_limit) {
            return Err(DecodeError::size_limit_exceeded(self.size_limit));
        }
        if unlikely(end > self.limit) {
            return Err(DecodeError::truncated_message());
        }
        self.pos = end;
        Ok(start)
    }
}
