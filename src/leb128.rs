//! LEB128 variable-length integer encoding/decoding, and the zigzag mapping
//! used by `sint32`/`sint64`.

// This module uses `as` casts which have been thoroughly reviewed for correctness.
#![allow(clippy::as_conversions)]

use crate::error::DecodeError;
use crate::util::likely;

/// Longest possible varint on the wire, a 64-bit value needs ten 7-bit groups.
pub const MAX_VARINT_LEN: usize = 10;

/// Integers that can be encoded as, and decoded from, a LEB128 varint.
pub trait LebCodec: Sized + Copy {
    /// Decode a varint from the front of `data`.
    ///
    /// Returns the decoded value and the number of bytes it occupied. Fails
    /// with `TruncatedMessage` if `data` ends before the final byte and with
    /// `MalformedVarint` if the 10th byte still has its continuation bit set.
    fn decode_leb128(data: &[u8]) -> Result<(Self, usize), DecodeError>;

    /// Encode `self` into `buf`, low-order group first, returning the number
    /// of bytes written.
    fn encode_leb128<B: bytes::BufMut>(self, buf: &mut B) -> usize;

    /// The number of bytes required to encode this integer.
    fn encoded_leb128_len(self) -> usize;
}

impl LebCodec for u64 {
    #[inline]
    fn decode_leb128(data: &[u8]) -> Result<(Self, usize), DecodeError> {
        // Fast path, most varints on the wire are a single byte.
        if let Some(&b) = data.first() {
            if likely(b < 0x80) {
                return Ok((u64::from(b), 1));
            }
        }

        let mut value = 0u64;
        for (i, &b) in data.iter().take(MAX_VARINT_LEN).enumerate() {
            // N.B. On the 10th byte only the lowest bit lands inside a u64,
            // anything above it is dropped like every other protobuf runtime.
            value |= u64::from(b & 0x7f) << (7 * i);
            if b < 0x80 {
                return Ok((value, i + 1));
            }
        }

        if data.len() < MAX_VARINT_LEN {
            Err(DecodeError::truncated_message())
        } else {
            Err(DecodeError::malformed_varint())
        }
    }

    #[inline]
    fn encode_leb128<B: bytes::BufMut>(self, buf: &mut B) -> usize {
        let mut value = self;
        let mut written = 1;
        while value >= 0x80 {
            buf.put_u8((value as u8) | 0x80);
            value >>= 7;
            written += 1;
        }
        buf.put_u8(value as u8);
        written
    }

    /// Compute the LEB128 encoded length using leading_zeros.
    ///
    /// LEB128 encodes 7 bits per byte. The number of bytes needed is
    /// ceil(significant_bits / 7), with a minimum of 1 byte for value 0.
    #[inline]
    fn encoded_leb128_len(self) -> usize {
        // Lookup table mapping leading_zeros (0-64) to LEB128 byte count.
        #[rustfmt::skip]
        const LZ_TO_LEN: [u8; 65] = [
            10,                                         // 0:     64 bits -> 10 bytes
            9, 9, 9, 9, 9, 9, 9,                        // 1-7:   63-57 bits -> 9 bytes
            8, 8, 8, 8, 8, 8, 8,                        // 8-14:  56-50 bits -> 8 bytes
            7, 7, 7, 7, 7, 7, 7,                        // 15-21: 49-43 bits -> 7 bytes
            6, 6, 6, 6, 6, 6, 6,                        // 22-28: 42-36 bits -> 6 bytes
            5, 5, 5, 5, 5, 5, 5,                        // 29-35: 35-29 bits -> 5 bytes
            4, 4, 4, 4, 4, 4, 4,                        // 36-42: 28-22 bits -> 4 bytes
            3, 3, 3, 3, 3, 3, 3,                        // 43-49: 21-15 bits -> 3 bytes
            2, 2, 2, 2, 2, 2, 2,                        // 50-56: 14-8 bits  -> 2 bytes
            1, 1, 1, 1, 1, 1, 1, 1,                     // 57-64: 7-0 bits   -> 1 byte
        ];

        LZ_TO_LEN[self.leading_zeros() as usize] as usize
    }
}

impl LebCodec for u32 {
    /// Decodes a varint and keeps its low 32 bits.
    ///
    /// `int32` values are sign-extended to 64 bits when written, so a valid
    /// 32-bit field can occupy up to ten bytes. Everything past the fifth
    /// byte is consumed and discarded.
    #[inline]
    fn decode_leb128(data: &[u8]) -> Result<(Self, usize), DecodeError> {
        let (value, len) = u64::decode_leb128(data)?;
        Ok((value as u32, len))
    }

    #[inline]
    fn encode_leb128<B: bytes::BufMut>(self, buf: &mut B) -> usize {
        u64::from(self).encode_leb128(buf)
    }

    #[inline]
    fn encoded_leb128_len(self) -> usize {
        // Lookup table mapping leading_zeros (0-32) to LEB128 byte count.
        #[rustfmt::skip]
        const LZ_TO_LEN: [u8; 33] = [
            5, 5, 5, 5,                         // 0-3:   32-29 bits -> 5 bytes
            4, 4, 4, 4, 4, 4, 4,                // 4-10:  28-22 bits -> 4 bytes
            3, 3, 3, 3, 3, 3, 3,                // 11-17: 21-15 bits -> 3 bytes
            2, 2, 2, 2, 2, 2, 2,                // 18-24: 14-8 bits  -> 2 bytes
            1, 1, 1, 1, 1, 1, 1, 1,             // 25-32: 7-0 bits   -> 1 byte
        ];

        LZ_TO_LEN[self.leading_zeros() as usize] as usize
    }
}

/// Map a signed 32-bit integer onto the unsigned range so that values of
/// small magnitude, negative or positive, encode to short varints.
///
/// N.B. The right shift is arithmetic.
#[inline]
pub const fn zigzag_encode_32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

/// Inverse of [`zigzag_encode_32`].
#[inline]
pub const fn zigzag_decode_32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ (-((n & 1) as i32))
}

/// 64-bit counterpart of [`zigzag_encode_32`].
#[inline]
pub const fn zigzag_encode_64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`zigzag_encode_64`].
#[inline]
pub const fn zigzag_decode_64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ (-((n & 1) as i64))
}
