//! The contract between the codec and message types.
//!
//! Message types are normally generated from `.proto` schemas. A generated
//! type implements [`Message`] by:
//!
//! * decoding: starting from defaults, looping on
//!   [`Unmarshaller::read_tag`] until it returns `0`, dispatching known tags
//!   to typed reads and everything else to [`Unmarshaller::unknown_field`];
//! * encoding: writing each field that differs from its default, in
//!   ascending field number order, then the retained unknown fields;
//! * sizing: summing [`crate::sizer`] results for exactly what encoding
//!   writes;
//! * merging: scalars from `other` override, embedded messages merge,
//!   repeated fields concatenate, maps overwrite by key, and unknown fields
//!   are unioned.

use bytes::Bytes;

use crate::error::DecodeError;
use crate::marshaller::Marshaller;
use crate::options::DecodeOptions;
use crate::unmarshaller::Unmarshaller;

/// A protobuf message.
pub trait Message: Sized + Default {
    /// Decode a message whose fields run until the unmarshaller's active limit.
    fn decode_from(unmarshaller: &mut Unmarshaller) -> Result<Self, DecodeError>;

    /// Write every non-default field, then the unknown fields.
    fn encode_to(&self, marshaller: &mut Marshaller);

    /// Exact number of bytes [`Message::encode_to`] writes.
    ///
    /// Encoding asks for the length of every embedded message before writing
    /// it, so a message nested `n` levels deep is sized `n` times. Deeply
    /// nested types may want to cache the result.
    fn encoded_len(&self) -> usize;

    /// Merge `other` into `self`.
    fn merge(&mut self, other: Self);

    /// Encode into a freshly allocated buffer of exactly the right size.
    fn encode(&self) -> Bytes {
        let mut marshaller = Marshaller::allocate(self.encoded_len());
        self.encode_to(&mut marshaller);
        marshaller.complete()
    }

    /// Decode a message from `buf` with [`DecodeOptions::default`].
    fn decode(buf: impl Into<Bytes>) -> Result<Self, DecodeError> {
        Self::decode_with_options(buf, &DecodeOptions::default())
    }

    fn decode_with_options(
        buf: impl Into<Bytes>,
        options: &DecodeOptions,
    ) -> Result<Self, DecodeError> {
        let mut unmarshaller = Unmarshaller::with_options(buf, options);
        Self::decode_from(&mut unmarshaller).inspect_err(|err| {
            tracing::debug!(
                message = std::any::type_name::<Self>(),
                position = unmarshaller.position(),
                %err,
                "failed to decode message",
            );
        })
    }
}

/// A protobuf enum, carried on the wire as its `int32` number.
///
/// Open enums keep numbers they do not recognize, typically in an
/// `Unrecognized(i32)` variant, so they survive a round trip.
pub trait ProtoEnum: Sized + Default {
    /// The number written to the wire.
    fn value(&self) -> i32;

    fn from_value(value: i32) -> Self;
}

/// A protobuf `oneof`, at most one of whose fields is set.
///
/// Implementors are enums with a unit variant for the unset state, which is
/// also their [`Default`]. The oneof has no wire representation of its own,
/// each variant is written as a regular field with its own tag.
pub trait Oneof: Sized + Default {
    /// Returns `true` when no variant is set.
    fn is_not_set(&self) -> bool;

    /// Decode the variant for `tag`.
    ///
    /// Returns `Ok(None)` when `tag` is not one of this oneof's fields.
    fn read_variant(tag: u32, unmarshaller: &mut Unmarshaller) -> Result<Option<Self>, DecodeError>;

    /// Write the active variant, tag included. Writes nothing when unset.
    fn write_variant(&self, marshaller: &mut Marshaller);

    /// Encoded size of the active variant, tag included.
    fn variant_len(&self) -> usize;

    /// Merge `other` into `self`. A set variant in `other` replaces ours.
    fn merge_variant(&mut self, other: Self) {
        if !other.is_not_set() {
            *self = other;
        }
    }
}

/// Decode `tag` into `dst` if it belongs to the oneof, replacing whatever
/// variant was set. Returns `false` when the tag is not a member.
#[inline]
pub fn read_oneof_field<T: Oneof>(
    dst: &mut T,
    tag: u32,
    unmarshaller: &mut Unmarshaller,
) -> Result<bool, DecodeError> {
    match T::read_variant(tag, unmarshaller)? {
        Some(value) => {
            *dst = value;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// The synthetic message for one entry of a map field, with the key in field
/// 1 and the value in field 2.
pub trait MapEntry: Message {
    type Key;
    type Value;

    fn from_parts(key: Self::Key, value: Self::Value) -> Self;

    fn into_parts(self) -> (Self::Key, Self::Value);

    /// Encoded size of an entry holding `key` and `value`, without its tag or
    /// length prefix.
    fn entry_len(key: &Self::Key, value: &Self::Value) -> usize;

    /// Write the fields of an entry holding `key` and `value`.
    fn write_entry(key: &Self::Key, value: &Self::Value, marshaller: &mut Marshaller);
}

/// Checks whether a value is its protobuf default and so is left off the wire.
///
/// This avoids building a temporary default value just to compare against.
pub trait IsProtoDefault {
    /// Returns true if this value is the protobuf default value.
    fn is_proto_default(&self) -> bool;
}

macro_rules! zero_is_default {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IsProtoDefault for $ty {
                #[inline(always)]
                fn is_proto_default(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

zero_is_default!(u32, u64, i32, i64);

// Bool - default is false
impl IsProtoDefault for bool {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        !*self
    }
}

// Floating point - default is 0.0, negative zero included.
impl IsProtoDefault for f32 {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        *self == 0.0
    }
}

impl IsProtoDefault for f64 {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        *self == 0.0
    }
}

impl IsProtoDefault for String {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        self.is_empty()
    }
}

impl IsProtoDefault for str {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        self.is_empty()
    }
}

impl IsProtoDefault for Bytes {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsProtoDefault for Vec<T> {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsProtoDefault for [T] {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        self.is_empty()
    }
}

// Proto2 `optional` fields track presence, so only `None` is omitted.
impl<T> IsProtoDefault for Option<T> {
    #[inline(always)]
    fn is_proto_default(&self) -> bool {
        self.is_none()
    }
}
