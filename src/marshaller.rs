//! Typed write façade used by message encode routines.

use bytes::Bytes;

use crate::message::{MapEntry, Message, Oneof, ProtoEnum};
use crate::sizer;
use crate::unknown::{UnknownFields, UnknownValue};
use crate::wire::WireType;
use crate::writer::ByteWriter;

/// Writes message fields into an exactly sized buffer.
///
/// Scalar writes emit the value only, callers write the tag first. Every
/// write returns `&mut Self` so a tag and its value can be chained:
///
/// ```
/// use pbcodec::Marshaller;
///
/// let mut marshaller = Marshaller::allocate(3);
/// marshaller.write_tag(10).write_string("x");
/// assert_eq!(&marshaller.complete()[..], [0x0A, 0x01, 0x78]);
/// ```
#[derive(Debug)]
pub struct Marshaller {
    writer: ByteWriter,
}

macro_rules! forward_writes {
    ($($(#[$meta:meta])* $name:ident($ty:ty);)*) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name(&mut self, value: $ty) -> &mut Self {
                self.writer.$name(value);
                self
            }
        )*
    };
}

impl Marshaller {
    /// Create a marshaller over a buffer of exactly `size` bytes.
    pub fn allocate(size: usize) -> Self {
        Marshaller {
            writer: ByteWriter::allocate(size),
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.writer.position()
    }

    #[inline]
    pub fn space_left(&self) -> usize {
        self.writer.space_left()
    }

    /// Write a pre-composed tag.
    #[inline]
    pub fn write_tag(&mut self, tag: u32) -> &mut Self {
        self.writer.write_tag(tag);
        self
    }

    /// Write the tag `(field_number << 3) | wire_type`.
    #[inline]
    pub fn write_field_tag(&mut self, field_number: u32, wire_type: WireType) -> &mut Self {
        self.writer.write_field_tag(field_number, wire_type);
        self
    }

    forward_writes! {
        write_double(f64);
        write_float(f32);
        /// Negative values take ten bytes.
        write_int32(i32);
        write_int64(i64);
        write_uint32(u32);
        write_uint64(u64);
        write_sint32(i32);
        write_sint64(i64);
        write_fixed32(u32);
        write_fixed64(u64);
        write_sfixed32(i32);
        write_sfixed64(i64);
        write_bool(bool);
        write_string(&str);
        write_bytes(&[u8]);
    }

    #[inline]
    pub fn write_enum<E: ProtoEnum>(&mut self, value: &E) -> &mut Self {
        self.writer.write_enum(value.value());
        self
    }

    /// Write an embedded message, its length then its fields.
    pub fn write_message<M: Message>(&mut self, value: &M) -> &mut Self {
        self.writer.write_length(value.encoded_len());
        value.encode_to(self);
        self
    }

    /// Write the active variant of a oneof, if any.
    #[inline]
    pub fn write_oneof<T: Oneof>(&mut self, value: &T) -> &mut Self {
        value.write_variant(self);
        self
    }

    /// Write a map field, one tagged entry message per element.
    pub fn write_map<'a, E, I>(&mut self, tag: u32, entries: I) -> &mut Self
    where
        E: MapEntry,
        E::Key: 'a,
        E::Value: 'a,
        I: IntoIterator<Item = (&'a E::Key, &'a E::Value)>,
    {
        for (key, value) in entries {
            self.write_tag(tag);
            self.writer.write_length(E::entry_len(key, value));
            E::write_entry(key, value, self);
        }
        self
    }

    /// Write a packed run, its length then every element back to back.
    ///
    /// The caller writes the field's length-delimited tag first. `size_fn`
    /// must agree with what `write_fn` writes.
    pub fn write_packed_repeated<T>(
        &mut self,
        list: &[T],
        size_fn: impl Fn(&T) -> usize,
        mut write_fn: impl FnMut(&mut Self, &T),
    ) -> &mut Self {
        self.writer
            .write_length(sizer::packed_payload_size(list, size_fn));
        for item in list {
            write_fn(self, item);
        }
        self
    }

    /// Write retained unknown fields, ordered by field number.
    pub fn write_unknown_fields(&mut self, fields: &UnknownFields) -> &mut Self {
        for field in fields {
            self.write_unknown_value(field.field_number, &field.value);
        }
        self
    }

    fn write_unknown_value(&mut self, field_number: u32, value: &UnknownValue) {
        match value {
            UnknownValue::Varint(v) => {
                self.write_field_tag(field_number, WireType::Varint)
                    .write_uint64(*v);
            }
            UnknownValue::Fixed64(v) => {
                self.write_field_tag(field_number, WireType::I64)
                    .write_fixed64(*v);
            }
            UnknownValue::Fixed32(v) => {
                self.write_field_tag(field_number, WireType::I32)
                    .write_fixed32(*v);
            }
            UnknownValue::LengthDelimited(b) => {
                self.write_field_tag(field_number, WireType::Len)
                    .write_bytes(b);
            }
            UnknownValue::Composite(values) => {
                for value in values {
                    self.write_unknown_value(field_number, value);
                }
            }
        }
    }

    /// Finish writing, returning the encoded bytes.
    pub fn complete(self) -> Bytes {
        self.writer.complete()
    }
}
