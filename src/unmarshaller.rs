//! Typed read façade used by message decode routines.

use bytes::Bytes;

use crate::error::DecodeError;
use crate::message::{MapEntry, Message, ProtoEnum};
use crate::options::DecodeOptions;
use crate::reader::ByteReader;
use crate::unknown::{UnknownFields, UnknownValue};
use crate::util::unlikely;
use crate::wire::{tag_field_number, tag_wire_type, WireType, TAG_TYPE_MASK};

/// Reads message fields, framing nested messages and collecting unknown
/// fields along the way.
///
/// A decode routine calls [`Unmarshaller::read_tag`] in a loop until it
/// returns `0`. Each unknown field is collected for the message currently
/// being decoded. The collector is swapped out around every nested message,
/// so inner unknown fields never leak into the outer message.
#[derive(Debug)]
pub struct Unmarshaller {
    reader: ByteReader,
    /// `None` when unknown fields are discarded.
    unknown: Option<UnknownFields>,
}

macro_rules! forward_reads {
    ($($(#[$meta:meta])* $name:ident -> $ty:ty;)*) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name(&mut self) -> Result<$ty, DecodeError> {
                self.reader.$name()
            }
        )*
    };
}

impl Unmarshaller {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self::with_options(buf, &DecodeOptions::default())
    }

    pub fn with_options(buf: impl Into<Bytes>, options: &DecodeOptions) -> Self {
        Unmarshaller {
            reader: ByteReader::with_options(buf, options),
            unknown: (!options.discard_unknown_fields).then(UnknownFields::new),
        }
    }

    /// Absolute offset of the next byte to be read.
    #[inline]
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    #[inline]
    pub fn last_tag(&self) -> u32 {
        self.reader.last_tag()
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.reader.is_at_end()
    }

    /// Whether unknown fields are skipped instead of collected.
    #[inline]
    pub fn discards_unknown_fields(&self) -> bool {
        self.unknown.is_none()
    }

    /// Read the next tag, `0` at the end of the current message.
    #[inline]
    pub fn read_tag(&mut self) -> Result<u32, DecodeError> {
        self.reader.read_tag()
    }

    forward_reads! {
        read_double -> f64;
        read_float -> f32;
        read_int32 -> i32;
        read_int64 -> i64;
        read_uint32 -> u32;
        read_uint64 -> u64;
        read_sint32 -> i32;
        read_sint64 -> i64;
        read_fixed32 -> u32;
        read_fixed64 -> u64;
        read_sfixed32 -> i32;
        read_sfixed64 -> i64;
        read_bool -> bool;
        read_string -> String;
        /// The returned [`Bytes`] shares the input buffer.
        read_bytes -> Bytes;
    }

    #[inline]
    pub fn read_enum<E: ProtoEnum>(&mut self) -> Result<E, DecodeError> {
        Ok(E::from_value(self.reader.read_enum()?))
    }

    /// Read an embedded message.
    ///
    /// The message must consume exactly the number of bytes its length
    /// prefix declares. Counts against the same recursion limit as skipped
    /// groups.
    pub fn read_message<M: Message>(&mut self) -> Result<M, DecodeError> {
        let len = self.reader.read_length()?;
        self.reader.enter_nested()?;
        let old_limit = self.reader.push_limit(len)?;

        let outer_unknown = self.unknown.as_mut().map(std::mem::take);
        let result = M::decode_from(self);
        if outer_unknown.is_some() {
            self.unknown = outer_unknown;
        }
        self.reader.exit_nested();

        let message = result?;
        if unlikely(!self.reader.is_at_end()) {
            return Err(DecodeError::truncated_message());
        }
        self.reader.pop_limit(old_limit);
        Ok(message)
    }

    /// Append one or more elements of a repeated field to `list`.
    ///
    /// When the last tag was length-delimited and the field can be packed,
    /// the value is a packed run and every element in it is read. Otherwise
    /// a single element is read. Generated code routes both the packed and
    /// the per-element tag of a field here, so either encoding is accepted.
    pub fn read_repeated<T>(
        &mut self,
        list: &mut Vec<T>,
        never_packed: bool,
        mut read_fn: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<(), DecodeError> {
        if never_packed || !self.last_tag_is_length_delimited() {
            list.push(read_fn(self)?);
            return Ok(());
        }

        let len = self.reader.read_length()?;
        let old_limit = self.reader.push_limit(len)?;
        while !self.reader.is_at_end() {
            list.push(read_fn(self)?);
        }
        self.reader.pop_limit(old_limit);
        Ok(())
    }

    /// [`Unmarshaller::read_repeated`] for a repeated enum field.
    pub fn read_repeated_enum<E: ProtoEnum>(&mut self, list: &mut Vec<E>) -> Result<(), DecodeError> {
        self.read_repeated(list, false, |u| u.read_enum())
    }

    /// Append one element of a repeated message field to `list`.
    pub fn read_repeated_message<M: Message>(&mut self, list: &mut Vec<M>) -> Result<(), DecodeError> {
        self.read_repeated(list, true, |u| u.read_message())
    }

    /// Read map entries into `map`. A later entry for a key overwrites an
    /// earlier one.
    pub fn read_map<E, M>(&mut self, map: &mut M, never_packed: bool) -> Result<(), DecodeError>
    where
        E: MapEntry,
        M: Extend<(E::Key, E::Value)>,
    {
        if never_packed || !self.last_tag_is_length_delimited() {
            let entry: E = self.read_message()?;
            map.extend(std::iter::once(entry.into_parts()));
            return Ok(());
        }

        let len = self.reader.read_length()?;
        let old_limit = self.reader.push_limit(len)?;
        while !self.reader.is_at_end() {
            let entry: E = self.read_message()?;
            map.extend(std::iter::once(entry.into_parts()));
        }
        self.reader.pop_limit(old_limit);
        Ok(())
    }

    /// Capture the value of the last tag read as an unknown field, or skip
    /// it when unknown fields are discarded.
    ///
    /// Deprecated groups are always skipped. A stray end-group tag is an
    /// error.
    pub fn unknown_field(&mut self) -> Result<(), DecodeError> {
        let tag = self.reader.last_tag();
        let field_number = tag_field_number(tag);
        let wire_type = tag_wire_type(tag)?;

        if self.unknown.is_none() {
            tracing::trace!(field_number, ?wire_type, "discarding unknown field");
            return self.skip_unknown(tag);
        }

        let value = match wire_type {
            WireType::Varint => UnknownValue::Varint(self.reader.read_uint64()?),
            WireType::I64 => UnknownValue::Fixed64(self.reader.read_fixed64()?),
            WireType::Len => UnknownValue::LengthDelimited(self.reader.read_bytes()?),
            WireType::I32 => UnknownValue::Fixed32(self.reader.read_fixed32()?),
            WireType::SGroup | WireType::EGroup => return self.skip_unknown(tag),
        };

        tracing::trace!(field_number, ?wire_type, "retaining unknown field");
        if let Some(unknown) = self.unknown.as_mut() {
            unknown.add(field_number, value);
        }
        Ok(())
    }

    /// Hand the unknown fields collected for the current message to the
    /// message being built, leaving an empty collector behind.
    pub fn unknown_fields(&mut self) -> UnknownFields {
        self.unknown
            .as_mut()
            .map(std::mem::take)
            .unwrap_or_default()
    }

    fn skip_unknown(&mut self, tag: u32) -> Result<(), DecodeError> {
        if !self.reader.skip_field(tag)? {
            // An end-group tag with no matching start.
            return Err(DecodeError::invalid_end_tag());
        }
        Ok(())
    }

    #[inline]
    fn last_tag_is_length_delimited(&self) -> bool {
        self.reader.last_tag() & TAG_TYPE_MASK == u32::from(WireType::Len.into_val())
    }
}
