//! Fields present on the wire that a message's schema does not know about.
//!
//! They are kept so re-encoding a message is lossless. Each field number maps
//! to the values seen for it, in the order they were read. Re-encoding emits
//! them after the known fields, ordered by field number.

use std::collections::btree_map::{self, BTreeMap};

use bytes::Bytes;

use crate::sizer;
use crate::wire::WireType;

/// A single value of an unknown field, shaped by its wire type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnknownValue {
    Varint(u64),
    Fixed64(u64),
    Fixed32(u32),
    LengthDelimited(Bytes),
    /// Every occurrence of a field number that appeared more than once, in
    /// encounter order. Never nests.
    Composite(Vec<UnknownValue>),
}

impl UnknownValue {
    /// Wire type this value is written with, `None` for a [`UnknownValue::Composite`].
    pub fn wire_type(&self) -> Option<WireType> {
        match self {
            UnknownValue::Varint(_) => Some(WireType::Varint),
            UnknownValue::Fixed64(_) => Some(WireType::I64),
            UnknownValue::Fixed32(_) => Some(WireType::I32),
            UnknownValue::LengthDelimited(_) => Some(WireType::Len),
            UnknownValue::Composite(_) => None,
        }
    }

    /// Encoded size of the value(s), excluding tags.
    pub fn encoded_len(&self) -> usize {
        match self {
            UnknownValue::Varint(v) => sizer::uint64_size(*v),
            UnknownValue::Fixed64(v) => sizer::fixed64_size(*v),
            UnknownValue::Fixed32(v) => sizer::fixed32_size(*v),
            UnknownValue::LengthDelimited(b) => sizer::bytes_size(b),
            UnknownValue::Composite(values) => values.iter().map(Self::encoded_len).sum(),
        }
    }

    /// Number of tagged occurrences this value represents.
    pub fn occurrences(&self) -> usize {
        match self {
            UnknownValue::Composite(values) => values.len(),
            _ => 1,
        }
    }
}

/// An unknown field number together with everything read for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownField {
    pub field_number: u32,
    pub value: UnknownValue,
}

impl UnknownField {
    pub fn new(field_number: u32, value: UnknownValue) -> Self {
        UnknownField {
            field_number,
            value,
        }
    }

    /// Encoded size of this field, one tag per occurrence plus the values.
    pub fn encoded_len(&self) -> usize {
        sizer::tag_size(self.field_number) * self.value.occurrences() + self.value.encoded_len()
    }

    /// Record another occurrence, folding into a [`UnknownValue::Composite`].
    fn push(&mut self, value: UnknownValue) {
        if let UnknownValue::Composite(values) = &mut self.value {
            match value {
                UnknownValue::Composite(more) => values.extend(more),
                single => values.push(single),
            }
            return;
        }

        let first = std::mem::replace(&mut self.value, UnknownValue::Composite(Vec::new()));
        let mut values = vec![first];
        match value {
            UnknownValue::Composite(more) => values.extend(more),
            single => values.push(single),
        }
        self.value = UnknownValue::Composite(values);
    }
}

/// The unknown fields of one message, iterated in field number order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnknownFields {
    fields: BTreeMap<u32, UnknownField>,
}

impl UnknownFields {
    pub fn new() -> Self {
        UnknownFields::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of distinct field numbers.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field_number: u32) -> Option<&UnknownField> {
        self.fields.get(&field_number)
    }

    pub fn iter(&self) -> btree_map::Values<'_, u32, UnknownField> {
        self.fields.values()
    }

    /// Record `value` for `field_number`, after anything already recorded.
    pub fn add(&mut self, field_number: u32, value: UnknownValue) {
        match self.fields.entry(field_number) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(UnknownField::new(field_number, value));
            }
            btree_map::Entry::Occupied(mut entry) => entry.get_mut().push(value),
        }
    }

    /// Union with `other`. Occurrences from `other` go after ours.
    pub fn merge(&mut self, other: UnknownFields) {
        for (field_number, field) in other.fields {
            self.add(field_number, field.value);
        }
    }

    /// Encoded size of every field, tags included.
    pub fn encoded_len(&self) -> usize {
        self.iter().map(UnknownField::encoded_len).sum()
    }
}

impl<'a> IntoIterator for &'a UnknownFields {
    type Item = &'a UnknownField;
    type IntoIter = btree_map::Values<'a, u32, UnknownField>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
