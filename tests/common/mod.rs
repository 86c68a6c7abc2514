//! Message types written the way generated code drives the codec.
//!
//! ```proto
//! syntax = "proto3";
//!
//! message Item { string id = 1; }
//!
//! // A later revision of `Item`, used to produce fields `Item` does not know.
//! message ItemV2 {
//!   string id = 1;
//!   int32 count = 2;
//!   repeated string tags = 3;
//!   fixed64 stamp = 4;
//!   float ratio = 5;
//! }
//!
//! message Mappy { string id = 1; map<string, Item> things = 2; }
//!
//! enum Color { COLOR_UNSPECIFIED = 0; RED = 1; GREEN = 2; }
//!
//! message Scalars {
//!   double f_double = 1;    float f_float = 2;
//!   int32 f_int32 = 3;      int64 f_int64 = 4;
//!   uint32 f_uint32 = 5;    uint64 f_uint64 = 6;
//!   sint32 f_sint32 = 7;    sint64 f_sint64 = 8;
//!   fixed32 f_fixed32 = 9;  fixed64 f_fixed64 = 10;
//!   sfixed32 f_sfixed32 = 11; sfixed64 f_sfixed64 = 12;
//!   bool f_bool = 13;       string f_string = 14;
//!   bytes f_bytes = 15;     Color color = 16;
//!   Item item = 17;
//! }
//!
//! message Repeats {
//!   repeated int32 ints = 1;
//!   repeated sint64 sints = 2;
//!   repeated fixed32 fixeds = 3;
//!   repeated string names = 4;
//!   repeated Item items = 5;
//!   repeated Color colors = 6;
//! }
//!
//! message UnpackedRepeats { repeated int32 ints = 1 [packed = false]; }
//!
//! message OneOfTest {
//!   oneof oneof_field {
//!     uint32 oneof_uint32 = 111;
//!     string oneof_string = 113;
//!     bytes oneof_bytes = 114;
//!     bool oneof_bool = 115;
//!     uint64 oneof_uint64 = 116;
//!     float oneof_float = 117;
//!     double oneof_double = 118;
//!     Item oneof_item = 119;
//!   }
//! }
//! ```
//!
//! And in a `proto2` file:
//!
//! ```proto
//! message Legacy { optional int32 count = 1; optional string label = 2; }
//! ```

#![allow(dead_code)]

use std::collections::BTreeMap;

use pbcodec::{
    read_oneof_field, sizer, Bytes, DecodeError, IsProtoDefault, MapEntry, Marshaller, Message,
    Oneof, ProtoEnum, UnknownFields, Unmarshaller,
};

fn merge_message<M: Message>(dst: &mut Option<M>, src: Option<M>) {
    if let Some(src) = src {
        match dst {
            Some(dst) => dst.merge(src),
            None => *dst = Some(src),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub id: String,
    pub unknown_fields: UnknownFields,
}

impl Item {
    pub fn new(id: &str) -> Self {
        Item {
            id: id.to_string(),
            ..Default::default()
        }
    }
}

impl Message for Item {
    fn decode_from(u: &mut Unmarshaller) -> Result<Self, DecodeError> {
        let mut id = String::new();
        loop {
            match u.read_tag()? {
                0 => break,
                10 => id = u.read_string()?,
                _ => u.unknown_field()?,
            }
        }
        Ok(Item {
            id,
            unknown_fields: u.unknown_fields(),
        })
    }

    fn encode_to(&self, m: &mut Marshaller) {
        if !self.id.is_proto_default() {
            m.write_tag(10).write_string(&self.id);
        }
        m.write_unknown_fields(&self.unknown_fields);
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.id.is_proto_default() {
            len += sizer::tag_size(1) + sizer::string_size(&self.id);
        }
        len + sizer::unknown_fields_size(&self.unknown_fields)
    }

    fn merge(&mut self, other: Self) {
        if !other.id.is_proto_default() {
            self.id = other.id;
        }
        self.unknown_fields.merge(other.unknown_fields);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemV2 {
    pub id: String,
    pub count: i32,
    pub tags: Vec<String>,
    pub stamp: u64,
    pub ratio: f32,
    pub unknown_fields: UnknownFields,
}

impl Message for ItemV2 {
    fn decode_from(u: &mut Unmarshaller) -> Result<Self, DecodeError> {
        let mut msg = ItemV2::default();
        loop {
            match u.read_tag()? {
                0 => break,
                10 => msg.id = u.read_string()?,
                16 => msg.count = u.read_int32()?,
                26 => u.read_repeated(&mut msg.tags, true, |u| u.read_string())?,
                33 => msg.stamp = u.read_fixed64()?,
                45 => msg.ratio = u.read_float()?,
                _ => u.unknown_field()?,
            }
        }
        msg.unknown_fields = u.unknown_fields();
        Ok(msg)
    }

    fn encode_to(&self, m: &mut Marshaller) {
        if !self.id.is_proto_default() {
            m.write_tag(10).write_string(&self.id);
        }
        if !self.count.is_proto_default() {
            m.write_tag(16).write_int32(self.count);
        }
        for tag in &self.tags {
            m.write_tag(26).write_string(tag);
        }
        if !self.stamp.is_proto_default() {
            m.write_tag(33).write_fixed64(self.stamp);
        }
        if !self.ratio.is_proto_default() {
            m.write_tag(45).write_float(self.ratio);
        }
        m.write_unknown_fields(&self.unknown_fields);
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.id.is_proto_default() {
            len += sizer::tag_size(1) + sizer::string_size(&self.id);
        }
        if !self.count.is_proto_default() {
            len += sizer::tag_size(2) + sizer::int32_size(self.count);
        }
        len += self
            .tags
            .iter()
            .map(|tag| sizer::tag_size(3) + sizer::string_size(tag))
            .sum::<usize>();
        if !self.stamp.is_proto_default() {
            len += sizer::tag_size(4) + sizer::fixed64_size(self.stamp);
        }
        if !self.ratio.is_proto_default() {
            len += sizer::tag_size(5) + sizer::float_size(self.ratio);
        }
        len + sizer::unknown_fields_size(&self.unknown_fields)
    }

    fn merge(&mut self, other: Self) {
        if !other.id.is_proto_default() {
            self.id = other.id;
        }
        if !other.count.is_proto_default() {
            self.count = other.count;
        }
        self.tags.extend(other.tags);
        if !other.stamp.is_proto_default() {
            self.stamp = other.stamp;
        }
        if !other.ratio.is_proto_default() {
            self.ratio = other.ratio;
        }
        self.unknown_fields.merge(other.unknown_fields);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mappy {
    pub id: String,
    pub things: BTreeMap<String, Item>,
    pub unknown_fields: UnknownFields,
}

/// The synthetic entry message of `Mappy.things`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThingsEntry {
    pub key: String,
    pub value: Item,
    pub unknown_fields: UnknownFields,
}

impl MapEntry for ThingsEntry {
    type Key = String;
    type Value = Item;

    fn from_parts(key: String, value: Item) -> Self {
        ThingsEntry {
            key,
            value,
            unknown_fields: UnknownFields::new(),
        }
    }

    fn into_parts(self) -> (String, Item) {
        (self.key, self.value)
    }

    fn entry_len(key: &String, value: &Item) -> usize {
        let mut len = 0;
        if !key.is_proto_default() {
            len += sizer::tag_size(1) + sizer::string_size(key);
        }
        if *value != Item::default() {
            len += sizer::tag_size(2) + sizer::message_size(value);
        }
        len
    }

    fn write_entry(key: &String, value: &Item, m: &mut Marshaller) {
        if !key.is_proto_default() {
            m.write_tag(10).write_string(key);
        }
        if *value != Item::default() {
            m.write_tag(18).write_message(value);
        }
    }
}

impl Message for ThingsEntry {
    fn decode_from(u: &mut Unmarshaller) -> Result<Self, DecodeError> {
        let mut entry = ThingsEntry::default();
        loop {
            match u.read_tag()? {
                0 => break,
                10 => entry.key = u.read_string()?,
                18 => entry.value = u.read_message()?,
                _ => u.unknown_field()?,
            }
        }
        entry.unknown_fields = u.unknown_fields();
        Ok(entry)
    }

    fn encode_to(&self, m: &mut Marshaller) {
        ThingsEntry::write_entry(&self.key, &self.value, m);
        m.write_unknown_fields(&self.unknown_fields);
    }

    fn encoded_len(&self) -> usize {
        ThingsEntry::entry_len(&self.key, &self.value)
            + sizer::unknown_fields_size(&self.unknown_fields)
    }

    fn merge(&mut self, other: Self) {
        if !other.key.is_proto_default() {
            self.key = other.key;
        }
        self.value.merge(other.value);
        self.unknown_fields.merge(other.unknown_fields);
    }
}

impl Message for Mappy {
    fn decode_from(u: &mut Unmarshaller) -> Result<Self, DecodeError> {
        let mut msg = Mappy::default();
        loop {
            match u.read_tag()? {
                0 => break,
                10 => msg.id = u.read_string()?,
                18 => u.read_map::<ThingsEntry, _>(&mut msg.things, true)?,
                _ => u.unknown_field()?,
            }
        }
        msg.unknown_fields = u.unknown_fields();
        Ok(msg)
    }

    fn encode_to(&self, m: &mut Marshaller) {
        if !self.id.is_proto_default() {
            m.write_tag(10).write_string(&self.id);
        }
        if !self.things.is_empty() {
            m.write_map::<ThingsEntry, _>(18, &self.things);
        }
        m.write_unknown_fields(&self.unknown_fields);
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.id.is_proto_default() {
            len += sizer::tag_size(1) + sizer::string_size(&self.id);
        }
        if !self.things.is_empty() {
            len += sizer::map_size::<ThingsEntry, _>(2, &self.things);
        }
        len + sizer::unknown_fields_size(&self.unknown_fields)
    }

    fn merge(&mut self, other: Self) {
        if !other.id.is_proto_default() {
            self.id = other.id;
        }
        self.things.extend(other.things);
        self.unknown_fields.merge(other.unknown_fields);
    }
}

/// An open enum, unknown numbers are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Color {
    #[default]
    Unspecified,
    Red,
    Green,
    Unrecognized(i32),
}

impl ProtoEnum for Color {
    fn value(&self) -> i32 {
        match self {
            Color::Unspecified => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Unrecognized(value) => *value,
        }
    }

    fn from_value(value: i32) -> Self {
        match value {
            0 => Color::Unspecified,
            1 => Color::Red,
            2 => Color::Green,
            other => Color::Unrecognized(other),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scalars {
    pub f_double: f64,
    pub f_float: f32,
    pub f_int32: i32,
    pub f_int64: i64,
    pub f_uint32: u32,
    pub f_uint64: u64,
    pub f_sint32: i32,
    pub f_sint64: i64,
    pub f_fixed32: u32,
    pub f_fixed64: u64,
    pub f_sfixed32: i32,
    pub f_sfixed64: i64,
    pub f_bool: bool,
    pub f_string: String,
    pub f_bytes: Bytes,
    pub color: Color,
    pub item: Option<Item>,
    pub unknown_fields: UnknownFields,
}

impl Message for Scalars {
    fn decode_from(u: &mut Unmarshaller) -> Result<Self, DecodeError> {
        let mut msg = Scalars::default();
        loop {
            match u.read_tag()? {
                0 => break,
                9 => msg.f_double = u.read_double()?,
                21 => msg.f_float = u.read_float()?,
                24 => msg.f_int32 = u.read_int32()?,
                32 => msg.f_int64 = u.read_int64()?,
                40 => msg.f_uint32 = u.read_uint32()?,
                48 => msg.f_uint64 = u.read_uint64()?,
                56 => msg.f_sint32 = u.read_sint32()?,
                64 => msg.f_sint64 = u.read_sint64()?,
                77 => msg.f_fixed32 = u.read_fixed32()?,
                81 => msg.f_fixed64 = u.read_fixed64()?,
                93 => msg.f_sfixed32 = u.read_sfixed32()?,
                97 => msg.f_sfixed64 = u.read_sfixed64()?,
                104 => msg.f_bool = u.read_bool()?,
                114 => msg.f_string = u.read_string()?,
                122 => msg.f_bytes = u.read_bytes()?,
                128 => msg.color = u.read_enum()?,
                138 => {
                    let item: Item = u.read_message()?;
                    merge_message(&mut msg.item, Some(item));
                }
                _ => u.unknown_field()?,
            }
        }
        msg.unknown_fields = u.unknown_fields();
        Ok(msg)
    }

    fn encode_to(&self, m: &mut Marshaller) {
        if !self.f_double.is_proto_default() {
            m.write_tag(9).write_double(self.f_double);
        }
        if !self.f_float.is_proto_default() {
            m.write_tag(21).write_float(self.f_float);
        }
        if !self.f_int32.is_proto_default() {
            m.write_tag(24).write_int32(self.f_int32);
        }
        if !self.f_int64.is_proto_default() {
            m.write_tag(32).write_int64(self.f_int64);
        }
        if !self.f_uint32.is_proto_default() {
            m.write_tag(40).write_uint32(self.f_uint32);
        }
        if !self.f_uint64.is_proto_default() {
            m.write_tag(48).write_uint64(self.f_uint64);
        }
        if !self.f_sint32.is_proto_default() {
            m.write_tag(56).write_sint32(self.f_sint32);
        }
        if !self.f_sint64.is_proto_default() {
            m.write_tag(64).write_sint64(self.f_sint64);
        }
        if !self.f_fixed32.is_proto_default() {
            m.write_tag(77).write_fixed32(self.f_fixed32);
        }
        if !self.f_fixed64.is_proto_default() {
            m.write_tag(81).write_fixed64(self.f_fixed64);
        }
        if !self.f_sfixed32.is_proto_default() {
            m.write_tag(93).write_sfixed32(self.f_sfixed32);
        }
        if !self.f_sfixed64.is_proto_default() {
            m.write_tag(97).write_sfixed64(self.f_sfixed64);
        }
        if !self.f_bool.is_proto_default() {
            m.write_tag(104).write_bool(self.f_bool);
        }
        if !self.f_string.is_proto_default() {
            m.write_tag(114).write_string(&self.f_string);
        }
        if !self.f_bytes.is_proto_default() {
            m.write_tag(122).write_bytes(&self.f_bytes);
        }
        if self.color.value() != 0 {
            m.write_tag(128).write_enum(&self.color);
        }
        if let Some(item) = &self.item {
            m.write_tag(138).write_message(item);
        }
        m.write_unknown_fields(&self.unknown_fields);
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.f_double.is_proto_default() {
            len += sizer::tag_size(1) + sizer::double_size(self.f_double);
        }
        if !self.f_float.is_proto_default() {
            len += sizer::tag_size(2) + sizer::float_size(self.f_float);
        }
        if !self.f_int32.is_proto_default() {
            len += sizer::tag_size(3) + sizer::int32_size(self.f_int32);
        }
        if !self.f_int64.is_proto_default() {
            len += sizer::tag_size(4) + sizer::int64_size(self.f_int64);
        }
        if !self.f_uint32.is_proto_default() {
            len += sizer::tag_size(5) + sizer::uint32_size(self.f_uint32);
        }
        if !self.f_uint64.is_proto_default() {
            len += sizer::tag_size(6) + sizer::uint64_size(self.f_uint64);
        }
        if !self.f_sint32.is_proto_default() {
            len += sizer::tag_size(7) + sizer::sint32_size(self.f_sint32);
        }
        if !self.f_sint64.is_proto_default() {
            len += sizer::tag_size(8) + sizer::sint64_size(self.f_sint64);
        }
        if !self.f_fixed32.is_proto_default() {
            len += sizer::tag_size(9) + sizer::fixed32_size(self.f_fixed32);
        }
        if !self.f_fixed64.is_proto_default() {
            len += sizer::tag_size(10) + sizer::fixed64_size(self.f_fixed64);
        }
        if !self.f_sfixed32.is_proto_default() {
            len += sizer::tag_size(11) + sizer::sfixed32_size(self.f_sfixed32);
        }
        if !self.f_sfixed64.is_proto_default() {
            len += sizer::tag_size(12) + sizer::sfixed64_size(self.f_sfixed64);
        }
        if !self.f_bool.is_proto_default() {
            len += sizer::tag_size(13) + sizer::bool_size(self.f_bool);
        }
        if !self.f_string.is_proto_default() {
            len += sizer::tag_size(14) + sizer::string_size(&self.f_string);
        }
        if !self.f_bytes.is_proto_default() {
            len += sizer::tag_size(15) + sizer::bytes_size(&self.f_bytes);
        }
        if self.color.value() != 0 {
            len += sizer::tag_size(16) + sizer::enum_size(&self.color);
        }
        if let Some(item) = &self.item {
            len += sizer::tag_size(17) + sizer::message_size(item);
        }
        len + sizer::unknown_fields_size(&self.unknown_fields)
    }

    fn merge(&mut self, other: Self) {
        if !other.f_double.is_proto_default() {
            self.f_double = other.f_double;
        }
        if !other.f_float.is_proto_default() {
            self.f_float = other.f_float;
        }
        if !other.f_int32.is_proto_default() {
            self.f_int32 = other.f_int32;
        }
        if !other.f_int64.is_proto_default() {
            self.f_int64 = other.f_int64;
        }
        if !other.f_uint32.is_proto_default() {
            self.f_uint32 = other.f_uint32;
        }
        if !other.f_uint64.is_proto_default() {
            self.f_uint64 = other.f_uint64;
        }
        if !other.f_sint32.is_proto_default() {
            self.f_sint32 = other.f_sint32;
        }
        if !other.f_sint64.is_proto_default() {
            self.f_sint64 = other.f_sint64;
        }
        if !other.f_fixed32.is_proto_default() {
            self.f_fixed32 = other.f_fixed32;
        }
        if !other.f_fixed64.is_proto_default() {
            self.f_fixed64 = other.f_fixed64;
        }
        if !other.f_sfixed32.is_proto_default() {
            self.f_sfixed32 = other.f_sfixed32;
        }
        if !other.f_sfixed64.is_proto_default() {
            self.f_sfixed64 = other.f_sfixed64;
        }
        if !other.f_bool.is_proto_default() {
            self.f_bool = other.f_bool;
        }
        if !other.f_string.is_proto_default() {
            self.f_string = other.f_string;
        }
        if !other.f_bytes.is_proto_default() {
            self.f_bytes = other.f_bytes;
        }
        if other.color.value() != 0 {
            self.color = other.color;
        }
        merge_message(&mut self.item, other.item);
        self.unknown_fields.merge(other.unknown_fields);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Repeats {
    pub ints: Vec<i32>,
    pub sints: Vec<i64>,
    pub fixeds: Vec<u32>,
    pub names: Vec<String>,
    pub items: Vec<Item>,
    pub colors: Vec<Color>,
    pub unknown_fields: UnknownFields,
}

impl Message for Repeats {
    fn decode_from(u: &mut Unmarshaller) -> Result<Self, DecodeError> {
        let mut msg = Repeats::default();
        loop {
            match u.read_tag()? {
                0 => break,
                8 | 10 => u.read_repeated(&mut msg.ints, false, |u| u.read_int32())?,
                16 | 18 => u.read_repeated(&mut msg.sints, false, |u| u.read_sint64())?,
                29 | 26 => u.read_repeated(&mut msg.fixeds, false, |u| u.read_fixed32())?,
                34 => u.read_repeated(&mut msg.names, true, |u| u.read_string())?,
                42 => u.read_repeated_message(&mut msg.items)?,
                48 | 50 => u.read_repeated_enum(&mut msg.colors)?,
                _ => u.unknown_field()?,
            }
        }
        msg.unknown_fields = u.unknown_fields();
        Ok(msg)
    }

    fn encode_to(&self, m: &mut Marshaller) {
        if !self.ints.is_empty() {
            m.write_tag(10).write_packed_repeated(
                &self.ints,
                |v| sizer::int32_size(*v),
                |m, v| {
                    m.write_int32(*v);
                },
            );
        }
        if !self.sints.is_empty() {
            m.write_tag(18).write_packed_repeated(
                &self.sints,
                |v| sizer::sint64_size(*v),
                |m, v| {
                    m.write_sint64(*v);
                },
            );
        }
        if !self.fixeds.is_empty() {
            m.write_tag(26).write_packed_repeated(
                &self.fixeds,
                |v| sizer::fixed32_size(*v),
                |m, v| {
                    m.write_fixed32(*v);
                },
            );
        }
        for name in &self.names {
            m.write_tag(34).write_string(name);
        }
        for item in &self.items {
            m.write_tag(42).write_message(item);
        }
        if !self.colors.is_empty() {
            m.write_tag(50).write_packed_repeated(&self.colors, sizer::enum_size, |m, v| {
                m.write_enum(v);
            });
        }
        m.write_unknown_fields(&self.unknown_fields);
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.ints.is_empty() {
            len += sizer::tag_size(1)
                + sizer::packed_repeated_size(&self.ints, |v| sizer::int32_size(*v));
        }
        if !self.sints.is_empty() {
            len += sizer::tag_size(2)
                + sizer::packed_repeated_size(&self.sints, |v| sizer::sint64_size(*v));
        }
        if !self.fixeds.is_empty() {
            len += sizer::tag_size(3)
                + sizer::packed_repeated_size(&self.fixeds, |v| sizer::fixed32_size(*v));
        }
        len += self
            .names
            .iter()
            .map(|name| sizer::tag_size(4) + sizer::string_size(name))
            .sum::<usize>();
        len += self
            .items
            .iter()
            .map(|item| sizer::tag_size(5) + sizer::message_size(item))
            .sum::<usize>();
        if !self.colors.is_empty() {
            len += sizer::tag_size(6) + sizer::packed_repeated_size(&self.colors, sizer::enum_size);
        }
        len + sizer::unknown_fields_size(&self.unknown_fields)
    }

    fn merge(&mut self, other: Self) {
        self.ints.extend(other.ints);
        self.sints.extend(other.sints);
        self.fixeds.extend(other.fixeds);
        self.names.extend(other.names);
        self.items.extend(other.items);
        self.colors.extend(other.colors);
        self.unknown_fields.merge(other.unknown_fields);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnpackedRepeats {
    pub ints: Vec<i32>,
    pub unknown_fields: UnknownFields,
}

impl Message for UnpackedRepeats {
    fn decode_from(u: &mut Unmarshaller) -> Result<Self, DecodeError> {
        let mut msg = UnpackedRepeats::default();
        loop {
            match u.read_tag()? {
                0 => break,
                8 | 10 => u.read_repeated(&mut msg.ints, false, |u| u.read_int32())?,
                _ => u.unknown_field()?,
            }
        }
        msg.unknown_fields = u.unknown_fields();
        Ok(msg)
    }

    fn encode_to(&self, m: &mut Marshaller) {
        for value in &self.ints {
            m.write_tag(8).write_int32(*value);
        }
        m.write_unknown_fields(&self.unknown_fields);
    }

    fn encoded_len(&self) -> usize {
        let len: usize = self
            .ints
            .iter()
            .map(|v| sizer::tag_size(1) + sizer::int32_size(*v))
            .sum();
        len + sizer::unknown_fields_size(&self.unknown_fields)
    }

    fn merge(&mut self, other: Self) {
        self.ints.extend(other.ints);
        self.unknown_fields.merge(other.unknown_fields);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum OneofField {
    #[default]
    NotSet,
    Uint32(u32),
    String(String),
    Bytes(Bytes),
    Bool(bool),
    Uint64(u64),
    Float(f32),
    Double(f64),
    Item(Item),
}

impl Oneof for OneofField {
    fn is_not_set(&self) -> bool {
        matches!(self, OneofField::NotSet)
    }

    fn read_variant(tag: u32, u: &mut Unmarshaller) -> Result<Option<Self>, DecodeError> {
        let value = match tag {
            888 => OneofField::Uint32(u.read_uint32()?),
            906 => OneofField::String(u.read_string()?),
            914 => OneofField::Bytes(u.read_bytes()?),
            920 => OneofField::Bool(u.read_bool()?),
            928 => OneofField::Uint64(u.read_uint64()?),
            941 => OneofField::Float(u.read_float()?),
            945 => OneofField::Double(u.read_double()?),
            954 => OneofField::Item(u.read_message()?),
            _ => return Ok(None),
        };
        Ok(Some(value))
    }

    fn write_variant(&self, m: &mut Marshaller) {
        match self {
            OneofField::NotSet => {}
            OneofField::Uint32(v) => {
                m.write_tag(888).write_uint32(*v);
            }
            OneofField::String(v) => {
                m.write_tag(906).write_string(v);
            }
            OneofField::Bytes(v) => {
                m.write_tag(914).write_bytes(v);
            }
            OneofField::Bool(v) => {
                m.write_tag(920).write_bool(*v);
            }
            OneofField::Uint64(v) => {
                m.write_tag(928).write_uint64(*v);
            }
            OneofField::Float(v) => {
                m.write_tag(941).write_float(*v);
            }
            OneofField::Double(v) => {
                m.write_tag(945).write_double(*v);
            }
            OneofField::Item(v) => {
                m.write_tag(954).write_message(v);
            }
        }
    }

    fn variant_len(&self) -> usize {
        match self {
            OneofField::NotSet => 0,
            OneofField::Uint32(v) => sizer::tag_size(111) + sizer::uint32_size(*v),
            OneofField::String(v) => sizer::tag_size(113) + sizer::string_size(v),
            OneofField::Bytes(v) => sizer::tag_size(114) + sizer::bytes_size(v),
            OneofField::Bool(v) => sizer::tag_size(115) + sizer::bool_size(*v),
            OneofField::Uint64(v) => sizer::tag_size(116) + sizer::uint64_size(*v),
            OneofField::Float(v) => sizer::tag_size(117) + sizer::float_size(*v),
            OneofField::Double(v) => sizer::tag_size(118) + sizer::double_size(*v),
            OneofField::Item(v) => sizer::tag_size(119) + sizer::message_size(v),
        }
    }

    fn merge_variant(&mut self, other: Self) {
        match (self, other) {
            (OneofField::Item(dst), OneofField::Item(src)) => dst.merge(src),
            (_, OneofField::NotSet) => {}
            (dst, src) => *dst = src,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneOfTest {
    pub oneof_field: OneofField,
    pub unknown_fields: UnknownFields,
}

impl Message for OneOfTest {
    fn decode_from(u: &mut Unmarshaller) -> Result<Self, DecodeError> {
        let mut msg = OneOfTest::default();
        loop {
            match u.read_tag()? {
                0 => break,
                tag => {
                    if !read_oneof_field(&mut msg.oneof_field, tag, u)? {
                        u.unknown_field()?;
                    }
                }
            }
        }
        msg.unknown_fields = u.unknown_fields();
        Ok(msg)
    }

    fn encode_to(&self, m: &mut Marshaller) {
        m.write_oneof(&self.oneof_field);
        m.write_unknown_fields(&self.unknown_fields);
    }

    fn encoded_len(&self) -> usize {
        self.oneof_field.variant_len() + sizer::unknown_fields_size(&self.unknown_fields)
    }

    fn merge(&mut self, other: Self) {
        self.oneof_field.merge_variant(other.oneof_field);
        self.unknown_fields.merge(other.unknown_fields);
    }
}

/// A `proto2` message, `optional` fields track presence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legacy {
    pub count: Option<i32>,
    pub label: Option<String>,
    pub unknown_fields: UnknownFields,
}

impl Message for Legacy {
    fn decode_from(u: &mut Unmarshaller) -> Result<Self, DecodeError> {
        let mut msg = Legacy::default();
        loop {
            match u.read_tag()? {
                0 => break,
                8 => msg.count = Some(u.read_int32()?),
                18 => msg.label = Some(u.read_string()?),
                _ => u.unknown_field()?,
            }
        }
        msg.unknown_fields = u.unknown_fields();
        Ok(msg)
    }

    fn encode_to(&self, m: &mut Marshaller) {
        if let Some(count) = self.count {
            m.write_tag(8).write_int32(count);
        }
        if let Some(label) = &self.label {
            m.write_tag(18).write_string(label);
        }
        m.write_unknown_fields(&self.unknown_fields);
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if let Some(count) = self.count {
            len += sizer::tag_size(1) + sizer::int32_size(count);
        }
        if let Some(label) = &self.label {
            len += sizer::tag_size(2) + sizer::string_size(label);
        }
        len + sizer::unknown_fields_size(&self.unknown_fields)
    }

    fn merge(&mut self, other: Self) {
        if other.count.is_some() {
            self.count = other.count;
        }
        if other.label.is_some() {
            self.label = other.label;
        }
        self.unknown_fields.merge(other.unknown_fields);
    }
}
