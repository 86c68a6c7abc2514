//! Errors produced while decoding protobuf wire data.
//!
//! Every decode fault is fatal to the call that hit it: there is no partial
//! result and no local recovery. Encode-time faults are not represented here,
//! an undersized output buffer is a programming error and panics.

use thiserror::Error;

/// The reason a decode failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// A tag whose field number is zero.
    #[error("protocol message contained an invalid tag (zero)")]
    InvalidTag,
    /// A varint whose 10th byte still carries the continuation bit.
    #[error("malformed varint")]
    MalformedVarint,
    /// A length-delimited field that declared a negative length.
    #[error("length-delimited field claimed to have negative size")]
    NegativeSize,
    /// The input ended early, a nested message misreported its length, or a
    /// pushed limit exceeded its parent's.
    #[error(
        "input ended unexpectedly in the middle of a field, or an embedded message \
         misreported its own length"
    )]
    TruncatedMessage,
    /// The message is larger than the configured size ceiling.
    #[error("protocol message was too large (limit {limit} bytes)")]
    SizeLimitExceeded { limit: usize },
    /// The low three bits of a tag were 6 or 7.
    #[error("invalid 'wire type' value: {value}")]
    InvalidWireType { value: u8 },
    /// A group's end marker did not match its start marker.
    #[error("end-group tag did not match expected tag")]
    InvalidEndTag,
    /// Nested messages went deeper than the configured recursion limit.
    #[error("protocol message had too many levels of nesting (limit {limit})")]
    RecursionLimitExceeded { limit: u32 },
    /// A `string` field that is not valid UTF-8.
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,
}

/// Error returned by every fallible decode operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("failed to decode protobuf message: {kind}")]
pub struct DecodeError {
    kind: DecodeErrorKind,
}

impl DecodeError {
    /// Returns the specific reason for this error.
    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    #[cold]
    pub fn invalid_tag() -> Self {
        DecodeErrorKind::InvalidTag.into()
    }

    #[cold]
    pub fn malformed_varint() -> Self {
        DecodeErrorKind::MalformedVarint.into()
    }

    #[cold]
    pub fn negative_size() -> Self {
        DecodeErrorKind::NegativeSize.into()
    }

    #[cold]
    pub fn truncated_message() -> Self {
        DecodeErrorKind::TruncatedMessage.into()
    }

    #[cold]
    pub fn size_limit_exceeded(limit: usize) -> Self {
        tracing::debug!(limit, "message exceeded size limit");
        DecodeErrorKind::SizeLimitExceeded { limit }.into()
    }

    #[cold]
    pub fn invalid_wire_type(value: u8) -> Self {
        DecodeErrorKind::InvalidWireType { value }.into()
    }

    #[cold]
    pub fn invalid_end_tag() -> Self {
        DecodeErrorKind::InvalidEndTag.into()
    }

    #[cold]
    pub fn recursion_limit_exceeded(limit: u32) -> Self {
        tracing::debug!(limit, "message exceeded recursion limit");
        DecodeErrorKind::RecursionLimitExceeded { limit }.into()
    }

    #[cold]
    pub fn invalid_utf8() -> Self {
        DecodeErrorKind::InvalidUtf8.into()
    }
}

impl From<DecodeErrorKind> for DecodeError {
    #[inline]
    fn from(kind: DecodeErrorKind) -> Self {
        DecodeError { kind }
    }
}
