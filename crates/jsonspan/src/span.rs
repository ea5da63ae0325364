use core::fmt;

use bstr::ByteSlice;
use bytes::Bytes;

/// A non-owning view into the source buffer: absolute byte offsets of one
/// raw encoded value, undecoded. `start <= end <= buffer.len()` holds by
/// construction for every span this crate emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of bytes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The bytes this span covers within `buffer`.
    ///
    /// # Panics
    /// Panics if `buffer` is shorter than `self.end`; spans are only
    /// meaningful against the buffer they were produced from.
    #[must_use]
    pub fn slice<'b>(&self, buffer: &'b [u8]) -> &'b [u8] {
        &buffer[self.start..self.end]
    }
}

/// Category of an extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Quoted string. The span covers the content between the quotes,
    /// without the quotes and without escape decoding.
    String,
    /// `[...]`; the span includes both brackets.
    Array,
    /// `{...}`; the span includes both braces.
    Object,
    /// Bare token: number, boolean, `null`, or any other unquoted run.
    Scalar,
}

/// One extracted value: its category, its offsets, and a zero-copy slice
/// of the source bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Value {
    kind: ValueKind,
    span: Span,
    raw: Bytes,
}

impl Value {
    pub(crate) fn new(buffer: &Bytes, kind: ValueKind, span: Span) -> Self {
        Self {
            kind,
            span,
            raw: buffer.slice(span.start..span.end),
        }
    }

    /// Category of the value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Absolute offsets of the value within its source buffer.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Raw encoded text, exactly as it appears in the source.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Zero-copy handle to the raw text, sharing the source allocation.
    /// Composite values can be fed straight back into the iterators.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.raw
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("kind", &self.kind)
            .field("span", &(self.span.start..self.span.end))
            .field("raw", &self.raw.as_bstr())
            .finish()
    }
}

/// A key paired with its value, as emitted by the object iterator. The key
/// is the raw string content between its quotes, unescaped.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyValue {
    key_span: Span,
    key: Bytes,
    value: Value,
}

impl KeyValue {
    pub(crate) fn new(buffer: &Bytes, key_span: Span, value: Value) -> Self {
        Self {
            key_span,
            key: buffer.slice(key_span.start..key_span.end),
            value,
        }
    }

    /// Raw key bytes.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Absolute offsets of the key content within its source buffer.
    #[must_use]
    pub fn key_span(&self) -> Span {
        self.key_span
    }

    /// The member's value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Split into the key's bytes and the value.
    #[must_use]
    pub fn into_parts(self) -> (Bytes, Value) {
        (self.key, self.value)
    }
}

impl fmt::Debug for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValue")
            .field("key", &self.key.as_bstr())
            .field("value", &self.value)
            .finish()
    }
}
