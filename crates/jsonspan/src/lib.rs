//! Zero-copy extraction of values from raw JSON bytes.
//!
//! This crate scans one immutable document buffer directly, without building
//! a parse tree, and hands back sub-ranges of it: every result is a
//! [`Span`] of absolute offsets plus a refcounted [`Bytes`] slice sharing the
//! source allocation. Three operations are exposed:
//!
//! - [`resolve_path`] — locate the value reachable by a literal key path,
//!   as a single blocking call.
//! - [`iterate_array`] — lazily yield each element of a target array.
//! - [`iterate_object`] — lazily yield each key/value pair of a target
//!   object.
//!
//! The iterators deliver results from a dedicated worker thread through a
//! capacity-one channel, so production and consumption interleave freely
//! while every item arrives in order, exactly once. Dropping an iterator
//! stops and joins its worker.
//!
//! Paths traverse object keys only, never array indices: an array
//! encountered during resolution is jumped over as one balanced span. This
//! is part of the public contract. Key segments are matched byte-for-byte,
//! so empty and whitespace-only keys are distinct by exact length.
//!
//! This is not a validating parser. Strings are taken as-is with no escape
//! decoding (any `"` terminates a string), numbers are not checked, and
//! duplicate keys are emitted in encounter order. Structural violations and
//! truncated input surface as exactly one terminal [`Error::Malformed`];
//! adversarial input can never panic the host process.
//!
//! ```
//! use jsonspan::{Bytes, ValueKind, iterate_array, resolve_path};
//!
//! let doc = Bytes::from_static(br#"{"a":{"b":[1,true,"x"]}}"#);
//!
//! let inner = resolve_path(&doc, &["a", "b"]).unwrap();
//! assert_eq!(inner.kind(), ValueKind::Array);
//! assert_eq!(inner.raw(), br#"[1,true,"x"]"#);
//!
//! let raw: Vec<_> = iterate_array(inner.into_bytes(), &[] as &[&str])
//!     .map(|v| v.unwrap().into_bytes())
//!     .collect();
//! assert_eq!(raw, [&b"1"[..], &b"true"[..], &b"x"[..]]);
//! ```

mod error;
mod resolve;
mod scanner;
mod span;
mod stream;
mod walk;

#[cfg(test)]
mod tests;

pub use bytes::Bytes;
pub use error::Error;
pub use resolve::resolve_path;
pub use span::{KeyValue, Span, Value, ValueKind};
pub use stream::{ArrayStream, ObjectStream, iterate_array, iterate_object};
