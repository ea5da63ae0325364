//! Literal key-path resolution.
//!
//! A single linear scan tracks the current object depth and the number of
//! path segments already matched. A quoted token is a key candidate only
//! when the next unmatched segment sits exactly one object level below the
//! segments matched so far and a colon follows the token after whitespace;
//! candidates are compared byte-for-byte, so empty and whitespace-only
//! keys are distinct by exact length. Arrays are jumped over as one
//! balanced step and never descended: paths traverse object keys only,
//! never array indices.

use bytes::Bytes;

use crate::{
    error::Error,
    scanner,
    span::{Span, Value, ValueKind},
};

/// Locate and classify the value reachable by `path`.
///
/// An empty `path` resolves the document's root value. String results
/// cover the content between the quotes; composite results include their
/// brackets; a bare scalar must be followed by a delimiter or the call
/// reports the document malformed.
///
/// # Errors
///
/// [`Error::PathNotFound`] when the document is traversable but the
/// literal path is absent at the correct nesting depth;
/// [`Error::Malformed`] when a terminator is missing along the way.
pub fn resolve_path<P: AsRef<str>>(buffer: &Bytes, path: &[P]) -> Result<Value, Error> {
    let start = locate(buffer, path)?;
    let (kind, span) = classify(buffer, start)?;
    Ok(Value::new(buffer, kind, span))
}

/// Index of the first byte of the value reachable by `path`.
pub(crate) fn locate<P: AsRef<str>>(buf: &[u8], path: &[P]) -> Result<usize, Error> {
    if path.is_empty() {
        return scanner::skip_whitespace(buf, 0).ok_or(Error::Malformed);
    }

    let mut depth = 0usize;
    let mut matched = 0usize;
    let mut i = 0usize;

    while let Some(&b) = buf.get(i) {
        match b {
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            // Arrays are opaque to path matching: jump the whole balanced
            // span so their contents never affect depth or produce
            // candidates.
            b'[' => {
                i = scanner::balanced_end(buf, i, b'[').ok_or(Error::Malformed)?;
            }
            b'"' => {
                let key_start = i + 1;
                let quote_end = scanner::string_end(buf, key_start).ok_or(Error::Malformed)?;
                // A quoted token must be followed by some terminator;
                // running off the buffer here means truncation.
                let after = scanner::skip_whitespace(buf, quote_end).ok_or(Error::Malformed)?;
                if buf.get(after) == Some(&b':') && depth == matched + 1 {
                    let key = &buf[key_start..quote_end - 1];
                    if key == path[matched].as_ref().as_bytes() {
                        matched += 1;
                        if matched == path.len() {
                            return scanner::skip_whitespace(buf, after + 1)
                                .ok_or(Error::Malformed);
                        }
                    }
                }
                // Resume right past the closing quote; whatever follows
                // (colon, comma, close brace) is handled by the loop.
                i = quote_end;
            }
            _ => i += 1,
        }
    }

    Err(Error::PathNotFound)
}

/// Classify the token starting at `start` and compute its span.
pub(crate) fn classify(buf: &[u8], start: usize) -> Result<(ValueKind, Span), Error> {
    match buf.get(start) {
        Some(b'"') => {
            let end = scanner::string_end(buf, start + 1).ok_or(Error::Malformed)?;
            Ok((ValueKind::String, Span::new(start + 1, end - 1)))
        }
        Some(&(open @ (b'{' | b'['))) => {
            let end = scanner::balanced_end(buf, start, open).ok_or(Error::Malformed)?;
            let kind = if open == b'[' {
                ValueKind::Array
            } else {
                ValueKind::Object
            };
            Ok((kind, Span::new(start, end)))
        }
        Some(_) => {
            let end = scanner::scalar_end(buf, start).ok_or(Error::Malformed)?;
            Ok((ValueKind::Scalar, Span::new(start, end)))
        }
        None => Err(Error::Malformed),
    }
}
