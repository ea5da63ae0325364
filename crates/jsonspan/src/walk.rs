//! Pull-based walkers over a located composite target.
//!
//! The walkers are pure, single-pass iterators over `&[u8]`; spans they
//! emit are absolute offsets into the full buffer. The streaming layer in
//! [`crate::stream`] drives them from a worker thread. After one error a
//! walker is done and yields nothing further.

use crate::{
    error::Error,
    resolve, scanner,
    span::{Span, ValueKind},
};

/// Locate the bracketed target an iterator will walk: the value at `path`,
/// which must open with `open`, or the first visible value of the document
/// when `path` is empty.
pub(crate) fn find_target<P: AsRef<str>>(
    buf: &[u8],
    open: u8,
    path: &[P],
) -> Result<Span, Error> {
    let start = resolve::locate(buf, path)?;
    if buf.get(start) != Some(&open) {
        return Err(Error::Malformed);
    }
    let end = scanner::balanced_end(buf, start, open).ok_or(Error::Malformed)?;
    Ok(Span::new(start, end))
}

/// Element walker for an array target. Yields `(kind, span)` per element
/// in document order.
pub(crate) struct ArrayWalker<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
    done: bool,
}

impl<'a> ArrayWalker<'a> {
    /// `target` must be a balanced `[...]` span within `buf`.
    pub(crate) fn new(buf: &'a [u8], target: Span) -> Self {
        Self {
            buf,
            pos: target.start + 1,
            end: target.end,
            done: false,
        }
    }

    fn fail(&mut self) -> Option<Result<(ValueKind, Span), Error>> {
        self.done = true;
        Some(Err(Error::Malformed))
    }
}

impl Iterator for ArrayWalker<'_> {
    type Item = Result<(ValueKind, Span), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if self.pos >= self.end {
                return None;
            }
            let Some(i) = scanner::skip_whitespace(self.buf, self.pos) else {
                return self.fail();
            };
            if i >= self.end {
                return self.fail();
            }
            match self.buf[i] {
                b',' => self.pos = i + 1,
                b']' => {
                    // The close bracket is only valid as the final byte of
                    // the target range.
                    if i + 1 != self.end {
                        return self.fail();
                    }
                    self.pos = self.end;
                }
                _ => {
                    let Ok((kind, span)) = resolve::classify(self.buf, i) else {
                        return self.fail();
                    };
                    let consumed = match kind {
                        ValueKind::String => span.end + 1,
                        _ => span.end,
                    };
                    if consumed > self.end {
                        return self.fail();
                    }
                    self.pos = consumed;
                    return Some(Ok((kind, span)));
                }
            }
        }
    }
}

/// One object member: key content span, value kind, value span.
pub(crate) type Member = (Span, ValueKind, Span);

/// Member walker for an object target, alternating between awaiting a key
/// and awaiting its value. Keys must be quoted strings followed by a valid
/// colon; values must be followed by a valid `,` or the enclosing `}`.
/// Duplicate keys are emitted in encounter order.
pub(crate) struct ObjectWalker<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
    pending_key: Option<Span>,
    done: bool,
}

impl<'a> ObjectWalker<'a> {
    /// `target` must be a balanced `{...}` span within `buf`.
    pub(crate) fn new(buf: &'a [u8], target: Span) -> Self {
        Self {
            buf,
            pos: target.start + 1,
            end: target.end,
            pending_key: None,
            done: false,
        }
    }

    fn fail(&mut self) -> Option<Result<Member, Error>> {
        self.done = true;
        Some(Err(Error::Malformed))
    }
}

impl Iterator for ObjectWalker<'_> {
    type Item = Result<Member, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if self.pos >= self.end {
                return None;
            }
            let Some(i) = scanner::skip_whitespace(self.buf, self.pos) else {
                return self.fail();
            };
            if i >= self.end {
                return self.fail();
            }
            if let Some(key) = self.pending_key {
                let Ok((kind, span)) = resolve::classify(self.buf, i) else {
                    return self.fail();
                };
                let value_end = match kind {
                    ValueKind::String => span.end + 1,
                    _ => span.end,
                };
                let Some(sep) = scanner::next_separator(self.buf, value_end, b'}') else {
                    return self.fail();
                };
                if sep >= self.end {
                    return self.fail();
                }
                self.pos = sep + 1;
                self.pending_key = None;
                return Some(Ok((key, kind, span)));
            }
            // Awaiting a key: the only acceptable token is a quoted string
            // followed by a colon. Note `{}` has no valid key token either.
            if self.buf[i] != b'"' {
                return self.fail();
            }
            let Some(quote_end) = scanner::string_end(self.buf, i + 1) else {
                return self.fail();
            };
            let Some(colon) = scanner::next_colon(self.buf, quote_end) else {
                return self.fail();
            };
            self.pending_key = Some(Span::new(i + 1, quote_end - 1));
            self.pos = colon + 1;
        }
    }
}
