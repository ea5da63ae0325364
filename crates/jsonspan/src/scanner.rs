//! Byte-level traversal primitives.
//!
//! Every function takes the whole buffer plus an absolute start index and
//! returns an absolute index, or `None` when the wanted byte does not exist
//! before the end of the buffer. Nothing here allocates, looks behind
//! `from`, or indexes without a bounds check, so truncated or adversarial
//! input can at worst produce `None` — callers turn that into
//! [`Malformed`](crate::Error::Malformed).

/// JSON whitespace: space, tab, CR, LF. No other byte is skipped.
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Index of the first non-whitespace byte at or after `from`.
pub(crate) fn skip_whitespace(buf: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .iter()
        .position(|b| !is_whitespace(*b))
        .map(|i| from + i)
}

/// Index just past the closing `"` of a string whose opening quote sits
/// before `from`.
///
/// Backslash escapes are deliberately not recognized: any `"` terminates
/// the string. The documents this crate targets carry plain-text
/// identifiers, and accepting escapes would change which inputs match.
pub(crate) fn string_end(buf: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .iter()
        .position(|b| *b == b'"')
        .map(|i| from + i + 1)
}

/// Index just past the close bracket matching `open` (`{` or `[`), where
/// `buf[from]` is expected to be `open` itself. Nesting depth is tracked
/// and quoted substrings are skipped, so brackets inside strings never
/// count. `None` if the depth never returns to zero.
pub(crate) fn balanced_end(buf: &[u8], from: usize, open: u8) -> Option<usize> {
    let close = if open == b'[' { b']' } else { b'}' };
    let mut depth = 0usize;
    let mut i = from;
    while let Some(&b) = buf.get(i) {
        match b {
            b'"' => {
                i = string_end(buf, i + 1)?;
                continue;
            }
            _ if b == open => depth += 1,
            _ if b == close => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the first whitespace, comma, or close-bracket byte at or after
/// `from`, delimiting a bare token. A token running to the end of the
/// buffer has no delimiter and yields `None`; callers report that as
/// malformed rather than accepting the token.
pub(crate) fn scalar_end(buf: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .iter()
        .position(|b| is_whitespace(*b) || matches!(*b, b',' | b'}' | b']'))
        .map(|i| from + i)
}

/// Index of the `:` following a key, with only whitespace allowed before
/// it. Any other byte first means the key has no valid terminator.
pub(crate) fn next_colon(buf: &[u8], from: usize) -> Option<usize> {
    let i = skip_whitespace(buf, from)?;
    match buf.get(i) {
        Some(b':') => Some(i),
        _ => None,
    }
}

/// Index of the `,` or enclosing `close` bracket following a value, with
/// only whitespace allowed before it.
pub(crate) fn next_separator(buf: &[u8], from: usize, close: u8) -> Option<usize> {
    let i = skip_whitespace(buf, from)?;
    match buf.get(i) {
        Some(&b) if b == b',' || b == close => Some(i),
        _ => None,
    }
}
