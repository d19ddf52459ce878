//! Base-indent stripping for extracted style text.

use std::borrow::Cow;

/// Strip `base_indent` leading spaces from every line that has at least that many.
///
/// Lines with fewer leading spaces are left as they are; whitespace after the
/// first non-space character is never touched. `None` or `Some(0)` returns the
/// input unchanged.
pub fn normalize(text: &str, base_indent: Option<usize>) -> Cow<'_, str> {
    let n = match base_indent {
        Some(n) if n > 0 => n,
        _ => return Cow::Borrowed(text),
    };
    let strip = |line: &str| line.len() >= n && line.as_bytes()[..n].iter().all(|b| *b == b' ');
    if !text.split_inclusive('\n').any(strip) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        out.push_str(if strip(line) { &line[n..] } else { line });
    }
    Cow::Owned(out)
}
