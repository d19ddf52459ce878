//! Line offset recovery for extracted text.
//!
//! Positions are recovered by searching the original document for the
//! extracted text rather than trusting the scanner. The first occurrence
//! always wins, so identical blocks repeated in one file all map to the
//! line of the first copy.

/// 0-based line in `haystack` where the first occurrence of `needle` starts.
///
/// `\n` and `\r\n` both count as one line break. A needle that is empty or
/// not present maps to line 0.
pub fn line_offset(needle: &str, haystack: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    match haystack.find(needle) {
        Some(pos) => haystack[..pos].bytes().filter(|b| *b == b'\n').count(),
        None => 0,
    }
}
