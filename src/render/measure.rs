//! Visible-width measurement for strings that carry terminal styling.
//!
//! Escape sequences (SGR colors, bold, dim, ...) occupy zero columns on screen,
//! so padding has to be computed from what the terminal actually draws.

use strip_ansi_escapes::strip_str;
use unicode_width::UnicodeWidthStr;

/// Number of terminal columns `text` occupies once styling sequences are removed.
///
/// The input is never modified; the stripped copy only exists for measurement.
/// Wide characters (CJK, most emoji) count as two columns and combining marks
/// as zero, which is an approximation for terminals that disagree with the
/// Unicode width tables.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    if !text.contains('\x1b') {
        return UnicodeWidthStr::width(text);
    }
    UnicodeWidthStr::width(strip_str(text).as_str())
}

/// Spaces needed to bring an item of `width` columns up to `target`.
///
/// Never negative: content wider than the target gets no padding and is not
/// truncated.
#[must_use]
pub fn padding_for(width: usize, target: usize) -> usize {
    target.saturating_sub(width)
}

/// Strip styling sequences, returning only the printable text.
#[must_use]
pub fn plain(text: &str) -> String {
    strip_str(text)
}
