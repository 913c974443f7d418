//! Terminal display width of strings.
//!
//! Every character is zero, one or two columns wide. Zero-width means
//! combining marks, joiners and other characters `unicode-width` gives no
//! columns (control characters included). Double-width comes from a fixed
//! table of CJK, Hangul, fullwidth and emoji blocks, so the result does not
//! shift with the Unicode version of whatever library measures it.

use unicode_width::UnicodeWidthChar;

const ELLIPSIS: &str = "...";

/// Inclusive code point ranges rendered two columns wide
const WIDE_RANGES: &[(u32, u32)] = &[
    (0x1100, 0x115F),   // Hangul Jamo
    (0x231A, 0x23F3),   // watch, hourglass and friends
    (0x2600, 0x27BF),   // misc symbols, dingbats
    (0x2E80, 0x303E),   // CJK radicals, Kangxi, ideographic punctuation
    (0x3040, 0x33BF),   // Hiragana, Katakana, CJK compatibility
    (0x3400, 0x4DBF),   // CJK extension A
    (0x4E00, 0xA4CF),   // CJK unified, Yi
    (0xAC00, 0xD7AF),   // Hangul syllables
    (0xF900, 0xFAFF),   // CJK compatibility ideographs
    (0xFE30, 0xFE6F),   // CJK compatibility forms
    (0xFF01, 0xFF60),   // fullwidth forms
    (0xFFE0, 0xFFE6),   // fullwidth signs
    (0x1F300, 0x1F9FF), // emoji and pictographs
    (0x1FA00, 0x1FA6F), // chess symbols
    (0x1FA70, 0x1FAFF), // symbols and pictographs extended-A
    (0x20000, 0x2FFFD), // CJK extension B and up
    (0x30000, 0x3FFFD), // CJK extension G and up
];

pub fn is_zero_width(c: char) -> bool {
    !matches!(c.width(), Some(w) if w > 0)
}

pub fn is_wide(c: char) -> bool {
    let code = u32::from(c);
    WIDE_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code))
}

pub fn char_width(c: char) -> usize {
    if is_zero_width(c) {
        0
    } else if is_wide(c) {
        2
    } else {
        1
    }
}

pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Longest prefix of `s` whose display width is at most `max_width`.
///
/// Zero-width characters following the last kept character stay attached to
/// it.
pub fn slice_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (i, c) in s.char_indices() {
        let w = char_width(c);
        if width + w > max_width {
            return &s[..i];
        }
        width += w;
    }
    s
}

/// Fit `s` into `max_width` columns, marking the cut with `...`.
///
/// Strings that already fit come back unchanged. When there is no room for
/// the ellipsis (`max_width < 3`) the plain prefix is returned instead.
pub fn truncate(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    if max_width < ELLIPSIS.len() {
        return slice_width(s, max_width).to_string();
    }

    let mut out = slice_width(s, max_width - ELLIPSIS.len()).to_string();
    out.push_str(ELLIPSIS);
    out
}

/// Right-align `s` in `target` columns; wider strings are left alone
pub fn pad_start(s: &str, target: usize) -> String {
    let gap = target.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(gap), s)
}

/// Left-align `s` in `target` columns; wider strings are left alone
pub fn pad_end(s: &str, target: usize) -> String {
    let gap = target.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(gap))
}
