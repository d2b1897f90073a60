//! Character-level Unicode classification for Lomaji and Hanji text.

/// Combining tone marks stripped by toneless normalization (U+0300..U+030D).
///
/// The range also covers a few marks Lomaji never uses (macron below, etc.),
/// which is harmless since they never survive into key sequences anyway.
pub fn is_tone_mark(c: char) -> bool {
    ('\u{0300}'..='\u{030D}').contains(&c)
}

/// The interpunct used in some sources to mark syllable breaks (`·`).
pub const SYLLABLE_DOT: char = '\u{00B7}';

/// Superscript n marking a nasal syllable (`ⁿ`).
pub const NASAL_MARK: char = '\u{207F}';

/// Anything above the CJK radicals supplement is treated as Hanji.
pub fn is_hanji(c: char) -> bool {
    c as u32 > 0x2E80
}

/// Whether any character of `s` is a Hanji.
pub fn has_hanji(s: &str) -> bool {
    s.chars().any(is_hanji)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}
