//! Lomaji (romanized Hokkien) text handling: normalization, tone placement,
//! and conversion into IME key sequences.

pub mod ascii;
pub mod sequence;

use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::unicode::{is_tone_mark, NASAL_MARK, SYLLABLE_DOT};

pub use ascii::{to_ascii, to_khiin_forms, KhiinForms};
pub use sequence::{expand, KeySequenceCandidate};

/// Search order for the letter that carries the tone mark when no
/// `o` + `a|e` diphthong is present.
const TONE_ANCHORS: [char; 8] = ['o', 'a', 'e', 'u', 'i', '\u{1E73}', 'n', 'm'];

/// Tone 8, the only marked tone a stop-final syllable can take.
const STOP_TONE: char = '\u{030D}';

/// Tones 2, 3, 5, 7 and 9 for open (non-stop) syllables.
const OPEN_TONES: [char; 5] = ['\u{0301}', '\u{0300}', '\u{0302}', '\u{0304}', '\u{0306}'];

/// Canonicalize Lomaji text: hyphens become spaces, syllable dots are
/// dropped, everything is lower-cased and returned in NFC.
///
/// With `strip_tones`, the combining tone marks are removed as well. The
/// function is idempotent for either flag value.
pub fn normalize(text: &str, strip_tones: bool) -> String {
    let decomposed: String = text
        .nfd()
        .filter_map(|c| match c {
            '-' => Some(' '),
            SYLLABLE_DOT => None,
            c if strip_tones && is_tone_mark(c) => None,
            c => Some(c),
        })
        .collect();

    decomposed.to_lowercase().nfc().collect()
}

/// Character index of the letter a tone mark should follow, or `None` if
/// the syllable has no vowel or syllabic nasal to carry it.
///
/// `oa`/`oe` followed by another letter take the tone on the second vowel
/// (`oán`, `oeh`); otherwise the first anchor found in priority order wins.
pub fn tone_position(syllable: &str) -> Option<usize> {
    let chars: Vec<char> = syllable.chars().collect();

    let diphthong = chars.windows(3).position(|w| {
        w[0] == 'o' && matches!(w[1], 'a' | 'e') && w[2].is_ascii_lowercase()
    });
    if let Some(start) = diphthong {
        return Some(start + 1);
    }

    TONE_ANCHORS
        .iter()
        .find_map(|&anchor| chars.iter().position(|&c| c == anchor))
}

fn is_stop_final(chars: &[char]) -> bool {
    let body = match chars.split_last() {
        Some((&NASAL_MARK, rest)) => rest,
        _ => chars,
    };
    matches!(body.last(), Some('p' | 't' | 'k' | 'h'))
}

/// The syllable itself followed by every tone-marked variant it can take.
///
/// Stop-final syllables (`-p`, `-t`, `-k`, `-h`) only get tone 8; all
/// others get tones 2, 3, 5, 7 and 9. A syllable without a tone anchor gets
/// its mark at the very start, which is almost certainly wrong but matches
/// how existing databases were built.
pub fn add_all_tones(syllable: &str) -> Vec<String> {
    let chars: Vec<char> = syllable.chars().collect();
    let marks: &[char] = if is_stop_final(&chars) {
        &[STOP_TONE]
    } else {
        &OPEN_TONES
    };

    let pos = match tone_position(syllable) {
        Some(i) => i + 1,
        None => {
            warn!(syllable, "no tone anchor found, placing tone mark at start");
            0
        }
    };

    let mut ret = Vec::with_capacity(marks.len() + 1);
    ret.push(syllable.to_string());
    for &mark in marks {
        let mut toned = chars.clone();
        toned.insert(pos, mark);
        ret.push(toned.into_iter().nfc().collect());
    }
    ret
}
