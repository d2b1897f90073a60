//! ASCII key forms of a Lomaji syllable: numeric-tone (`chiah8`) and telex
//! (`chiahj`).

use unicode_normalization::UnicodeNormalization;

use crate::unicode::is_latin;
use crate::BuildError;

/// Combining marks (and `ⁿ`) and the ASCII text that replaces each one.
const ASCII_SUBS: [(char, &str); 9] = [
    ('\u{207F}', "nn"),
    ('\u{0358}', "u"),
    ('\u{0301}', "2"),
    ('\u{0300}', "3"),
    ('\u{0302}', "5"),
    ('\u{0304}', "7"),
    ('\u{030D}', "8"),
    ('\u{0306}', "9"),
    ('\u{0324}', "r"),
];

/// Tone digit → telex letter. Tones 7 and 8 share `j`.
const TELEX_SUBS: [(char, char); 6] = [
    ('2', 's'),
    ('3', 'f'),
    ('5', 'l'),
    ('7', 'j'),
    ('8', 'j'),
    ('9', 'w'),
];

/// Candidate key forms for one syllable. Both lists always have the same
/// length and matching positions describe the same tone choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KhiinForms {
    pub numeric: Vec<String>,
    pub telex: Vec<String>,
}

/// Convert Lomaji to lower-case ASCII with the tone written as a digit
/// after the syllable: `Chia̍h` → `chiah8`, `hó͘` → `hou2`.
pub fn to_ascii(text: &str) -> String {
    let mut substituted = String::with_capacity(text.len());
    for c in text.nfd() {
        match ASCII_SUBS.iter().find(|(mark, _)| *mark == c) {
            Some((_, sub)) => substituted.push_str(sub),
            None => substituted.push(c),
        }
    }
    move_tone_digits(&substituted).to_lowercase()
}

/// Move a digit sitting between two runs of letters to the end of the
/// second run (`ma8h` → `mah8`). Runs are consumed left to right and a
/// letter run takes part in at most one move.
fn move_tone_digits(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let run_end = |from: usize| {
        chars[from..]
            .iter()
            .position(|c| !is_latin(*c))
            .map_or(chars.len(), |n| from + n)
    };

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if !is_latin(chars[i]) {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let head_end = run_end(i);
        let digit = chars.get(head_end).copied().filter(char::is_ascii_digit);
        let tail_start = head_end + 1;
        match digit {
            Some(d) if chars.get(tail_start).is_some_and(|c| is_latin(*c)) => {
                let tail_end = run_end(tail_start);
                out.extend(&chars[i..head_end]);
                out.extend(&chars[tail_start..tail_end]);
                out.push(d);
                i = tail_end;
            }
            _ => {
                out.extend(&chars[i..head_end]);
                i = head_end;
            }
        }
    }
    out
}

fn telex_letter(digit: char) -> Option<char> {
    TELEX_SUBS
        .iter()
        .find_map(|&(d, letter)| (d == digit).then_some(letter))
}

/// Numeric and telex key candidates for a single syllable.
///
/// A toneless syllable yields its ASCII form for both encodings. A toned
/// syllable yields the toned forms, followed by the bare toneless form when
/// `strip_tones` is set.
pub fn to_khiin_forms(syllable: &str, strip_tones: bool) -> Result<KhiinForms, BuildError> {
    let numeric = to_ascii(syllable);

    let Some(digit) = numeric.chars().last().filter(char::is_ascii_digit) else {
        return Ok(KhiinForms {
            numeric: vec![numeric.clone()],
            telex: vec![numeric],
        });
    };

    let toneless = numeric[..numeric.len() - 1].to_string();
    let letter = telex_letter(digit).ok_or_else(|| BuildError::UnmappedTone {
        syllable: syllable.to_string(),
        digit,
    })?;
    let telex = format!("{toneless}{letter}");

    Ok(if strip_tones {
        KhiinForms {
            numeric: vec![numeric, toneless.clone()],
            telex: vec![telex, toneless],
        }
    } else {
        KhiinForms {
            numeric: vec![numeric],
            telex: vec![telex],
        }
    })
}
