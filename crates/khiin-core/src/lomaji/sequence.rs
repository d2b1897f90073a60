//! Expansion of a whole word into every key sequence that should reach it.

use super::ascii::to_khiin_forms;
use crate::BuildError;

/// One generated key sequence for a word, before ids and probabilities are
/// attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySequenceCandidate {
    pub numeric: String,
    pub telex: String,
    pub n_syls: usize,
}

impl KeySequenceCandidate {
    /// Whether the candidate at `index` in its word's expansion is a
    /// toneless fallback for a single syllable.
    pub fn is_fuzzy(&self, index: usize) -> bool {
        index > 0 && self.n_syls == 1
    }
}

/// All key sequences for `word`, one per combination of per-syllable tone
/// choices. Every toned syllable may be typed with or without its tone.
///
/// The order is that of an odometer over the syllables, last syllable
/// fastest, so the first sequence is always the fully toned one.
pub fn expand(word: &str) -> Result<Vec<KeySequenceCandidate>, BuildError> {
    let forms = word
        .split([' ', '-'])
        .map(|syllable| to_khiin_forms(syllable, true))
        .collect::<Result<Vec<_>, _>>()?;
    let n_syls = forms.len();

    let numeric = cartesian_concat(forms.iter().map(|f| f.numeric.as_slice()));
    let telex = cartesian_concat(forms.iter().map(|f| f.telex.as_slice()));
    debug_assert_eq!(numeric.len(), telex.len());

    Ok(numeric
        .into_iter()
        .zip(telex)
        .map(|(numeric, telex)| KeySequenceCandidate {
            numeric,
            telex,
            n_syls,
        })
        .collect())
}

fn cartesian_concat<'a>(lists: impl IntoIterator<Item = &'a [String]>) -> Vec<String> {
    let mut acc = vec![String::new()];
    for list in lists {
        acc = acc
            .iter()
            .flat_map(|prefix| list.iter().map(move |part| format!("{prefix}{part}")))
            .collect();
    }
    acc
}
