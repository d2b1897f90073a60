use tracing::{debug, debug_span, info};

use super::source::RawConversion;
use super::{
    assemble, conversion_order, dedupe_by_key, intersect, word_order, Conversion, Dataset, Emoji,
    Symbol, SyllableRow, Word,
};
use crate::lomaji::{add_all_tones, normalize};
use crate::settings::Settings;
use crate::unicode::has_hanji;
use crate::BuildError;

/// Switches that change which rows make it into a build.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Drop words with a frequency of zero before anything else happens.
    pub exclude_zeros: bool,
    /// Add every tone variant of each listed syllable as a word of its own.
    pub auto_tones: bool,
    /// Ignore the `weight` column; Hanji outputs outrank Lomaji outputs.
    pub hanji_first: bool,
}

/// Parsed input tables, not yet sorted or filtered.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub words: Vec<Word>,
    pub conversions: Vec<RawConversion>,
    pub syllables: Vec<String>,
    pub symbols: Option<Vec<Symbol>>,
    pub emoji: Option<Vec<Emoji>>,
}

fn resolve_weight(
    raw: RawConversion,
    options: &BuildOptions,
    settings: &Settings,
) -> Result<Conversion, BuildError> {
    let weight = if options.hanji_first {
        if has_hanji(&raw.output) {
            settings.weights.hanji
        } else {
            settings.weights.lomaji
        }
    } else {
        raw.weight.ok_or_else(|| BuildError::MissingWeight {
            input: raw.input.clone(),
            output: raw.output.clone(),
        })?
    };

    Ok(Conversion {
        input: raw.input,
        output: raw.output,
        weight,
        category: raw.category,
        annotation: raw.annotation,
    })
}

/// Run a complete build over parsed inputs.
///
/// Input rows are sorted before deduplication, so the first row for a key
/// in canonical order wins. Rows generated from the syllable list come
/// after all file rows and therefore never replace them.
pub fn build(
    raw: RawInputs,
    options: &BuildOptions,
    settings: &Settings,
) -> Result<Dataset, BuildError> {
    let _span = debug_span!("build").entered();
    let collation = settings.collation.kind.collation();

    let mut words = raw.words;
    if options.exclude_zeros {
        let before = words.len();
        words.retain(|w| w.freq != 0);
        debug!(dropped = before - words.len(), "excluded zero-frequency words");
    }
    words.sort_by(word_order);

    let mut conversions = raw
        .conversions
        .into_iter()
        .map(|c| resolve_weight(c, options, settings))
        .collect::<Result<Vec<_>, _>>()?;
    conversions.sort_by(|a, b| conversion_order(collation.as_ref(), a, b));

    let mut syllables: Vec<String> = raw
        .syllables
        .iter()
        .map(|s| normalize(s, false))
        .filter(|s| !s.is_empty())
        .collect();
    syllables.sort_by(|a, b| collation.compare(a, b));
    let syllables = dedupe_by_key(syllables, |s| s.clone());

    if options.auto_tones {
        for syllable in &syllables {
            for toned in add_all_tones(syllable) {
                words.push(Word {
                    input: normalize(&toned, false),
                    freq: 0,
                    priority_id: settings.tones.priority_id,
                });
                conversions.push(Conversion {
                    input: normalize(&toned, false),
                    output: toned,
                    weight: settings.tones.weight,
                    category: None,
                    annotation: None,
                });
            }
        }
    }

    let words = dedupe_by_key(words, |w| w.input.clone());
    let conversions = dedupe_by_key(conversions, |c| (c.input.clone(), c.output.clone()));

    let (words, conversions) = intersect(words, conversions, collation.as_ref());
    let mut dataset = assemble(words, conversions)?;

    dataset.syllables = syllables
        .into_iter()
        .map(|input| SyllableRow { input })
        .collect();
    dataset.symbols = raw.symbols;
    dataset.emoji = raw.emoji;

    info!(
        words = dataset.frequency.len(),
        conversions = dataset.conversions.len(),
        key_sequences = dataset.key_sequences.len(),
        syllables = dataset.syllables.len(),
        "build complete"
    );

    Ok(dataset)
}
