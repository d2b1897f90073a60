use std::collections::HashMap;

use tracing::{debug, debug_span, warn};

use super::{
    dedupe_by_key, Conversion, ConversionRow, Dataset, FrequencyRow, KeySequenceRow, Word,
};
use crate::lomaji::expand;
use crate::BuildError;

/// Turn reconciled, sorted words and conversions into database rows.
///
/// Words get sequential ids (from 1) in the order given; conversions refer
/// to them by id. Every key sequence of a word carries the word's share of
/// the total frequency, undivided across its variants. Only the non-first
/// variants of a single-syllable word are marked as fuzzy.
pub fn assemble(words: Vec<Word>, conversions: Vec<Conversion>) -> Result<Dataset, BuildError> {
    let _span = debug_span!("assemble").entered();

    let words = dedupe_by_key(words, |w| w.input.clone());
    let conversions = dedupe_by_key(conversions, |c| (c.input.clone(), c.output.clone()));

    let total = words.iter().try_fold(0i64, |acc, w| {
        acc.checked_add(w.freq)
            .ok_or_else(|| BuildError::FrequencyOverflow {
                input: w.input.clone(),
            })
    })?;
    if total == 0 && !words.is_empty() {
        warn!("total frequency is zero, every key sequence gets p = 0");
    }

    let mut ids: HashMap<&str, i64> = HashMap::with_capacity(words.len());
    let mut frequency = Vec::with_capacity(words.len());
    let mut key_sequences = Vec::new();

    for (id, word) in (1..).zip(&words) {
        ids.insert(word.input.as_str(), id);
        frequency.push(FrequencyRow {
            id,
            input: word.input.clone(),
            freq: word.freq,
            priority: word.priority_id,
        });

        let p = if total > 0 {
            word.freq as f64 / total as f64
        } else {
            0.0
        };

        for (i, candidate) in expand(&word.input)?.into_iter().enumerate() {
            let fuzzy_tone = candidate.is_fuzzy(i);
            key_sequences.push(KeySequenceRow {
                input_id: id,
                numeric: candidate.numeric,
                telex: candidate.telex,
                n_syls: candidate.n_syls as i64,
                fuzzy_tone,
                p,
            });
        }
    }

    let key_sequences = dedupe_by_key(key_sequences, |k| (k.input_id, k.numeric.clone()));

    let conversions: Vec<ConversionRow> = conversions
        .into_iter()
        .filter_map(|c| {
            let Some(&input_id) = ids.get(c.input.as_str()) else {
                debug!(input = %c.input, "conversion without a word, skipped");
                return None;
            };
            Some(ConversionRow {
                input_id,
                output: c.output,
                weight: c.weight,
                category: c.category,
                annotation: c.annotation,
            })
        })
        .collect();

    debug!(
        words = frequency.len(),
        conversions = conversions.len(),
        key_sequences = key_sequences.len(),
        "assembled"
    );

    Ok(Dataset {
        frequency,
        conversions,
        key_sequences,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(input: &str, freq: i64) -> Word {
        Word {
            input: input.to_string(),
            freq,
            priority_id: 0,
        }
    }

    fn conv(input: &str, output: &str) -> Conversion {
        Conversion {
            input: input.to_string(),
            output: output.to_string(),
            weight: 1000,
            category: None,
            annotation: None,
        }
    }

    #[test]
    fn test_single_toned_syllable() {
        let words = vec![word("má", 10), word("e", 90)];
        let data = assemble(words, vec![conv("má", "媽"), conv("e", "的")]).unwrap();

        let ma: Vec<&KeySequenceRow> =
            data.key_sequences.iter().filter(|k| k.input_id == 1).collect();
        assert_eq!(ma.len(), 2);
        assert_eq!((ma[0].numeric.as_str(), ma[0].telex.as_str()), ("ma2", "mas"));
        assert!(!ma[0].fuzzy_tone);
        assert_eq!((ma[1].numeric.as_str(), ma[1].telex.as_str()), ("ma", "ma"));
        assert!(ma[1].fuzzy_tone);
        assert!(ma.iter().all(|k| (k.p - 0.10).abs() < 1e-12 && k.n_syls == 1));
    }

    #[test]
    fn test_toneless_word_has_one_sequence() {
        let data = assemble(vec![word("e", 3)], vec![conv("e", "的")]).unwrap();
        assert_eq!(data.key_sequences.len(), 1);
        let k = &data.key_sequences[0];
        assert_eq!(k.numeric, "e");
        assert_eq!(k.telex, "e");
        assert!(!k.fuzzy_tone);
        assert!((k.p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_multi_syllable_is_never_fuzzy() {
        let data = assemble(vec![word("chia̍h pn̄g", 4)], vec![conv("chia̍h pn̄g", "食飯")]).unwrap();
        assert_eq!(data.key_sequences.len(), 4);
        assert!(data.key_sequences.iter().all(|k| !k.fuzzy_tone && k.n_syls == 2));
    }

    #[test]
    fn test_ids_follow_order_and_conversions_resolve() {
        let words = vec![word("b", 5), word("a", 1)];
        let convs = vec![conv("a", "A"), conv("b", "B"), conv("missing", "M")];
        let data = assemble(words, convs).unwrap();
        assert_eq!(data.frequency[0].id, 1);
        assert_eq!(data.frequency[0].input, "b");
        assert_eq!(data.frequency[1].id, 2);
        let pairs: Vec<(i64, &str)> = data
            .conversions
            .iter()
            .map(|c| (c.input_id, c.output.as_str()))
            .collect();
        assert_eq!(pairs, [(2, "A"), (1, "B")]);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let words = vec![word("a", 5), word("a", 7)];
        let convs = vec![conv("a", "A"), conv("a", "A")];
        let data = assemble(words, convs).unwrap();
        assert_eq!(data.frequency.len(), 1);
        assert_eq!(data.frequency[0].freq, 5);
        assert_eq!(data.conversions.len(), 1);
    }

    #[test]
    fn test_total_frequency_overflow() {
        let words = vec![word("a", i64::MAX), word("b", 1)];
        let err = assemble(words, vec![conv("a", "A")]).unwrap_err();
        assert!(matches!(err, BuildError::FrequencyOverflow { ref input } if input == "b"));
    }

    #[test]
    fn test_zero_total_frequency() {
        let data = assemble(vec![word("má", 0)], vec![conv("má", "媽")]).unwrap();
        assert!(data.key_sequences.iter().all(|k| k.p == 0.0));
    }
}
